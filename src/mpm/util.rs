pub(crate) fn validate_frame_size_lag_count(frame_size: usize, lag_count: usize) {
    if lag_count == 0 || 2 * lag_count > frame_size + 1 {
        panic!("Lag count must not be greater than half the frame size");
    }
}

/// Computes the NSDF normalization term
/// `m'(tau) = sum(x[j]^2) + sum(x[j + tau]^2)` with both sums running
/// over `lag_count` terms, using an incremental subtraction scheme in
/// the spirit of section 6 of the MPM paper instead of the quadratic
/// summation: consecutive lags shift the second sum by one sample, so
/// each value follows from the previous one by trading a single leaving
/// sample for an entering one.
pub(crate) fn m_prime_incremental(frame: &[f32], result: &mut [f32]) {
    let lag_count = result.len();
    validate_frame_size_lag_count(frame.len(), lag_count);

    let mut energy = 0.0_f32;
    for sample in frame.iter().take(lag_count) {
        energy += sample * sample;
    }
    result[0] = 2.0 * energy;

    for tau in 1..lag_count {
        let leaving = frame[tau - 1];
        let entering = frame[tau - 1 + lag_count];
        result[tau] = result[tau - 1] - leaving * leaving + entering * entering;
    }
}
