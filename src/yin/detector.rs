use alloc::vec::Vec;
use micromath::F32Ext;

use crate::common::level::peak_level;
use crate::detector::PitchDetector;
use crate::result::PitchResult;

/// Configuration for the YIN algorithm.
#[derive(Copy, Clone, Debug)]
pub struct YinConfig {
    /// CMNDF acceptance threshold in (0, 1]. A lag is accepted once its
    /// cumulative mean normalized difference drops below this value, so
    /// lower thresholds are more selective.
    pub threshold: f32,
    /// Lowest detectable frequency in Hz.
    pub min_frequency: f32,
    /// Highest detectable frequency in Hz.
    pub max_frequency: f32,
}

impl Default for YinConfig {
    fn default() -> Self {
        YinConfig {
            threshold: 0.15,
            min_frequency: 80.0,
            max_frequency: 1200.0,
        }
    }
}

fn validate_config(config: &YinConfig) {
    if !(config.threshold > 0.0 && config.threshold <= 1.0) {
        panic!("Threshold must be in (0, 1]");
    }
    if !(config.min_frequency > 0.0 && config.min_frequency < config.max_frequency) {
        panic!("Frequency range must satisfy 0 < min < max");
    }
}

/// Pitch detector implementing the four YIN steps: difference function,
/// cumulative mean normalized difference (CMNDF), absolute threshold and
/// parabolic refinement.
pub struct YinPitchDetector {
    config: YinConfig,
    /// Holds the difference function, then the CMNDF in place.
    cmndf: Vec<f32>,
    prepared: bool,
}

impl YinPitchDetector {
    pub fn new(config: YinConfig) -> Self {
        validate_config(&config);
        YinPitchDetector {
            config,
            cmndf: Vec::new(),
            prepared: false,
        }
    }

    pub fn config(&self) -> &YinConfig {
        &self.config
    }

    /// Makes sure the scratch buffer holds at least `lag_count` values.
    /// Returns false once the buffer has been frozen at a smaller size by
    /// `prepare`.
    fn ensure_scratch(&mut self, lag_count: usize) -> bool {
        if lag_count <= self.cmndf.len() {
            return true;
        }
        if self.prepared {
            return false;
        }
        self.cmndf.resize(lag_count, 0.0);
        true
    }
}

impl Default for YinPitchDetector {
    fn default() -> Self {
        YinPitchDetector::new(YinConfig::default())
    }
}

impl PitchDetector for YinPitchDetector {
    fn detect(&mut self, frame: &[f32], sample_rate: f32) -> Option<PitchResult> {
        if frame.is_empty() || !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return None;
        }
        if peak_level(frame) == 0.0 {
            return None;
        }

        let min_tau = (sample_rate / self.config.max_frequency) as usize;
        let max_tau = (sample_rate / self.config.min_frequency) as usize;
        let half = frame.len() / 2;
        if max_tau >= half {
            return None;
        }
        if !self.ensure_scratch(half) {
            return None;
        }
        let cmndf = &mut self.cmndf[..half];

        // Step 1: difference function
        for (tau, value) in cmndf.iter_mut().enumerate() {
            let mut sum = 0.0_f32;
            for i in 0..half {
                let delta = frame[i] - frame[i + tau];
                sum += delta * delta;
            }
            *value = sum;
        }

        // Step 2: cumulative mean normalization
        cmndf[0] = 1.0;
        let mut running_sum = 0.0_f32;
        for tau in 1..half {
            running_sum += cmndf[tau];
            if running_sum != 0.0 {
                cmndf[tau] *= (tau as f32) / running_sum;
            } else {
                cmndf[tau] = 1.0;
            }
        }

        // Step 3: absolute threshold. Accept the first lag that crosses
        // below the threshold, then follow the dip down to its local
        // minimum. The crossing lag sits on the flank of the dip, where
        // a three point parabola lands far from the true period.
        let mut tau = min_tau;
        while tau < max_tau {
            if cmndf[tau] < self.config.threshold {
                while tau + 1 < half && cmndf[tau + 1] < cmndf[tau] {
                    tau += 1;
                }

                // Step 4: parabolic interpolation for sub-sample accuracy
                let refined = parabolic_refine(cmndf, tau);
                let frequency = sample_rate / refined;
                if !frequency.is_finite() || frequency <= 0.0 {
                    return None;
                }
                let frequency =
                    frequency.clamp(self.config.min_frequency, self.config.max_frequency);
                return Some(PitchResult::new(frequency, 1.0 - cmndf[tau]));
            }
            tau += 1;
        }

        None
    }

    fn prepare(&mut self, max_frame_size: usize) {
        let lag_count = max_frame_size / 2;
        if lag_count > self.cmndf.len() {
            self.cmndf.resize(lag_count, 0.0);
        }
        self.prepared = true;
    }

    fn reset(&mut self) {
        for value in self.cmndf.iter_mut() {
            *value = 0.0;
        }
    }
}

/// Refines an extremum position with a three point parabolic fit.
/// Falls back to the integer lag at the buffer ends, for flat
/// neighborhoods and for fits landing more than one sample away.
fn parabolic_refine(values: &[f32], tau: usize) -> f32 {
    if tau == 0 || tau + 1 >= values.len() {
        return tau as f32;
    }

    let s0 = values[tau - 1];
    let s1 = values[tau];
    let s2 = values[tau + 1];

    let denominator = 2.0 * (2.0 * s1 - s2 - s0);
    if F32Ext::abs(denominator) <= f32::EPSILON {
        return tau as f32;
    }
    let adjustment = (s2 - s0) / denominator;
    if F32Ext::abs(adjustment) >= 1.0 {
        return tau as f32;
    }
    (tau as f32) + adjustment
}
