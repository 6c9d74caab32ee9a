use alloc::vec::Vec;

use crate::common::level::peak_level;
use crate::detector::PitchDetector;
use crate::mpm::key_maximum::KeyMaximum;
use crate::mpm::util::m_prime_incremental;
use crate::result::PitchResult;

/// The maximum number of key maxima to gather during the peak picking
/// phase.
pub const MAX_KEY_MAXIMA_COUNT: usize = 16;

/// Configuration for the MPM algorithm.
#[derive(Copy, Clone, Debug)]
pub struct MpmConfig {
    /// Minimum NSDF value for a maximum to be retained as a pitch period
    /// candidate, in (0, 1].
    pub threshold: f32,
    /// Lowest detectable frequency in Hz.
    pub min_frequency: f32,
    /// Highest detectable frequency in Hz.
    pub max_frequency: f32,
    /// Key maximum selection factor: among the retained maxima, the one
    /// at the shortest lag whose value reaches `cutoff` times the largest
    /// value wins. For periodic input the NSDF peaks at every multiple of
    /// the period with near-equal height, so picking the raw largest
    /// value hands the result to an arbitrary multiple.
    pub cutoff: f32,
    /// Declared for McLeod's initial peak search; retention is governed
    /// by `threshold`.
    pub small_cutoff: f32,
}

impl Default for MpmConfig {
    fn default() -> Self {
        MpmConfig {
            threshold: 0.93,
            min_frequency: 80.0,
            max_frequency: 1200.0,
            cutoff: 0.97,
            small_cutoff: 0.5,
        }
    }
}

fn validate_config(config: &MpmConfig) {
    if !(config.threshold > 0.0 && config.threshold <= 1.0) {
        panic!("Threshold must be in (0, 1]");
    }
    if !(config.cutoff > 0.0 && config.cutoff <= 1.0) {
        panic!("Cutoff must be in (0, 1]");
    }
    if !(config.min_frequency > 0.0 && config.min_frequency < config.max_frequency) {
        panic!("Frequency range must satisfy 0 < min < max");
    }
}

/// Pitch detector implementing the McLeod pitch method: autocorrelation,
/// NSDF normalization, zero-crossing guided peak picking and parabolic
/// refinement of the selected key maximum.
pub struct MpmPitchDetector {
    config: MpmConfig,
    nsdf: Vec<f32>,
    acf: Vec<f32>,
    m_prime: Vec<f32>,
    /// Fixed array of key maxima. The first `key_max_count` entries are
    /// valid.
    key_maxima: [KeyMaximum; MAX_KEY_MAXIMA_COUNT],
    key_max_count: usize,
    prepared: bool,
}

impl MpmPitchDetector {
    pub fn new(config: MpmConfig) -> Self {
        validate_config(&config);
        MpmPitchDetector {
            config,
            nsdf: Vec::new(),
            acf: Vec::new(),
            m_prime: Vec::new(),
            key_maxima: [KeyMaximum::new(); MAX_KEY_MAXIMA_COUNT],
            key_max_count: 0,
            prepared: false,
        }
    }

    pub fn config(&self) -> &MpmConfig {
        &self.config
    }

    /// Makes sure the scratch buffers hold at least `lag_count` values.
    /// Returns false once the buffers have been frozen at a smaller size
    /// by `prepare`.
    fn ensure_scratch(&mut self, lag_count: usize) -> bool {
        if lag_count <= self.nsdf.len() {
            return true;
        }
        if self.prepared {
            return false;
        }
        self.nsdf.resize(lag_count, 0.0);
        self.acf.resize(lag_count, 0.0);
        self.m_prime.resize(lag_count, 0.0);
        true
    }

    /// Computes the NSDF `n(tau) = 2 * acf(tau) / m'(tau)` from the
    /// frame.
    fn compute_nsdf(&mut self, frame: &[f32], lag_count: usize) {
        let acf = &mut self.acf[..lag_count];
        for (tau, value) in acf.iter_mut().enumerate() {
            let mut sum = 0.0_f32;
            for j in 0..lag_count {
                sum += frame[j] * frame[j + tau];
            }
            *value = sum;
        }

        m_prime_incremental(frame, &mut self.m_prime[..lag_count]);

        let nsdf = &mut self.nsdf[..lag_count];
        for tau in 0..lag_count {
            let denominator = self.m_prime[tau];
            nsdf[tau] = if denominator > 0.0 {
                2.0 * self.acf[tau] / denominator
            } else {
                0.0
            };
        }
    }

    /// Walks the NSDF once, collecting the local maximum between each
    /// pair of consecutive positive-going zero crossings. A maximum is
    /// retained when its value reaches the threshold and its lag falls
    /// inside the configured frequency band.
    fn gather_key_maxima(&mut self, lag_count: usize, min_tau: usize, max_tau: usize) {
        self.key_max_count = 0;
        let nsdf = &self.nsdf[..lag_count];

        let mut in_region = false;
        let mut maximum_value: f32 = 0.0;
        let mut maximum_index: usize = 0;

        for i in 1..lag_count {
            let current = nsdf[i];
            if nsdf[i - 1] <= 0.0 && current > 0.0 {
                // A positive-going zero crossing closes the previous
                // region and opens a new one. A region left open at the
                // end of the buffer yields no maximum.
                if in_region
                    && maximum_value >= self.config.threshold
                    && (min_tau..=max_tau).contains(&maximum_index)
                    && self.key_max_count < self.key_maxima.len()
                {
                    self.key_maxima[self.key_max_count].set(nsdf, maximum_index);
                    self.key_max_count += 1;
                }
                in_region = true;
                maximum_value = current;
                maximum_index = i;
            } else if in_region && current > maximum_value {
                maximum_value = current;
                maximum_index = i;
            }
        }
    }

    /// Selects the winning key maximum: the first one whose value
    /// reaches `cutoff` times the largest retained value.
    fn select_key_maximum(&self) -> Option<KeyMaximum> {
        if self.key_max_count == 0 {
            return None;
        }

        let mut largest: f32 = 0.0;
        for key_max in self.key_maxima.iter().take(self.key_max_count) {
            if key_max.value_at_lag_index > largest {
                largest = key_max.value_at_lag_index;
            }
        }

        let selection_threshold = self.config.cutoff * largest;
        self.key_maxima
            .iter()
            .take(self.key_max_count)
            .find(|key_max| key_max.value_at_lag_index >= selection_threshold)
            .copied()
    }
}

impl Default for MpmPitchDetector {
    fn default() -> Self {
        MpmPitchDetector::new(MpmConfig::default())
    }
}

impl PitchDetector for MpmPitchDetector {
    fn detect(&mut self, frame: &[f32], sample_rate: f32) -> Option<PitchResult> {
        if frame.is_empty() || !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return None;
        }
        if peak_level(frame) == 0.0 {
            return None;
        }

        let min_tau = (sample_rate / self.config.max_frequency) as usize;
        let max_tau = (sample_rate / self.config.min_frequency) as usize;
        let lag_count = frame.len() / 2;
        if max_tau >= lag_count {
            return None;
        }
        if !self.ensure_scratch(lag_count) {
            return None;
        }

        self.compute_nsdf(frame, lag_count);
        self.gather_key_maxima(lag_count, min_tau, max_tau);
        let selected = self.select_key_maximum()?;

        if !(selected.lag > 0.0) {
            return None;
        }
        let frequency = sample_rate / selected.lag;
        if !frequency.is_finite() || frequency <= 0.0 {
            return None;
        }
        let frequency = frequency.clamp(self.config.min_frequency, self.config.max_frequency);

        // The confidence is the NSDF value at the selected peak, clamped
        // against numeric overshoot.
        let confidence = selected.value_at_lag_index.min(1.0);
        Some(PitchResult::new(frequency, confidence))
    }

    fn prepare(&mut self, max_frame_size: usize) {
        let lag_count = max_frame_size / 2;
        if lag_count > self.nsdf.len() {
            self.nsdf.resize(lag_count, 0.0);
            self.acf.resize(lag_count, 0.0);
            self.m_prime.resize(lag_count, 0.0);
        }
        self.prepared = true;
    }

    fn reset(&mut self) {
        for value in self.nsdf.iter_mut() {
            *value = 0.0;
        }
        for value in self.acf.iter_mut() {
            *value = 0.0;
        }
        for value in self.m_prime.iter_mut() {
            *value = 0.0;
        }
        self.key_max_count = 0;
    }
}
