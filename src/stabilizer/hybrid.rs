use crate::result::PitchResult;
use crate::stabilizer::median::{MedianConfig, MedianStabilizer};
use crate::stabilizer::PitchStabilizer;

/// Configuration for the hybrid stabilizer.
#[derive(Copy, Clone, Debug)]
pub struct HybridStabilizerConfig {
    /// Base smoothing factor in [0, 1]. The effective factor scales with
    /// the confidence of the median output, up to twice the base.
    pub base_alpha: f32,
    /// Window size of the median stage.
    pub window_size: usize,
}

impl Default for HybridStabilizerConfig {
    fn default() -> Self {
        HybridStabilizerConfig {
            base_alpha: 0.3,
            window_size: 5,
        }
    }
}

/// Two-stage stabilizer: a median filter rejects spikes, then an
/// exponential stage smooths the median output with a
/// confidence-adaptive factor `alpha = clamp(base_alpha * (1 +
/// confidence), 0, 1)`, so confident frames are tracked faster than
/// uncertain ones.
pub struct HybridStabilizer {
    base_alpha: f32,
    median: MedianStabilizer,
    ema: PitchResult,
    initialized: bool,
}

impl HybridStabilizer {
    pub fn new(config: HybridStabilizerConfig) -> Self {
        if !(config.base_alpha >= 0.0 && config.base_alpha <= 1.0) {
            panic!("Base alpha must be in [0, 1]");
        }
        HybridStabilizer {
            base_alpha: config.base_alpha,
            median: MedianStabilizer::new(MedianConfig {
                window_size: config.window_size,
            }),
            ema: PitchResult::default(),
            initialized: false,
        }
    }

    fn adaptive_alpha(&self, confidence: f32) -> f32 {
        (self.base_alpha * (1.0 + confidence)).clamp(0.0, 1.0)
    }
}

impl Default for HybridStabilizer {
    fn default() -> Self {
        HybridStabilizer::new(HybridStabilizerConfig::default())
    }
}

impl PitchStabilizer for HybridStabilizer {
    fn update(&mut self, result: PitchResult) {
        // Stage 1: median filtering for spike rejection.
        self.median.update(result);
        let filtered = self.median.stabilized();

        // Stage 2: confidence-adaptive exponential smoothing of the
        // median output.
        if !self.initialized {
            self.ema = filtered;
            self.initialized = true;
            return;
        }

        let alpha = self.adaptive_alpha(filtered.confidence);
        self.ema.frequency = alpha * filtered.frequency + (1.0 - alpha) * self.ema.frequency;
        self.ema.confidence = alpha * filtered.confidence + (1.0 - alpha) * self.ema.confidence;
    }

    fn stabilized(&self) -> PitchResult {
        self.ema
    }

    fn reset(&mut self) {
        self.median.reset();
        self.ema = PitchResult::default();
        self.initialized = false;
    }
}
