use crate::result::PitchResult;
use crate::stabilizer::PitchStabilizer;

/// Configuration for the exponential moving average stabilizer.
#[derive(Copy, Clone, Debug)]
pub struct EmaConfig {
    /// Smoothing factor in [0, 1]. 1 follows the input exactly, 0 holds
    /// the first sample forever.
    pub alpha: f32,
}

impl Default for EmaConfig {
    fn default() -> Self {
        EmaConfig { alpha: 0.3 }
    }
}

/// One-pole exponential smoothing of frequency and confidence:
/// `y = alpha * x + (1 - alpha) * y`. The first update after
/// construction or a reset stores the input verbatim.
pub struct EmaStabilizer {
    config: EmaConfig,
    stabilized: PitchResult,
    initialized: bool,
}

impl EmaStabilizer {
    pub fn new(config: EmaConfig) -> Self {
        if !(config.alpha >= 0.0 && config.alpha <= 1.0) {
            panic!("Alpha must be in [0, 1]");
        }
        EmaStabilizer {
            config,
            stabilized: PitchResult::default(),
            initialized: false,
        }
    }
}

impl Default for EmaStabilizer {
    fn default() -> Self {
        EmaStabilizer::new(EmaConfig::default())
    }
}

impl PitchStabilizer for EmaStabilizer {
    fn update(&mut self, result: PitchResult) {
        if !self.initialized {
            self.stabilized = result;
            self.initialized = true;
            return;
        }

        let alpha = self.config.alpha;
        self.stabilized.frequency =
            alpha * result.frequency + (1.0 - alpha) * self.stabilized.frequency;
        self.stabilized.confidence =
            alpha * result.confidence + (1.0 - alpha) * self.stabilized.confidence;
    }

    fn stabilized(&self) -> PitchResult {
        self.stabilized
    }

    fn reset(&mut self) {
        self.stabilized = PitchResult::default();
        self.initialized = false;
    }
}
