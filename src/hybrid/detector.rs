use micromath::F32Ext;

use crate::detector::PitchDetector;
use crate::mpm::{MpmConfig, MpmPitchDetector};
use crate::result::PitchResult;
use crate::yin::{YinConfig, YinPitchDetector};

/// Guitar fundamentals fall in this band; harmonic correction only maps
/// estimates down into it.
const FUNDAMENTAL_MIN_HZ: f32 = 80.0;
const FUNDAMENTAL_MAX_HZ: f32 = 400.0;

/// Harmonic factors checked during octave correction, nearest octave
/// first.
const HARMONIC_FACTORS: [f32; 3] = [2.0, 3.0, 4.0];

/// Smaller corrections than this leave the result untouched.
const CORRECTION_EPSILON_HZ: f32 = 0.1;

/// Configuration for the hybrid detector.
#[derive(Copy, Clone, Debug)]
pub struct HybridConfig {
    /// A YIN estimate at or above this confidence is used without
    /// consulting MPM.
    pub yin_confidence_threshold: f32,
    /// Enables the harmonic rejection stage.
    pub enable_harmonic_rejection: bool,
    /// Relative tolerance when matching an estimate against a harmonic
    /// of the tracked fundamental (0.05 = 5%).
    pub harmonic_tolerance: f32,
    /// Configuration of the inner YIN detector.
    pub yin: YinConfig,
    /// Configuration of the inner MPM detector.
    pub mpm: MpmConfig,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            yin_confidence_threshold: 0.8,
            enable_harmonic_rejection: true,
            harmonic_tolerance: 0.05,
            // The YIN stage runs with a lower threshold than it would
            // standalone, which helps locking onto the low E string.
            yin: YinConfig {
                threshold: 0.10,
                min_frequency: 80.0,
                max_frequency: 1200.0,
            },
            mpm: MpmConfig::default(),
        }
    }
}

fn validate_config(config: &HybridConfig) {
    if !(config.yin_confidence_threshold >= 0.0 && config.yin_confidence_threshold <= 1.0) {
        panic!("YIN confidence threshold must be in [0, 1]");
    }
    if !(config.harmonic_tolerance >= 0.0) {
        panic!("Harmonic tolerance must not be negative");
    }
}

/// Pitch detector arbitrating between an owned YIN and an owned MPM
/// instance, with octave-error correction against the tracked
/// fundamental.
pub struct HybridPitchDetector {
    config: HybridConfig,
    yin: YinPitchDetector,
    mpm: MpmPitchDetector,
    /// Number of frames answered by the YIN stage.
    yin_used: usize,
    /// Number of frames answered by the MPM stage.
    mpm_used: usize,
    /// The most recently accepted fundamental, the anchor for harmonic
    /// rejection.
    last_fundamental: Option<f32>,
}

impl HybridPitchDetector {
    pub fn new(config: HybridConfig) -> Self {
        validate_config(&config);
        HybridPitchDetector {
            yin: YinPitchDetector::new(config.yin),
            mpm: MpmPitchDetector::new(config.mpm),
            config,
            yin_used: 0,
            mpm_used: 0,
            last_fundamental: None,
        }
    }

    pub fn config(&self) -> &HybridConfig {
        &self.config
    }

    /// Number of frames answered by the YIN stage since construction or
    /// the last reset.
    pub fn yin_used(&self) -> usize {
        self.yin_used
    }

    /// Number of frames answered by the MPM stage since construction or
    /// the last reset.
    pub fn mpm_used(&self) -> usize {
        self.mpm_used
    }

    /// Maps a frequency that reads as the 2nd, 3rd or 4th harmonic of
    /// the tracked fundamental back down into the fundamental band.
    /// Without a tracked fundamental the frequency passes through
    /// unchanged.
    fn correct_harmonic(&self, frequency: f32) -> f32 {
        let fundamental = match self.last_fundamental {
            Some(fundamental) => fundamental,
            None => return frequency,
        };

        for factor in HARMONIC_FACTORS.iter() {
            let candidate = frequency / factor;
            if !(FUNDAMENTAL_MIN_HZ..=FUNDAMENTAL_MAX_HZ).contains(&candidate) {
                continue;
            }
            let expected = factor * fundamental;
            let tolerance = self.config.harmonic_tolerance * expected;
            if F32Ext::abs(frequency - expected) <= tolerance {
                return candidate;
            }
        }

        frequency
    }
}

impl Default for HybridPitchDetector {
    fn default() -> Self {
        HybridPitchDetector::new(HybridConfig::default())
    }
}

impl PitchDetector for HybridPitchDetector {
    fn detect(&mut self, frame: &[f32], sample_rate: f32) -> Option<PitchResult> {
        if frame.is_empty() || !(sample_rate > 0.0) || !sample_rate.is_finite() {
            return None;
        }

        let yin_result = self.yin.detect(frame, sample_rate);

        let mut selected = match yin_result {
            Some(result) if result.confidence >= self.config.yin_confidence_threshold => {
                self.yin_used += 1;
                Some(result)
            }
            _ => match self.mpm.detect(frame, sample_rate) {
                Some(result) => {
                    self.mpm_used += 1;
                    Some(result)
                }
                None => {
                    // A low-confidence YIN estimate is still better than
                    // reporting nothing.
                    if yin_result.is_some() {
                        self.yin_used += 1;
                    }
                    yin_result
                }
            },
        };

        if let Some(result) = selected.as_mut() {
            if self.config.enable_harmonic_rejection {
                let corrected = self.correct_harmonic(result.frequency);
                if F32Ext::abs(corrected - result.frequency) > CORRECTION_EPSILON_HZ {
                    result.frequency = corrected;
                }
            }
            self.last_fundamental = Some(result.frequency);
        }

        selected
    }

    fn prepare(&mut self, max_frame_size: usize) {
        self.yin.prepare(max_frame_size);
        self.mpm.prepare(max_frame_size);
    }

    fn reset(&mut self) {
        self.yin.reset();
        self.mpm.reset();
        self.yin_used = 0;
        self.mpm_used = 0;
        self.last_fundamental = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(sample_rate: f32, frequency: f32, sample_count: usize) -> Vec<f32> {
        let mut frame: Vec<f32> = vec![0.0; sample_count];
        for (i, sample) in frame.iter_mut().enumerate() {
            *sample = (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin();
        }
        frame
    }

    #[test]
    fn test_low_e_detection() {
        let sample_rate = 48000.0;
        let frame = generate_sine(sample_rate, 82.4, 2048);
        let mut detector = HybridPitchDetector::default();

        let result = detector.detect(&frame, sample_rate).unwrap();
        assert!(result.frequency >= 82.0 && result.frequency <= 82.8);
    }

    #[test]
    fn test_confident_yin_is_preferred() {
        let sample_rate = 48000.0;
        let frame = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = HybridPitchDetector::default();

        let result = detector.detect(&frame, sample_rate).unwrap();
        assert!((result.frequency - 440.0).abs() <= 0.5);
        assert_eq!(detector.yin_used(), 1);
        assert_eq!(detector.mpm_used(), 0);
    }

    #[test]
    fn test_falls_back_to_mpm() {
        // With the YIN confidence bar at 1.0 no real signal qualifies,
        // so every frame lands in the MPM stage.
        let sample_rate = 48000.0;
        let frame = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = HybridPitchDetector::new(HybridConfig {
            yin_confidence_threshold: 1.0,
            ..HybridConfig::default()
        });

        let result = detector.detect(&frame, sample_rate).unwrap();
        assert!((result.frequency - 440.0).abs() <= 0.5);
        assert_eq!(detector.yin_used(), 0);
        assert_eq!(detector.mpm_used(), 1);
    }

    #[test]
    fn test_low_confidence_yin_used_when_mpm_fails() {
        // The MPM stage is configured to reject everything below 300 Hz,
        // so the 220 Hz tone is answered by YIN even though its
        // confidence is below the (unreachable) bar.
        let sample_rate = 48000.0;
        let frame = generate_sine(sample_rate, 220.0, 2048);
        let mut detector = HybridPitchDetector::new(HybridConfig {
            yin_confidence_threshold: 1.0,
            mpm: MpmConfig {
                min_frequency: 300.0,
                ..MpmConfig::default()
            },
            ..HybridConfig::default()
        });

        let result = detector.detect(&frame, sample_rate).unwrap();
        assert!((result.frequency - 220.0).abs() <= 0.5);
        assert_eq!(detector.yin_used(), 1);
        assert_eq!(detector.mpm_used(), 0);
    }

    #[test]
    fn test_strong_second_harmonic_resolves_to_fundamental() {
        let sample_rate = 48000.0;
        let mut frame = vec![0.0_f32; 2048];
        for (i, sample) in frame.iter_mut().enumerate() {
            let t = (i as f32) / sample_rate;
            *sample = (2.0 * core::f32::consts::PI * 220.0 * t).sin()
                + 0.8 * (2.0 * core::f32::consts::PI * 440.0 * t).sin();
        }

        let mut detector = HybridPitchDetector::default();
        let result = detector.detect(&frame, sample_rate).unwrap();
        assert!((result.frequency - 220.0).abs() <= 2.0);
    }

    #[test]
    fn test_octave_jump_is_corrected() {
        let sample_rate = 48000.0;
        let fundamental_frame = generate_sine(sample_rate, 220.0, 2048);
        let octave_frame = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = HybridPitchDetector::default();

        // Establish the fundamental over a few frames.
        for _ in 0..3 {
            let result = detector.detect(&fundamental_frame, sample_rate).unwrap();
            assert!((result.frequency - 220.0).abs() <= 0.5);
        }

        // A momentary octave-up reading collapses back onto it.
        let result = detector.detect(&octave_frame, sample_rate).unwrap();
        assert!((result.frequency - 220.0).abs() <= 0.5);
    }

    #[test]
    fn test_steady_fundamental_is_never_halved() {
        let sample_rate = 48000.0;
        let frame = generate_sine(sample_rate, 220.0, 2048);
        let mut detector = HybridPitchDetector::default();

        for _ in 0..5 {
            let result = detector.detect(&frame, sample_rate).unwrap();
            assert!((result.frequency - 220.0).abs() <= 0.5);
        }
    }

    #[test]
    fn test_unrelated_note_change_passes_through() {
        let sample_rate = 48000.0;
        let first = generate_sine(sample_rate, 220.0, 2048);
        let second = generate_sine(sample_rate, 330.0, 2048);
        let mut detector = HybridPitchDetector::default();

        detector.detect(&first, sample_rate).unwrap();
        let result = detector.detect(&second, sample_rate).unwrap();
        assert!((result.frequency - 330.0).abs() <= 0.5);
    }

    #[test]
    fn test_rejection_can_be_disabled() {
        let sample_rate = 48000.0;
        let fundamental_frame = generate_sine(sample_rate, 220.0, 2048);
        let octave_frame = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = HybridPitchDetector::new(HybridConfig {
            enable_harmonic_rejection: false,
            ..HybridConfig::default()
        });

        detector.detect(&fundamental_frame, sample_rate).unwrap();
        let result = detector.detect(&octave_frame, sample_rate).unwrap();
        assert!((result.frequency - 440.0).abs() <= 0.5);
    }

    #[test]
    fn test_confidence_is_not_modified_by_correction() {
        let sample_rate = 48000.0;
        let fundamental_frame = generate_sine(sample_rate, 220.0, 2048);
        let octave_frame = generate_sine(sample_rate, 440.0, 2048);

        let mut corrected = HybridPitchDetector::default();
        let mut plain = HybridPitchDetector::new(HybridConfig {
            enable_harmonic_rejection: false,
            ..HybridConfig::default()
        });

        corrected.detect(&fundamental_frame, sample_rate).unwrap();
        plain.detect(&fundamental_frame, sample_rate).unwrap();

        let with_correction = corrected.detect(&octave_frame, sample_rate).unwrap();
        let without_correction = plain.detect(&octave_frame, sample_rate).unwrap();
        assert_eq!(with_correction.confidence, without_correction.confidence);
        assert!(with_correction.frequency < without_correction.frequency);
    }

    #[test]
    fn test_silence() {
        let frame = vec![0.0_f32; 2048];
        let mut detector = HybridPitchDetector::default();
        assert!(detector.detect(&frame, 48000.0).is_none());
        assert_eq!(detector.yin_used(), 0);
        assert_eq!(detector.mpm_used(), 0);
    }

    #[test]
    fn test_degenerate_input() {
        let frame = generate_sine(48000.0, 440.0, 2048);
        let mut detector = HybridPitchDetector::default();
        assert!(detector.detect(&[], 48000.0).is_none());
        assert!(detector.detect(&frame, 0.0).is_none());
        assert!(detector.detect(&frame, f32::NAN).is_none());
    }

    #[test]
    fn test_reset_clears_tracking_state() {
        let sample_rate = 48000.0;
        let fundamental_frame = generate_sine(sample_rate, 220.0, 2048);
        let octave_frame = generate_sine(sample_rate, 440.0, 2048);
        let mut detector = HybridPitchDetector::default();

        detector.detect(&fundamental_frame, sample_rate).unwrap();
        detector.reset();
        assert_eq!(detector.yin_used(), 0);
        assert_eq!(detector.mpm_used(), 0);

        // Without a tracked fundamental the octave frame reads as 440.
        let result = detector.detect(&octave_frame, sample_rate).unwrap();
        assert!((result.frequency - 440.0).abs() <= 0.5);
    }

    #[test]
    #[should_panic]
    fn test_invalid_confidence_threshold() {
        HybridPitchDetector::new(HybridConfig {
            yin_confidence_threshold: 1.5,
            ..HybridConfig::default()
        });
    }
}
