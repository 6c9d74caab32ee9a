//! A time domain pitch detector based on the YIN algorithm, described in
//! the paper [YIN, a fundamental frequency estimator for speech and music](http://audition.ens.fr/adc/pdf/2002_JASA_YIN.pdf)
//! by Alain de Cheveigné and Hideki Kawahara. YIN compares a frame to
//! lagged copies of itself and accepts the shortest lag whose normalized
//! difference drops below a threshold, which makes it fast and reliable
//! for stable monophonic tones.
//!
//! # Example
//! ```
//! use guitar_pitch::yin::{YinConfig, YinPitchDetector};
//! use guitar_pitch::PitchDetector;
//!
//! let sample_rate = 48000.0;
//! let frequency = 440.0;
//! let frame: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = YinPitchDetector::new(YinConfig::default());
//! let result = detector.detect(&frame, sample_rate).unwrap();
//! assert!((result.frequency - frequency).abs() <= 0.5);
//! assert!(result.confidence >= 0.85);
//! ```

mod detector;

pub use detector::{YinConfig, YinPitchDetector};
