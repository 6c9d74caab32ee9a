//! A pitch detector combining YIN and MPM, tuned for guitar.
//!
//! YIN runs first on every frame. When its confidence clears a
//! configurable bar the estimate is used directly; otherwise the MPM
//! detector gets the frame, and a low-confidence YIN estimate is kept as
//! a last resort when MPM finds nothing. A harmonic rejection stage then
//! corrects octave errors: an estimate that reads as the 2nd, 3rd or 4th
//! harmonic of the currently tracked fundamental is collapsed back into
//! the guitar fundamental band.
//!
//! # Example
//! ```
//! use guitar_pitch::hybrid::HybridPitchDetector;
//! use guitar_pitch::PitchDetector;
//!
//! let sample_rate = 48000.0;
//! let low_e = 82.4;
//! let frame: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * core::f32::consts::PI * low_e * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = HybridPitchDetector::default();
//! let result = detector.detect(&frame, sample_rate).unwrap();
//! assert!((result.frequency - low_e).abs() <= 0.4);
//! ```

mod detector;

pub use detector::{HybridConfig, HybridPitchDetector};
