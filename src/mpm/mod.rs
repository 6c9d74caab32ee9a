//! A pitch detector based on the MPM algorithm, described in the paper
//! [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill. The algorithm locates maxima of the
//! normalized square difference function (NSDF) of a frame and is robust
//! against vibrato and changing pitch. It detects a single fundamental
//! frequency and cannot resolve chords.
//!
//! # Example
//! ```
//! use guitar_pitch::mpm::{MpmConfig, MpmPitchDetector};
//! use guitar_pitch::PitchDetector;
//!
//! let sample_rate = 48000.0;
//! let frequency = 220.0;
//! let frame: Vec<f32> = (0..2048)
//!     .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = MpmPitchDetector::new(MpmConfig::default());
//! let result = detector.detect(&frame, sample_rate).unwrap();
//! assert!((result.frequency - frequency).abs() <= 0.5);
//! ```

mod detector;
mod key_maximum;
mod util;

pub use detector::{MpmConfig, MpmPitchDetector, MAX_KEY_MAXIMA_COUNT};
pub use key_maximum::KeyMaximum;
