//! Real-time monophonic pitch analysis for guitar.
//!
//! This crate estimates the fundamental frequency of a mono audio signal
//! frame by frame and turns the raw per-frame estimates into a smooth,
//! musically usable pitch track. It is built to run inside an audio
//! callback: scratch memory is allocated up front, the hot path never
//! allocates or blocks, and per-frame work is bounded.
//!
//! Three detectors are provided:
//! * [`yin::YinPitchDetector`]: the YIN time-domain algorithm.
//! * [`mpm::MpmPitchDetector`]: the McLeod pitch method (NSDF).
//! * [`hybrid::HybridPitchDetector`]: YIN with an MPM fallback plus
//!   octave-error correction, tuned for guitar.
//!
//! Detector output is an `Option<PitchResult>`; temporal smoothing is done
//! by the [`stabilizer`] family (exponential, median, or a
//! confidence-adaptive combination of both).
//!
//! # Example
//! ```
//! use guitar_pitch::hybrid::HybridPitchDetector;
//! use guitar_pitch::stabilizer::{HybridStabilizer, HybridStabilizerConfig, PitchStabilizer};
//! use guitar_pitch::common::note::frequency_to_note;
//! use guitar_pitch::PitchDetector;
//!
//! let sample_rate = 48000.0;
//! let frame_size = 2048;
//!
//! // A pure tone at concert A.
//! let frame: Vec<f32> = (0..frame_size)
//!     .map(|i| (2.0 * core::f32::consts::PI * 440.0 * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let mut detector = HybridPitchDetector::default();
//! detector.prepare(frame_size);
//!
//! let mut stabilizer = HybridStabilizer::new(HybridStabilizerConfig {
//!     base_alpha: 0.4,
//!     window_size: 5,
//! });
//!
//! let result = detector.detect(&frame, sample_rate).unwrap();
//! assert!((result.frequency - 440.0).abs() < 1.0);
//!
//! stabilizer.update(result);
//! let smoothed = stabilizer.stabilized();
//! let note = frequency_to_note(smoothed.frequency, 440.0).unwrap();
//! assert_eq!(note.name, "A");
//! assert_eq!(note.octave, 4);
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod common;
pub mod hybrid;
pub mod mpm;
pub mod stabilizer;
pub mod yin;

mod detector;
mod result;

pub use detector::PitchDetector;
pub use result::PitchResult;
