//! Temporal smoothing of pitch estimates.
//!
//! Raw per-frame estimates jitter and occasionally spike by an octave.
//! The stabilizers turn them into a track that is usable for display and
//! tuning feedback:
//!
//! * [`EmaStabilizer`]: plain exponential smoothing. Cheap and smooth,
//!   but spikes leak into the output.
//! * [`MedianStabilizer`]: a sliding window median. Rejects isolated
//!   spikes completely at the cost of some latency.
//! * [`HybridStabilizer`]: a median stage feeding an exponential stage
//!   whose smoothing factor scales with confidence, so confident input
//!   is tracked quickly while uncertain input is smoothed harder.
//!
//! All stabilizers keep their state inline and never allocate.
//!
//! # Example
//! ```
//! use guitar_pitch::stabilizer::{MedianConfig, MedianStabilizer, PitchStabilizer};
//! use guitar_pitch::PitchResult;
//!
//! let mut stabilizer = MedianStabilizer::new(MedianConfig { window_size: 5 });
//! for frequency in [440.0_f32, 440.0, 880.0, 440.0, 440.0] {
//!     stabilizer.update(PitchResult::new(frequency, 0.9));
//! }
//! // The octave spike is rejected.
//! assert_eq!(stabilizer.stabilized().frequency, 440.0);
//! ```

mod ema;
mod hybrid;
mod median;

pub use ema::{EmaConfig, EmaStabilizer};
pub use hybrid::{HybridStabilizer, HybridStabilizerConfig};
pub use median::{MedianConfig, MedianStabilizer, MAX_MEDIAN_WINDOW};

use crate::result::PitchResult;

/// Common capabilities of the pitch stabilizers.
///
/// Stabilizers are order-sensitive: feed them one estimate per frame, in
/// frame order, from a single caller.
pub trait PitchStabilizer {
    /// Feeds one raw estimate into the filter.
    fn update(&mut self, result: PitchResult);

    /// Returns the current smoothed estimate. Before the first update
    /// this is the zero result.
    fn stabilized(&self) -> PitchResult;

    /// Returns the filter to its initial state.
    fn reset(&mut self);
}
