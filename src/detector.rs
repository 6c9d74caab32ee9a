use crate::result::PitchResult;

/// Common capabilities of the pitch detection algorithms.
///
/// A detector is owned and driven by a single caller; it keeps mutable
/// scratch state between calls and is not meant to be shared across
/// threads. Use one instance per audio stream.
pub trait PitchDetector {
    /// Analyzes one frame of mono samples and returns a pitch estimate,
    /// or `None` if the frame carries no detectable fundamental (silence,
    /// noise, a frame too short for the configured frequency range, or a
    /// frame larger than the prepared scratch capacity).
    fn detect(&mut self, frame: &[f32], sample_rate: f32) -> Option<PitchResult>;

    /// Grows the internal scratch buffers to handle frames of up to
    /// `max_frame_size` samples and freezes them at that size. After this
    /// call, `detect` never allocates; larger frames are rejected instead
    /// of growing the buffers.
    fn prepare(&mut self, max_frame_size: usize);

    /// Clears internal state. Scratch capacity is kept.
    fn reset(&mut self);
}
