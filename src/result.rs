/// A single pitch estimate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PitchResult {
    /// The estimated fundamental frequency in Hz.
    pub frequency: f32,
    /// How certain the detector is about the estimate, between 0 and 1
    /// (inclusive). The exact meaning depends on the algorithm: the YIN
    /// detector reports one minus the depth of the accepted CMNDF dip,
    /// the MPM detector reports the height of the selected NSDF peak.
    pub confidence: f32,
}

impl PitchResult {
    pub fn new(frequency: f32, confidence: f32) -> Self {
        PitchResult {
            frequency,
            confidence,
        }
    }
}
