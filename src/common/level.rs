//! Signal level measurement.

use micromath::F32Ext;

/// Returns the maximum absolute sample value of `frame`, or 0 for an
/// empty frame. NaN samples never compare greater than the running
/// maximum, so an all-NaN frame also reads as 0.
pub fn peak_level(frame: &[f32]) -> f32 {
    let mut max: f32 = 0.0;
    for sample in frame.iter() {
        let value = F32Ext::abs(*sample);
        if value > max {
            max = value
        }
    }
    max
}
