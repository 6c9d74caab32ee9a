use crate::result::PitchResult;
use crate::stabilizer::PitchStabilizer;

/// The largest supported median window.
pub const MAX_MEDIAN_WINDOW: usize = 16;

/// Configuration for the median stabilizer.
#[derive(Copy, Clone, Debug)]
pub struct MedianConfig {
    /// Number of past estimates the median is computed over, between 1
    /// and [`MAX_MEDIAN_WINDOW`]. Odd sizes give a true order statistic.
    pub window_size: usize,
}

impl Default for MedianConfig {
    fn default() -> Self {
        MedianConfig { window_size: 5 }
    }
}

/// Sliding window median of frequency and confidence, computed
/// independently per field. A circular buffer holds the most recent
/// estimates; until the window fills, the median runs over the samples
/// seen so far.
pub struct MedianStabilizer {
    window: [PitchResult; MAX_MEDIAN_WINDOW],
    window_size: usize,
    write_index: usize,
    sample_count: usize,
}

impl MedianStabilizer {
    pub fn new(config: MedianConfig) -> Self {
        if config.window_size == 0 || config.window_size > MAX_MEDIAN_WINDOW {
            panic!("Window size must be between 1 and {}", MAX_MEDIAN_WINDOW);
        }
        MedianStabilizer {
            window: [PitchResult::default(); MAX_MEDIAN_WINDOW],
            window_size: config.window_size,
            write_index: 0,
            sample_count: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

impl Default for MedianStabilizer {
    fn default() -> Self {
        MedianStabilizer::new(MedianConfig::default())
    }
}

impl PitchStabilizer for MedianStabilizer {
    fn update(&mut self, result: PitchResult) {
        self.window[self.write_index] = result;
        self.write_index = (self.write_index + 1) % self.window_size;
        if self.sample_count < self.window_size {
            self.sample_count += 1;
        }
    }

    fn stabilized(&self) -> PitchResult {
        if self.sample_count == 0 {
            return PitchResult::default();
        }

        let mut frequencies = [0.0_f32; MAX_MEDIAN_WINDOW];
        let mut confidences = [0.0_f32; MAX_MEDIAN_WINDOW];
        for i in 0..self.sample_count {
            frequencies[i] = self.window[i].frequency;
            confidences[i] = self.window[i].confidence;
        }

        PitchResult::new(
            median_of(&mut frequencies[..self.sample_count]),
            median_of(&mut confidences[..self.sample_count]),
        )
    }

    fn reset(&mut self) {
        self.window = [PitchResult::default(); MAX_MEDIAN_WINDOW];
        self.write_index = 0;
        self.sample_count = 0;
    }
}

/// Sorts `values` in place and returns the median, averaging the two
/// middle elements for even lengths.
fn median_of(values: &mut [f32]) -> f32 {
    values.sort_unstable_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        0.5 * (values[mid - 1] + values[mid])
    } else {
        values[mid]
    }
}
