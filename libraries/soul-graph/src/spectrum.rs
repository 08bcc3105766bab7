//! Spectrum aggregation for equalizer visualization
//!
//! Maps a linear-bin analyser frame back onto the configured equalizer
//! bands with a checkpoint scan: synthetic frequencies `k * step` are
//! walked upward and the first checkpoint strictly inside
//! `(band, band + step)` supplies that band's value (bin `k`).
//!
//! Bands must be ascending. If two bands share a window the scan never
//! reaches the second one's window again and every band from there on is
//! dropped, so the output can be shorter than the band list.

use crate::error::{GraphError, Result};

/// Frequency resolution of one analyser bin, in Hz
pub const SAMPLING_STEP_HZ: f32 = 23.4;

/// Analyser transform size
pub const ANALYSER_FFT_SIZE: usize = 32768;

/// Bins per analyser frame
pub const FREQUENCY_BIN_COUNT: usize = ANALYSER_FFT_SIZE / 2;

/// Aggregates analyser frames onto a fixed band list
#[derive(Debug, Clone)]
pub struct SpectrumAggregator {
    step: f32,
    frequencies: Vec<f32>,
}

impl SpectrumAggregator {
    /// Create an aggregator for `frequencies` (ascending) at the default step
    pub fn new(frequencies: Vec<f32>) -> Self {
        Self::with_step(SAMPLING_STEP_HZ, frequencies)
    }

    /// Create an aggregator with a custom checkpoint step
    pub fn with_step(step: f32, frequencies: Vec<f32>) -> Self {
        Self { step, frequencies }
    }

    /// Configured band frequencies
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// Checkpoint step in Hz
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Number of bins a frame needs to reach the highest band
    pub fn required_bins(&self) -> usize {
        let max = self.frequencies.iter().copied().fold(0.0f32, f32::max);
        if self.step <= 0.0 {
            return 0;
        }
        ((max + self.step) / self.step).ceil() as usize
    }

    /// Check that frames of `len` bins cover every band
    pub fn check_frame_len(&self, len: usize) -> Result<()> {
        let needed = self.required_bins();
        if len < needed {
            return Err(GraphError::FrameTooShort { len, needed });
        }
        Ok(())
    }

    /// Reduce one frame to at most one value per band, in band order
    pub fn aggregate(&self, frame: &[f32]) -> Vec<f32> {
        let mut values = Vec::with_capacity(self.frequencies.len());
        if self.frequencies.is_empty() || self.step <= 0.0 {
            return values;
        }

        let max = self.frequencies.iter().copied().fold(0.0f32, f32::max);
        let limit = max + self.step;
        let mut cursor = 0;

        for k in 0.. {
            let checkpoint = k as f32 * self.step;
            if checkpoint >= limit || cursor >= self.frequencies.len() {
                break;
            }

            let band = self.frequencies[cursor];
            if checkpoint > band && checkpoint < band + self.step {
                let Some(value) = frame.get(k) else {
                    break;
                };
                values.push(*value);
                cursor += 1;
            }
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32).collect()
    }

    #[test]
    fn four_band_layout_picks_expected_bins() {
        let aggregator = SpectrumAggregator::new(vec![60.0, 310.0, 3000.0, 14000.0]);
        let values = aggregator.aggregate(&ramp(FREQUENCY_BIN_COUNT));

        // Bin k is the first checkpoint k * 23.4 above each band
        assert_eq!(values, vec![3.0, 14.0, 129.0, 599.0]);
    }

    #[test]
    fn output_preserves_ascending_order() {
        let aggregator = SpectrumAggregator::new(vec![60.0, 310.0, 3000.0, 14000.0]);
        let values = aggregator.aggregate(&ramp(FREQUENCY_BIN_COUNT));

        assert!(values.len() <= 4);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bands_in_same_window_drop_the_rest() {
        // 100 and 105 share the window of checkpoint 117
        let aggregator = SpectrumAggregator::new(vec![100.0, 105.0, 1000.0]);
        let values = aggregator.aggregate(&ramp(FREQUENCY_BIN_COUNT));

        assert_eq!(values, vec![5.0]);
    }

    #[test]
    fn empty_bands_yield_empty_output() {
        let aggregator = SpectrumAggregator::new(Vec::new());
        assert!(aggregator.aggregate(&ramp(16)).is_empty());
    }

    #[test]
    fn short_frame_truncates_output() {
        let aggregator = SpectrumAggregator::new(vec![60.0, 14000.0]);
        let values = aggregator.aggregate(&ramp(100));

        assert_eq!(values, vec![3.0]);
        assert!(aggregator.check_frame_len(100).is_err());
        assert!(aggregator.check_frame_len(FREQUENCY_BIN_COUNT).is_ok());
    }
}
