//! Reconciler tuning

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for `PlaybackReconciler`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    /// Forward position jumps up to this many seconds are treated as
    /// playback progress and do not seek
    #[serde(default = "default_seek_threshold_secs")]
    pub seek_threshold_secs: f64,

    /// Period of the visualization sampling tick
    #[serde(default = "default_sampling_interval_ms")]
    pub sampling_interval_ms: u64,

    /// Checkpoint step for spectrum aggregation, in Hz
    #[serde(default = "default_sampling_step_hz")]
    pub sampling_step_hz: f32,

    /// Analyser transform size
    #[serde(default = "default_analyser_fft_size")]
    pub analyser_fft_size: usize,
}

impl PlayerSettings {
    /// Sampling tick period
    pub fn sampling_interval(&self) -> Duration {
        Duration::from_millis(self.sampling_interval_ms)
    }

    /// Bins per analyser frame
    pub fn frequency_bin_count(&self) -> usize {
        self.analyser_fft_size / 2
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.seek_threshold_secs.is_nan() || self.seek_threshold_secs < 0.0 {
            return Err(PlaybackError::Config(format!(
                "seek_threshold_secs must be >= 0, got {}",
                self.seek_threshold_secs
            )));
        }

        if self.sampling_interval_ms == 0 {
            return Err(PlaybackError::Config(
                "sampling_interval_ms must be > 0".to_string(),
            ));
        }

        if self.sampling_step_hz.is_nan() || self.sampling_step_hz <= 0.0 {
            return Err(PlaybackError::Config(format!(
                "sampling_step_hz must be > 0, got {}",
                self.sampling_step_hz
            )));
        }

        if !self.analyser_fft_size.is_power_of_two() || self.analyser_fft_size < 32 {
            return Err(PlaybackError::Config(format!(
                "analyser_fft_size must be a power of two >= 32, got {}",
                self.analyser_fft_size
            )));
        }

        Ok(())
    }
}

// Default values
fn default_seek_threshold_secs() -> f64 {
    1.0
}

fn default_sampling_interval_ms() -> u64 {
    16
}

fn default_sampling_step_hz() -> f32 {
    soul_graph::SAMPLING_STEP_HZ
}

fn default_analyser_fft_size() -> usize {
    soul_graph::ANALYSER_FFT_SIZE
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            seek_threshold_secs: default_seek_threshold_secs(),
            sampling_interval_ms: default_sampling_interval_ms(),
            sampling_step_hz: default_sampling_step_hz(),
            analyser_fft_size: default_analyser_fft_size(),
        }
    }
}
