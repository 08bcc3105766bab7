//! Declarative player configuration
//!
//! `PlayerProps` is the full set of values the host controls. The reconciler
//! diffs successive props and applies only what changed.

use serde::{Deserialize, Serialize};
use soul_graph::EqualizerSpec;

/// Requested transport status
///
/// Deserializes from `"PLAYING"`, `"PAUSED"` or `"STOPPED"`. Anything else
/// is treated as `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum PlayStatus {
    /// Playing audio
    #[default]
    Playing,

    /// Paused mid-track
    Paused,

    /// Paused and rewound to the start
    Stopped,
}

impl PlayStatus {
    /// Parse a host status string, defaulting to `Playing`
    pub fn parse(value: &str) -> Self {
        match value {
            "PAUSED" => Self::Paused,
            "STOPPED" => Self::Stopped,
            _ => Self::Playing,
        }
    }
}

impl From<String> for PlayStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// Configuration supplied by the host on every update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProps {
    /// Media location handed to the transport
    #[serde(default)]
    pub url: Option<String>,

    /// Requested transport status
    #[serde(default)]
    pub play_status: PlayStatus,

    /// Playback position in seconds
    #[serde(default)]
    pub position: Option<f64>,

    /// Volume (0-100)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Equalizer bands; empty means no equalizer
    #[serde(default)]
    pub equalizer: EqualizerSpec,

    /// Gain offset applied to every equalizer stage, in dB
    #[serde(default)]
    pub pre_amp: f32,

    /// Stereo pan (-1.0 to 1.0)
    #[serde(default)]
    pub stereo_pan: f32,

    /// Whether the host has a visualization handler attached
    #[serde(default)]
    pub visualization: bool,
}

fn default_volume() -> f32 {
    100.0
}

impl Default for PlayerProps {
    fn default() -> Self {
        Self {
            url: None,
            play_status: PlayStatus::Playing,
            position: None,
            volume: default_volume(),
            equalizer: EqualizerSpec::new(),
            pre_amp: 0.0,
            stereo_pan: 0.0,
            visualization: false,
        }
    }
}

impl PlayerProps {
    /// Volume clamped to 0-100
    pub fn clamped_volume(&self) -> f32 {
        clamp_or(self.volume, 0.0, 100.0, default_volume())
    }

    /// Linear gain for the volume stage
    pub fn volume_gain(&self) -> f32 {
        self.clamped_volume() / 100.0
    }

    /// Pan clamped to -1.0..=1.0
    pub fn clamped_pan(&self) -> f32 {
        clamp_or(self.stereo_pan, -1.0, 1.0, 0.0)
    }

    /// Whether visualization frames should be produced
    pub fn wants_visualization(&self) -> bool {
        self.visualization && !self.equalizer.is_empty()
    }
}

/// Clamp, replacing NaN with `fallback`
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Transport state tracked by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportState {
    /// Current status
    pub status: PlayStatus,

    /// Volume (0-100)
    pub volume: f32,

    /// Last known position in seconds
    pub position: f64,

    /// Stereo pan (-1.0 to 1.0)
    pub stereo_pan: f32,
}

impl TransportState {
    /// Initial state for a set of props
    pub fn from_props(props: &PlayerProps) -> Self {
        Self {
            status: props.play_status,
            volume: props.clamped_volume(),
            position: props.position.unwrap_or(0.0).max(0.0),
            stereo_pan: props.clamped_pan(),
        }
    }
}
