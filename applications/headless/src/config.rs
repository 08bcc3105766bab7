/// Headless player configuration
use crate::error::{HeadlessError, Result};
use serde::{Deserialize, Serialize};
use soul_playback::PlayerSettings;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "soul-headless.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeadlessConfig {
    /// Session script to replay when none is given on the command line
    #[serde(default)]
    pub session: Option<PathBuf>,

    #[serde(default)]
    pub player: PlayerSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length of every simulated media source
    #[serde(default = "default_track_duration_secs")]
    pub track_duration_secs: f64,

    /// Period of transport time updates
    #[serde(default = "default_time_update_ms")]
    pub time_update_ms: u64,

    /// How long to keep running after the last session step
    #[serde(default = "default_linger_ms")]
    pub linger_ms: u64,
}

impl SimulationSettings {
    pub fn time_update_interval(&self) -> Duration {
        Duration::from_millis(self.time_update_ms)
    }

    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

impl HeadlessConfig {
    /// Load configuration from file and environment
    ///
    /// Environment keys use a double underscore between sections, e.g.
    /// `SOUL_PLAYER__SEEK_THRESHOLD_SECS=2.5`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with SOUL_)
        settings = settings.add_source(
            config::Environment::with_prefix("SOUL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| HeadlessError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| HeadlessError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.player
            .validate()
            .map_err(|e| HeadlessError::Config(e.to_string()))?;

        let duration = self.simulation.track_duration_secs;
        if duration.is_nan() || duration <= 0.0 {
            return Err(HeadlessError::Config(format!(
                "simulation.track_duration_secs must be > 0, got {}",
                duration
            )));
        }

        if self.simulation.time_update_ms == 0 {
            return Err(HeadlessError::Config(
                "simulation.time_update_ms must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        track_duration_secs: default_track_duration_secs(),
        time_update_ms: default_time_update_ms(),
        linger_ms: default_linger_ms(),
    }
}

fn default_track_duration_secs() -> f64 {
    180.0
}

fn default_time_update_ms() -> u64 {
    250
}

fn default_linger_ms() -> u64 {
    1000
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            session: None,
            player: PlayerSettings::default(),
            simulation: default_simulation(),
        }
    }
}
