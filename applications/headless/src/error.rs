/// Headless player error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeadlessError>;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid session: {0}")]
    Session(String),

    #[error("Playback error: {0}")]
    Playback(#[from] soul_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
