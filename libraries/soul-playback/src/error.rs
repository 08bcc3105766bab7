//! Error types for playback reconciliation

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Transport rejected a start request
    #[error("Transport start failed: {0}")]
    TransportStart(String),

    /// Graph operation failed
    #[error("Graph error: {0}")]
    Graph(#[from] soul_graph::GraphError),

    /// Invalid settings or props
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
