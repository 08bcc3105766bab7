/// Graph-specific errors
use thiserror::Error;

/// Result type alias using `GraphError`
pub type Result<T> = std::result::Result<T, GraphError>;

/// Graph error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Gain patch requested for a different band layout than the chain was built with
    #[error("Band mismatch: chain has {built} bands, update has {requested}")]
    BandMismatch {
        /// Number of stages in the built chain
        built: usize,
        /// Number of entries in the requested equalizer
        requested: usize,
    },

    /// Equalizer key is not a positive frequency
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    /// Analyser frame is shorter than the configured band range needs
    #[error("Spectrum frame too short: {len} bins, need {needed}")]
    FrameTooShort {
        /// Bins supplied
        len: usize,
        /// Bins required to cover the highest band
        needed: usize,
    },
}
