//! Error types for motion configuration and bridging.

use thiserror::Error;

/// Result type for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors that can occur while loading or bridging choreography.
///
/// The choreography itself never fails: missing targets are skipped and
/// unknown names fall back to defaults. Only configuration and the JSON
/// boundary can produce these.
#[derive(Debug, Error)]
pub enum MotionError {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration or frame serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
