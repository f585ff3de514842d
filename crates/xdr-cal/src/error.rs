//! Error types for the calibration session.

use std::path::PathBuf;

use thiserror::Error;
use xdr_core::DecodeError;

/// Result type for session operations.
pub type CalResult<T> = Result<T, CalError>;

/// Calibration session error.
#[derive(Debug, Error)]
pub enum CalError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Reference image decode failed. The previous image stays loaded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
