//! Error types for I/O operations.

use std::io;

use thiserror::Error;
use xdr_core::DecodeError;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The decoder rejected the input.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Frame is empty or its buffer does not match its size.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
