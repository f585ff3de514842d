//! Error types for xdr-core.
//!
//! Two families live here:
//!
//! - [`Error`] covers buffer construction and geometry problems.
//! - [`DecodeError`] is what an image decoder reports back. It names the
//!   failing stage and carries a machine code plus an optional detail string,
//!   enough for the UI layer to show a meaningful message.
//!
//! # Usage
//!
//! ```rust
//! use xdr_core::{DecodeError, DecodeErrorCode};
//!
//! let err = DecodeError::new("png_read_info", DecodeErrorCode::InvalidParam)
//!     .with_detail("bad signature");
//! assert!(err.to_string().contains("png_read_info"));
//! assert!(err.is_invalid_input());
//! ```

use std::fmt;

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from buffer and geometry operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, or the buffer size would overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Row stride is smaller than one row of pixels.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride, in elements
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Image width
        width: u32,
    },

    /// Pixel buffer is shorter than `stride * height`.
    #[error("buffer too small: expected at least {expected} elements, got {got}")]
    BufferTooSmall {
        /// Required element count
        expected: usize,
        /// Actual element count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

/// Machine code of a decoder failure.
///
/// Mirrors the status codes a gain-map codec reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorCode {
    /// Unspecified failure.
    Error,
    /// Failure the codec could not classify.
    UnknownError,
    /// Malformed input or argument.
    InvalidParam,
    /// Allocation failure.
    MemError,
    /// Call made in the wrong state.
    InvalidOperation,
    /// Input uses a feature the codec does not handle.
    UnsupportedFeature,
    /// Decode was cancelled before it completed.
    Cancelled,
}

impl DecodeErrorCode {
    /// Short stable name, suitable for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::InvalidParam => "INVALID_PARAM",
            Self::MemError => "MEM_ERROR",
            Self::InvalidOperation => "INVALID_OPERATION",
            Self::UnsupportedFeature => "UNSUPPORTED_FEATURE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for DecodeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed decoder failure: stage name, machine code, optional detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// Name of the decoder stage that failed.
    pub stage: String,
    /// Machine code.
    pub code: DecodeErrorCode,
    /// Optional human readable detail.
    pub detail: Option<String>,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

impl DecodeError {
    /// Creates a decode error without detail.
    pub fn new(stage: impl Into<String>, code: DecodeErrorCode) -> Self {
        Self {
            stage: stage.into(),
            code,
            detail: None,
        }
    }

    /// Attaches a detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Shorthand for a cancelled decode.
    pub fn cancelled(stage: impl Into<String>) -> Self {
        Self::new(stage, DecodeErrorCode::Cancelled)
    }

    /// Returns true if the decode was cancelled rather than rejected.
    pub fn is_cancelled(&self) -> bool {
        self.code == DecodeErrorCode::Cancelled
    }

    /// Returns true if the input itself was rejected.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self.code,
            DecodeErrorCode::InvalidParam | DecodeErrorCode::UnsupportedFeature
        )
    }
}
