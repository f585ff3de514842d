//! Error types for blend operations.

use thiserror::Error;

/// Blend engine error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// The SDR and full-range decodes differ in size.
    #[error("decode size mismatch: SDR {sdr_width}x{sdr_height}, HDR {hdr_width}x{hdr_height}")]
    DimensionMismatch {
        /// SDR decode width
        sdr_width: u32,
        /// SDR decode height
        sdr_height: u32,
        /// Full-range decode width
        hdr_width: u32,
        /// Full-range decode height
        hdr_height: u32,
    },
}

/// Result type for blend operations.
pub type ColorResult<T> = Result<T, ColorError>;
