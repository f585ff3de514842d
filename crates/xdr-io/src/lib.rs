//! # xdr-io
//!
//! Reference image decoding and frame output.
//!
//! - [`Decoder`] - the two-pass decode interface the calibration session uses
//! - [`png::PngDecoder`] - bundled PNG implementation, sRGB or PQ sources
//! - [`png::write_frame`] - dumps rendered frames for inspection
//!
//! # Dependencies
//!
//! - [`png`](https://docs.rs/png) - PNG codec

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod decode;
pub mod error;
pub mod png;

pub use decode::Decoder;
pub use error::{IoError, IoResult};
pub use png::{encode_frame, write_frame, PngDecoder, SourceTransfer};
