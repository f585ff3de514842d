//! # xdr-core
//!
//! Shared types for the xdrcal display-calibration workspace.
//!
//! - [`DecodedImage`], [`PixelData`] - raw buffers produced by an image decoder
//! - [`LinearImage`], [`FrameEncoding`] - RGBA f32 frames handed to the output surface
//! - [`Gamut`] - color gamut tag carried by every decoded buffer
//! - [`Rect`] - floating point rectangle used by draw lists
//! - [`Error`], [`DecodeError`] - error types
//!
//! ## Crate Structure
//!
//! ```text
//! xdr-core (this crate)
//!    ^
//!    +-- xdr-transfer (EOTF model)
//!    +-- xdr-color (blend engine)
//!    +-- xdr-pattern (pattern generators)
//!    +-- xdr-io (reference image decoder, frame writer)
//!    +-- xdr-cal (mode coordinator, session)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod gamut;
pub mod image;
pub mod rect;

pub use error::*;
pub use gamut::Gamut;
pub use image::*;
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use xdr_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{DecodeError, DecodeErrorCode, Error, Result};
    pub use crate::gamut::Gamut;
    pub use crate::image::{DecodedImage, FrameEncoding, LinearImage, PixelData};
    pub use crate::rect::Rect;
}
