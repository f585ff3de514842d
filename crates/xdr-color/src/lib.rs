//! # xdr-color
//!
//! Luminance blend engine.
//!
//! A reference image arrives as two decodes: an SDR-clamped pass and a
//! full-range pass. This crate measures the full-range peak
//! ([`peak::peak_hdr`]), computes the cross-fade weight and white-level
//! scale for the current display ([`BlendParams::compute`]), and produces
//! the composite frame ([`composite::composite`]).
//!
//! # Usage
//!
//! ```rust,ignore
//! use xdr_color::{composite, BlendParams, ReferencePair};
//! use xdr_core::FrameEncoding;
//!
//! let pair = ReferencePair::new(sdr_decode, hdr_decode)?;
//! let params = BlendParams::compute(true, pair.peak_hdr(), Some(1.0), 7.5);
//! let frame = composite(&pair, &params, FrameEncoding::ScRgb);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - rayon row-partitioned peak scan and composite

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blend;
pub mod composite;
pub mod error;
pub mod peak;
pub mod primaries;

pub use blend::{effective_white_level, max_display_boost, BlendParams};
pub use composite::{composite, ReferencePair};
pub use error::{ColorError, ColorResult};
pub use peak::peak_hdr;
pub use primaries::{to_working_matrix, Primaries};
