//! # xdr-transfer
//!
//! Transfer functions behind the calibration sliders.
//!
//! The normalized curves live in their own modules, in the usual
//! encoded/linear form:
//!
//! | Module | Encoded | Linear |
//! |--------|---------|--------|
//! | [`pq`] | [0, 1] | [0, 10000] cd/m2 |
//! | [`srgb`] | [0, 1] | [0, 1] |
//! | [`gamma`] | [0, 1] | [0, 1] |
//!
//! [`Eotf`] wraps them into slider-code conversions: code to nits, nits to
//! code, and code to scRGB (1.0 == 80 nits).
//!
//! # Usage
//!
//! ```rust
//! use xdr_transfer::Eotf;
//!
//! let b = Eotf::Pq.to_code(600.0).round();
//! let luma = Eotf::Pq.to_scrgb(b);
//! assert!((luma - 7.5).abs() < 0.1);
//! ```
//!
//! # Used By
//!
//! - `xdr-color` - SDR decode linearization, G2.2 re-encoding
//! - `xdr-pattern` - per-cell and per-bar luminance
//! - `xdr-cal` - slider ranges and EOTF switching

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod eotf;
pub mod gamma;
pub mod pq;
pub mod srgb;

pub use eotf::{Eotf, MAX_CODE, NITS_TO_SCRGB, SDR_CODE, SDR_WHITE_NITS};
pub use gamma::{gamma_eotf, gamma_oetf};
pub use pq::{eotf as pq_eotf, oetf as pq_oetf};
pub use srgb::{eotf as srgb_eotf, oetf as srgb_oetf};
