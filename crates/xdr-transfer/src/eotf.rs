//! Slider-code EOTF variants.
//!
//! An [`Eotf`] maps a slider code to luminance and back. The code domain is
//! not uniform across variants:
//!
//! - [`Eotf::Pq`] spreads [0, 1023] over the whole PQ signal range, the
//!   usual 10-bit integer encoding.
//! - The sRGB and gamma variants treat [0, 255] as the 8-bit range, with
//!   255 at 80 nits, and keep going along the same curve up to 1023.
//!
//! Codes are floats so gradients can carry more than 10 bits of precision;
//! any conversion back to an integer code should round.
//!
//! # Usage
//!
//! ```rust
//! use xdr_transfer::Eotf;
//!
//! let nits = Eotf::Gamma22.to_nits(255.0);
//! assert!((nits - 80.0).abs() < 1e-4);
//!
//! // SDR white re-expressed as a PQ code
//! let code = Eotf::Gamma22.convert_code(255.0, Eotf::Pq);
//! assert_eq!(code, 497.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{gamma, pq, srgb};

/// Luminance of SDR reference white in nits (scRGB 1.0).
pub const SDR_WHITE_NITS: f32 = 80.0;

/// Reciprocal of [`SDR_WHITE_NITS`].
pub const NITS_TO_SCRGB: f32 = 0.0125;

/// Highest slider code for every variant.
pub const MAX_CODE: f32 = 1023.0;

/// Code of SDR reference white in the 8-bit based variants.
pub const SDR_CODE: f32 = 255.0;

/// The closed set of transfer functions a calibration slider can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eotf {
    /// SMPTE ST 2084 over codes [0, 1023].
    #[default]
    Pq,
    /// sRGB piecewise curve, 255 == 80 nits, extended to 1023.
    Srgb,
    /// Pure gamma 2.2, 255 == 80 nits, extended to 1023 (about 1700 nits).
    #[serde(alias = "g22")]
    Gamma22,
    /// Pure gamma 2.4, 255 == 80 nits, extended to 1023.
    #[serde(alias = "g24")]
    Gamma24,
}

impl Eotf {
    /// All variants in menu order.
    pub const ALL: [Eotf; 4] = [Eotf::Pq, Eotf::Srgb, Eotf::Gamma22, Eotf::Gamma24];

    /// Name used in captions.
    pub const fn display_name(self) -> &'static str {
        match self {
            Eotf::Pq => "PQ",
            Eotf::Srgb => "sRGB (extended)",
            Eotf::Gamma22 => "Gamma 2.2 (extended)",
            Eotf::Gamma24 => "Gamma 2.4 (extended)",
        }
    }

    /// Short machine name, the inverse of [`Eotf::from_name`].
    pub const fn short_name(self) -> &'static str {
        match self {
            Eotf::Pq => "pq",
            Eotf::Srgb => "srgb",
            Eotf::Gamma22 => "gamma22",
            Eotf::Gamma24 => "gamma24",
        }
    }

    /// Parses `pq`, `srgb`, `gamma22`/`g22` or `gamma24`/`g24`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pq" | "st2084" => Some(Eotf::Pq),
            "srgb" => Some(Eotf::Srgb),
            "gamma22" | "g22" | "gamma2.2" => Some(Eotf::Gamma22),
            "gamma24" | "g24" | "gamma2.4" => Some(Eotf::Gamma24),
            _ => None,
        }
    }

    /// Highest slider code in HDR mode.
    #[inline]
    pub const fn max_code(self) -> f32 {
        MAX_CODE
    }

    /// Code of SDR reference white.
    #[inline]
    pub const fn sdr_code(self) -> f32 {
        SDR_CODE
    }

    /// Converts a slider code to luminance in nits.
    #[inline]
    pub fn to_nits(self, code: f32) -> f32 {
        match self {
            Eotf::Pq => pq::eotf(code / MAX_CODE),
            Eotf::Srgb => srgb::eotf(code / SDR_CODE) * SDR_WHITE_NITS,
            Eotf::Gamma22 => gamma::eotf_22(code / SDR_CODE) * SDR_WHITE_NITS,
            Eotf::Gamma24 => gamma::eotf_24(code / SDR_CODE) * SDR_WHITE_NITS,
        }
    }

    /// Converts luminance in nits to a slider code.
    #[inline]
    pub fn to_code(self, nits: f32) -> f32 {
        match self {
            Eotf::Pq => pq::oetf(nits) * MAX_CODE,
            Eotf::Srgb => srgb::oetf(nits * NITS_TO_SCRGB) * SDR_CODE,
            Eotf::Gamma22 => gamma::oetf_22(nits * NITS_TO_SCRGB) * SDR_CODE,
            Eotf::Gamma24 => gamma::oetf_24(nits * NITS_TO_SCRGB) * SDR_CODE,
        }
    }

    /// Converts a slider code to linear scRGB (1.0 == 80 nits).
    #[inline]
    pub fn to_scrgb(self, code: f32) -> f32 {
        self.to_nits(code) * NITS_TO_SCRGB
    }

    /// Re-expresses `code` from `self` under `target`, keeping its luminance.
    ///
    /// The result is rounded to the nearest integer code.
    #[inline]
    pub fn convert_code(self, code: f32, target: Eotf) -> f32 {
        target.to_code(self.to_nits(code)).round_ties_even()
    }
}

impl fmt::Display for Eotf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Eotf {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Eotf::from_name(s).ok_or_else(|| {
            format!("unknown EOTF '{s}', expected one of: pq, srgb, gamma22, gamma24")
        })
    }
}
