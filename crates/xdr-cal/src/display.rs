//! Desktop capability facts.
//!
//! The OS query layer is reached through [`DisplayQuery`]. Every answer may
//! be unknown; callers substitute defaults instead of failing:
//!
//! | Fact | Unknown means |
//! |------|---------------|
//! | HDR enabled | the app's own mode |
//! | peak luminance | 80 nits |
//! | SDR white level | 1.0 |

use serde::{Deserialize, Serialize};
use tracing::warn;
use xdr_color::effective_white_level;
use xdr_transfer::SDR_WHITE_NITS;

/// Capability queries against the display hosting the surface.
///
/// Implementations must not panic for ordinary runtime conditions such as
/// a monitor disappearing mid-query; they answer `None` instead.
pub trait DisplayQuery: Send + Sync {
    /// Whether the OS runs this display in HDR.
    fn is_hdr_enabled(&self) -> Option<bool>;

    /// Peak luminance in nits.
    fn peak_nits(&self) -> Option<f32>;

    /// SDR white level as a multiplier of 80 nits.
    fn sdr_white_level(&self) -> Option<f32>;

    /// Queries all three facts at once.
    fn facts(&self) -> DesktopFacts {
        DesktopFacts {
            hdr_enabled: self.is_hdr_enabled(),
            peak_nits: self.peak_nits(),
            sdr_white_level: self.sdr_white_level(),
        }
    }
}

impl<Q: DisplayQuery + ?Sized> DisplayQuery for std::sync::Arc<Q> {
    fn is_hdr_enabled(&self) -> Option<bool> {
        (**self).is_hdr_enabled()
    }

    fn peak_nits(&self) -> Option<f32> {
        (**self).peak_nits()
    }

    fn sdr_white_level(&self) -> Option<f32> {
        (**self).sdr_white_level()
    }
}

/// One snapshot of the capability facts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopFacts {
    /// OS HDR switch
    pub hdr_enabled: Option<bool>,
    /// Peak luminance, nits
    pub peak_nits: Option<f32>,
    /// SDR white level multiplier
    pub sdr_white_level: Option<f32>,
}

impl DesktopFacts {
    /// Nothing known.
    pub const UNKNOWN: DesktopFacts = DesktopFacts {
        hdr_enabled: None,
        peak_nits: None,
        sdr_white_level: None,
    };

    /// Desktop HDR state, falling back to the app's own mode.
    #[inline]
    pub fn desktop_is_hdr(&self, app_hdr: bool) -> bool {
        self.hdr_enabled.unwrap_or(app_hdr)
    }

    /// Peak used to default code B when entering HDR.
    ///
    /// Only trusted when the OS reports HDR enabled and the value is a
    /// positive finite number. Anything else gives 80 nits.
    pub fn peak_or_default(&self) -> f32 {
        match (self.hdr_enabled, self.peak_nits) {
            (Some(true), Some(p)) if p.is_finite() && p > 0.0 => p,
            (Some(true), p) => {
                warn!(peak = ?p, "display peak unknown, assuming SDR white");
                SDR_WHITE_NITS
            }
            _ => SDR_WHITE_NITS,
        }
    }

    /// SDR white level, 1.0 when unknown or below 1.
    #[inline]
    pub fn white_level(&self) -> f32 {
        effective_white_level(self.sdr_white_level)
    }
}

/// Fixed answers, from configuration or command line flags.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticDisplay {
    facts: DesktopFacts,
}

impl StaticDisplay {
    /// Wraps a snapshot.
    pub fn new(facts: DesktopFacts) -> Self {
        Self { facts }
    }

    /// A display that answers nothing.
    pub fn unknown() -> Self {
        Self::new(DesktopFacts::UNKNOWN)
    }

    /// An HDR desktop with the given peak and white level.
    pub fn hdr(peak_nits: f32, sdr_white_level: f32) -> Self {
        Self::new(DesktopFacts {
            hdr_enabled: Some(true),
            peak_nits: Some(peak_nits),
            sdr_white_level: Some(sdr_white_level),
        })
    }

    /// An SDR desktop.
    pub fn sdr() -> Self {
        Self::new(DesktopFacts {
            hdr_enabled: Some(false),
            peak_nits: None,
            sdr_white_level: Some(1.0),
        })
    }
}

impl DisplayQuery for StaticDisplay {
    fn is_hdr_enabled(&self) -> Option<bool> {
        self.facts.hdr_enabled
    }

    fn peak_nits(&self) -> Option<f32> {
        self.facts.peak_nits
    }

    fn sdr_white_level(&self) -> Option<f32> {
        self.facts.sdr_white_level
    }

    fn facts(&self) -> DesktopFacts {
        self.facts
    }
}
