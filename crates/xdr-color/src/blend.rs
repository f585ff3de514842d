//! Headroom blend between an SDR decode and a full-range decode.
//!
//! The composite shown on screen is
//!
//! ```text
//! rgb = lerp(sdr, hdr, weight) * white_scale
//! a   = lerp(sdr, hdr, weight)
//! ```
//!
//! `weight` maps the usable headroom, how far above SDR white the target
//! peak reaches after dividing out the desktop white level, linearly onto
//! [0, 1], capped by the brightest value the full-range decode contains.
//!
//! # Example
//!
//! ```rust
//! use xdr_color::blend::BlendParams;
//!
//! // Image peaks at 8x SDR white, user targets 4x, desktop white at 1x
//! let p = BlendParams::compute(true, 8.0, Some(1.0), 4.0);
//! assert!((p.weight - 3.0 / 7.0).abs() < 1e-6);
//! assert_eq!(p.white_scale, 1.0);
//! ```

use tracing::debug;

/// Output of the blend computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParams {
    /// Cross-fade weight, 0 = SDR decode only, 1 = full-range decode only.
    pub weight: f32,
    /// Multiplier applied to linear RGB after the cross-fade.
    pub white_scale: f32,
}

impl BlendParams {
    /// Parameters for an SDR output: SDR decode, unscaled.
    pub const SDR: BlendParams = BlendParams {
        weight: 0.0,
        white_scale: 1.0,
    };

    /// Computes blend parameters.
    ///
    /// * `hdr_mode` - output surface is HDR
    /// * `peak_hdr` - brightest channel value of the full-range decode, scRGB
    /// * `desktop_white_level` - SDR white level multiplier, `None` if unknown
    /// * `target_peak_scrgb` - the user's B code in scRGB
    ///
    /// Never fails: an unknown or sub-unity white level counts as 1.0, and a
    /// full-range decode no brighter than SDR white gets weight 1.
    pub fn compute(
        hdr_mode: bool,
        peak_hdr: f32,
        desktop_white_level: Option<f32>,
        target_peak_scrgb: f32,
    ) -> Self {
        if !hdr_mode {
            return Self::SDR;
        }

        let white_scale = effective_white_level(desktop_white_level);
        // NaN peak counts as no measured headroom
        let weight = if !(peak_hdr > 1.0) {
            1.0
        } else {
            // NaN target maps to 1.0
            let headroom = (target_peak_scrgb / white_scale).max(1.0).min(peak_hdr);
            (headroom - 1.0) / (peak_hdr - 1.0)
        };

        debug!(peak_hdr, white_scale, target_peak_scrgb, weight, "blend params");
        Self {
            weight,
            white_scale,
        }
    }

    /// Blends one pair of working-space pixels.
    #[inline]
    pub fn apply(&self, sdr: [f32; 4], hdr: [f32; 4]) -> [f32; 4] {
        let w = self.weight;
        let mix = |a: f32, b: f32| a + (b - a) * w;
        [
            mix(sdr[0], hdr[0]) * self.white_scale,
            mix(sdr[1], hdr[1]) * self.white_scale,
            mix(sdr[2], hdr[2]) * self.white_scale,
            mix(sdr[3], hdr[3]),
        ]
    }
}

/// White level actually used: `None`, NaN and values below 1 become 1.
#[inline]
pub fn effective_white_level(desktop_white_level: Option<f32>) -> f32 {
    match desktop_white_level {
        Some(w) if w >= 1.0 => w,
        _ => 1.0,
    }
}

/// Boost ceiling requested from the decoder for the full-range pass.
///
/// In HDR mode this is the target peak over the white level, never below 1.
/// An SDR surface always asks for 1.
pub fn max_display_boost(
    hdr_mode: bool,
    target_peak_scrgb: f32,
    desktop_white_level: Option<f32>,
) -> f32 {
    if hdr_mode {
        (target_peak_scrgb / effective_white_level(desktop_white_level)).max(1.0)
    } else {
        1.0
    }
}
