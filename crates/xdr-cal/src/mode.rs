//! SDR/HDR mode and code range coordination.
//!
//! The coordinator owns the two code sliders and the render mode and keeps
//! them consistent across transitions:
//!
//! | Transition | Range | Display | Codes |
//! |------------|-------|---------|-------|
//! | SDR -> HDR | [0, 1023] | nits | A kept, B = peak code |
//! | HDR -> SDR | [0, 255] | hex | clamped only |
//! | EOTF change in HDR | unchanged | unchanged | nits preserved |
//! | EOTF change in SDR | unchanged | unchanged | untouched |

use tracing::debug;
use xdr_core::FrameEncoding;
use xdr_pattern::code_luma;
use xdr_transfer::Eotf;

use crate::display::DesktopFacts;
use crate::slider::{DisplayMode, Slider};

/// Output mode: HDR flag and the active EOTF.
///
/// The EOTF is remembered in SDR but only applied in HDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderMode {
    /// HDR (scRGB) output
    pub hdr: bool,
    /// Active transfer function
    pub eotf: Eotf,
}

impl RenderMode {
    /// SDR with the given remembered EOTF.
    pub const fn sdr(eotf: Eotf) -> Self {
        Self { hdr: false, eotf }
    }

    /// HDR with the given EOTF.
    pub const fn hdr(eotf: Eotf) -> Self {
        Self { hdr: true, eotf }
    }

    /// Pixel encoding of frames in this mode.
    pub fn encoding(&self) -> FrameEncoding {
        if self.hdr {
            FrameEncoding::ScRgb
        } else {
            FrameEncoding::DisplayNative
        }
    }

    /// Slider maximum in this mode.
    pub fn code_max(&self) -> f32 {
        if self.hdr { Slider::HDR_MAX } else { Slider::SDR_MAX }
    }

    /// Slider display convention in this mode.
    pub fn display_mode(&self) -> DisplayMode {
        if self.hdr {
            DisplayMode::Nits
        } else {
            DisplayMode::Hex
        }
    }

    /// Frame value of a code.
    #[inline]
    pub fn luma(&self, code: f32) -> f32 {
        code_luma(self.hdr, self.eotf, code)
    }
}

/// Owns sliders A and B and the render mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeCoordinator {
    mode: RenderMode,
    a: Slider,
    b: Slider,
}

impl Default for ModeCoordinator {
    fn default() -> Self {
        Self::new(Eotf::default())
    }
}

impl ModeCoordinator {
    /// SDR mode, A = 0, B = 255.
    pub fn new(eotf: Eotf) -> Self {
        Self {
            mode: RenderMode::sdr(eotf),
            a: Slider::sdr(0.0),
            b: Slider::sdr(eotf.sdr_code()),
        }
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// HDR output active.
    #[inline]
    pub fn hdr(&self) -> bool {
        self.mode.hdr
    }

    /// Selected EOTF.
    #[inline]
    pub fn eotf(&self) -> Eotf {
        self.mode.eotf
    }

    /// Slider A.
    pub fn slider_a(&self) -> &Slider {
        &self.a
    }

    /// Slider B.
    pub fn slider_b(&self) -> &Slider {
        &self.b
    }

    /// Code A, truncated.
    #[inline]
    pub fn code_a(&self) -> i16 {
        self.a.code()
    }

    /// Code B, truncated.
    #[inline]
    pub fn code_b(&self) -> i16 {
        self.b.code()
    }

    /// Moves slider A.
    pub fn set_code_a(&mut self, value: f32) {
        self.a.set_value(value);
    }

    /// Moves slider B.
    pub fn set_code_b(&mut self, value: f32) {
        self.b.set_value(value);
    }

    /// Switches SDR/HDR. Returns `false` when already in that mode.
    ///
    /// Entering HDR sets B to the code of the display peak under the active
    /// EOTF, or of 80 nits when the peak is unknown or the desktop is not
    /// in HDR. Leaving HDR only clamps.
    pub fn set_hdr(&mut self, hdr: bool, facts: &DesktopFacts) -> bool {
        if hdr == self.mode.hdr {
            return false;
        }
        self.mode.hdr = hdr;
        let max = self.mode.code_max();
        let display = self.mode.display_mode();
        for s in [&mut self.a, &mut self.b] {
            s.set_max(max);
            s.set_display(display);
        }

        if hdr {
            let peak = facts.peak_or_default();
            let code = self.mode.eotf.to_code(peak).round_ties_even();
            self.b.set_value(code);
            debug!(eotf = %self.mode.eotf, peak, code_b = self.b.code(), "entered HDR");
        } else {
            debug!(code_a = self.a.code(), code_b = self.b.code(), "entered SDR");
        }
        true
    }

    /// Selects an EOTF. Returns `false` when it is already active.
    ///
    /// In HDR both sliders are re-expressed so they keep their luminance.
    pub fn set_eotf(&mut self, eotf: Eotf) -> bool {
        let previous = self.mode.eotf;
        if eotf == previous {
            return false;
        }
        self.mode.eotf = eotf;

        if self.mode.hdr {
            for s in [&mut self.a, &mut self.b] {
                s.set_value(previous.convert_code(s.value(), eotf));
            }
            debug!(from = %previous, to = %eotf, code_a = self.a.code(), code_b = self.b.code(), "EOTF changed");
        } else {
            debug!(from = %previous, to = %eotf, "EOTF stored for HDR");
        }
        true
    }

    /// Frame values of A and B in the current mode.
    pub fn luma_pair(&self) -> (f32, f32) {
        (
            self.mode.luma(self.a.code() as f32),
            self.mode.luma(self.b.code() as f32),
        )
    }

    /// Code B in scRGB through the active EOTF.
    ///
    /// This is the target peak the blend engine aims for; it only matters
    /// in HDR.
    pub fn target_peak_scrgb(&self) -> f32 {
        self.mode.eotf.to_scrgb(self.b.code() as f32)
    }

    /// UI strings for A and B.
    pub fn slider_labels(&self) -> (String, String) {
        (self.a.label(self.mode.eotf), self.b.label(self.mode.eotf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::display::StaticDisplay;
    use crate::DisplayQuery;

    fn hdr_desktop(peak: f32) -> DesktopFacts {
        StaticDisplay::hdr(peak, 1.0).facts()
    }

    #[test]
    fn starts_in_sdr() {
        let c = ModeCoordinator::default();
        assert!(!c.hdr());
        assert_eq!((c.code_a(), c.code_b()), (0, 255));
        assert_eq!(c.slider_a().max(), 255.0);
        assert_eq!(c.mode().encoding(), FrameEncoding::DisplayNative);
        assert_eq!(c.luma_pair(), (0.0, 1.0));
    }

    #[test]
    fn entering_hdr_uses_display_peak() {
        let mut c = ModeCoordinator::new(Eotf::Pq);
        c.set_code_a(17.0);
        assert!(c.set_hdr(true, &hdr_desktop(1000.0)));
        assert_eq!(c.code_a(), 17);
        assert_eq!(c.code_b() as f32, Eotf::Pq.to_code(1000.0).round_ties_even());
        assert_eq!(c.slider_b().max(), 1023.0);
        assert_eq!(c.slider_b().display(), DisplayMode::Nits);
        assert_eq!(c.mode().encoding(), FrameEncoding::ScRgb);
        assert!(!c.set_hdr(true, &hdr_desktop(400.0)));
    }

    #[test]
    fn entering_hdr_without_peak_uses_sdr_white() {
        for facts in [DesktopFacts::UNKNOWN, StaticDisplay::sdr().facts()] {
            let mut c = ModeCoordinator::new(Eotf::Pq);
            c.set_hdr(true, &facts);
            assert_eq!(c.code_b(), 497);

            let mut c = ModeCoordinator::new(Eotf::Gamma22);
            c.set_hdr(true, &facts);
            assert_eq!(c.code_b(), 255);
        }
    }

    #[test]
    fn leaving_hdr_only_clamps() {
        let mut c = ModeCoordinator::new(Eotf::Pq);
        c.set_hdr(true, &hdr_desktop(1000.0));
        c.set_code_a(100.0);
        c.set_hdr(false, &hdr_desktop(1000.0));
        assert_eq!(c.code_a(), 100);
        assert_eq!(c.code_b(), 255);
        assert_eq!(c.slider_b().display(), DisplayMode::Hex);
        assert_eq!(c.slider_labels(), ("64".to_string(), "FF".to_string()));
    }

    #[test]
    fn eotf_change_preserves_nits() {
        let mut c = ModeCoordinator::new(Eotf::Pq);
        c.set_hdr(true, &hdr_desktop(600.0));
        c.set_code_a(300.0);
        let nits_a = Eotf::Pq.to_nits(300.0);
        let nits_b = Eotf::Pq.to_nits(c.code_b() as f32);

        assert!(c.set_eotf(Eotf::Gamma22));
        let a = Eotf::Gamma22.to_nits(c.slider_a().value());
        let b = Eotf::Gamma22.to_nits(c.slider_b().value());
        // one code step of G2.2 near these levels
        assert_relative_eq!(a, nits_a, max_relative = 0.02);
        assert_relative_eq!(b, nits_b, max_relative = 0.02);
    }

    #[test]
    fn eotf_change_in_sdr_keeps_codes() {
        let mut c = ModeCoordinator::new(Eotf::Pq);
        c.set_code_a(12.0);
        assert!(c.set_eotf(Eotf::Srgb));
        assert_eq!((c.code_a(), c.code_b()), (12, 255));
        assert_eq!(c.eotf(), Eotf::Srgb);
        assert!(!c.set_eotf(Eotf::Srgb));
    }

    #[test]
    fn eotf_change_clamps_to_range() {
        // 1023 under PQ is 10000 nits, far above G2.4's code range
        let mut c = ModeCoordinator::new(Eotf::Pq);
        c.set_hdr(true, &hdr_desktop(10000.0));
        assert_eq!(c.code_b(), 1023);
        c.set_eotf(Eotf::Gamma24);
        assert_eq!(c.code_b(), 1023);
    }

    #[test]
    fn hdr_luma_and_target() {
        let mut c = ModeCoordinator::new(Eotf::Srgb);
        c.set_hdr(true, &DesktopFacts::UNKNOWN);
        assert_eq!(c.code_b(), 255);
        let (a, b) = c.luma_pair();
        assert_eq!(a, 0.0);
        assert_relative_eq!(b, 1.0, max_relative = 1e-6);
        assert_relative_eq!(c.target_peak_scrgb(), 1.0, max_relative = 1e-6);
    }
}
