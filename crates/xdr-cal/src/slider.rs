//! Code sliders and their value strings.

use serde::{Deserialize, Serialize};
use xdr_pattern::format::{format_g4, format_hex2};
use xdr_transfer::{Eotf, MAX_CODE, SDR_CODE};

/// How a slider presents its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Two-digit uppercase hex byte
    #[default]
    Hex,
    /// Percentage of the slider maximum
    Percent,
    /// Luminance through the active EOTF
    Nits,
}

/// One code slider.
///
/// The value is a float, as a UI slider holds it; consumers read the
/// truncated [`code`](Slider::code).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    value: f32,
    max: f32,
    display: DisplayMode,
}

impl Slider {
    /// Maximum in SDR mode.
    pub const SDR_MAX: f32 = SDR_CODE;
    /// Maximum in HDR mode.
    pub const HDR_MAX: f32 = MAX_CODE;

    /// Creates a slider, clamping `value` into `[0, max]`.
    pub fn new(value: f32, max: f32, display: DisplayMode) -> Self {
        let mut s = Self {
            value: 0.0,
            max: max.max(0.0),
            display,
        };
        s.set_value(value);
        s
    }

    /// SDR slider: range [0, 255], hex.
    pub fn sdr(value: f32) -> Self {
        Self::new(value, Self::SDR_MAX, DisplayMode::Hex)
    }

    /// Raw value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Integer code, truncated.
    #[inline]
    pub fn code(&self) -> i16 {
        self.value as i16
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Display convention.
    #[inline]
    pub fn display(&self) -> DisplayMode {
        self.display
    }

    /// Sets the value, clamped into `[0, max]`. NaN becomes 0.
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max)
        };
    }

    /// Sets the upper bound, pulling the value down if needed.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.value = self.value.min(self.max);
    }

    /// Sets the display convention.
    pub fn set_display(&mut self, display: DisplayMode) {
        self.display = display;
    }

    /// Value string for the UI.
    pub fn label(&self, eotf: Eotf) -> String {
        format_slider(self.code(), self.display, self.max, eotf)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::sdr(0.0)
    }
}

/// Formats a slider code.
///
/// - Hex: `"{code:02X}"`
/// - Percent: `code / max * 100`, rounded half to even, then `%`
/// - Nits: `eotf.to_nits(code)` with 4 significant digits, then ` nits`
pub fn format_slider(code: i16, mode: DisplayMode, max: f32, eotf: Eotf) -> String {
    match mode {
        DisplayMode::Hex => format_hex2(code as f32),
        DisplayMode::Percent => {
            let pct = if max > 0.0 {
                (code as f32 / max * 100.0).round_ties_even()
            } else {
                0.0
            };
            format!("{pct}%")
        }
        DisplayMode::Nits => format!("{} nits", format_g4(eotf.to_nits(code as f32))),
    }
}
