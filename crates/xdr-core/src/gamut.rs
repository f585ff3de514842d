//! Color gamut tags.
//!
//! Every decoded buffer carries one of these so the blend engine can bring
//! both decodes into the same working space before mixing them. The
//! primaries themselves live in `xdr-color`.

use std::fmt;

/// Gamut of a decoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gamut {
    /// ITU-R BT.709 / sRGB primaries.
    #[default]
    Bt709,
    /// Display P3 (DCI-P3 primaries, D65 white).
    DisplayP3,
    /// ITU-R BT.2100 (BT.2020 primaries).
    Bt2100,
}

impl Gamut {
    /// All known gamuts.
    pub const ALL: [Gamut; 3] = [Gamut::Bt709, Gamut::DisplayP3, Gamut::Bt2100];

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Gamut::Bt709 => "BT.709",
            Gamut::DisplayP3 => "Display P3",
            Gamut::Bt2100 => "BT.2100",
        }
    }

    /// Parses a gamut name, case-insensitive.
    ///
    /// Accepts `bt709`/`srgb`/`rec709`, `p3`/`displayp3`/`display-p3` and
    /// `bt2100`/`bt2020`/`rec2020`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['.', '_', ' '], "").as_str() {
            "bt709" | "srgb" | "rec709" => Some(Gamut::Bt709),
            "p3" | "displayp3" | "display-p3" => Some(Gamut::DisplayP3),
            "bt2100" | "bt2020" | "rec2020" => Some(Gamut::Bt2100),
            _ => None,
        }
    }
}

impl fmt::Display for Gamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
