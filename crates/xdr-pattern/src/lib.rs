//! # xdr-pattern
//!
//! Calibration test patterns.
//!
//! Every generator is a pure function of a [`PatternInput`]: surface size
//! in device pixels, the active EOTF, the HDR flag, the two codes A and B
//! and the desktop HDR state. It returns a [`DrawList`]; nothing here holds
//! state between frames.
//!
//! | Page | Generator |
//! |------|-----------|
//! | 0 | [`chessboard::chessboard`] |
//! | 1 | [`ramp::gamma_ramp`] |
//! | 2 | [`banding::banding`] |
//! | 3 | [`reference::reference_image`] |
//!
//! Fill values are in the frame's encoding: scRGB when `hdr` is set,
//! display-native `code / 255` otherwise.
//!
//! # Usage
//!
//! ```rust
//! use xdr_pattern::{generate, Pattern, PatternInput};
//! use xdr_transfer::Eotf;
//!
//! let input = PatternInput {
//!     width: 800,
//!     height: 600,
//!     eotf: Eotf::Pq,
//!     hdr: true,
//!     desktop_is_hdr: true,
//!     code_a: 0,
//!     code_b: 767,
//!     ..PatternInput::default()
//! };
//! let list = generate(Pattern::GammaRamp, &input);
//! assert_eq!(list.fills().count(), 16);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod banding;
pub mod caption;
pub mod chessboard;
pub mod draw;
pub mod format;
pub mod ramp;
pub mod raster;
pub mod reference;

use std::fmt;

use xdr_transfer::Eotf;

pub use caption::{background_luma, caption, code_luma};
pub use draw::{Anchor, DrawCommand, DrawList};
pub use format::format_g4;
pub use raster::rasterize;

/// Default label size in device-independent pixels.
pub const LABEL_SIZE: f32 = 13.0;

/// Everything a generator may depend on.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternInput {
    /// Surface width in device pixels
    pub width: u32,
    /// Surface height in device pixels
    pub height: u32,
    /// Active EOTF, only read in HDR mode
    pub eotf: Eotf,
    /// App renders an HDR (scRGB) frame
    pub hdr: bool,
    /// Desktop runs in HDR, resolved once per frame
    pub desktop_is_hdr: bool,
    /// Code A
    pub code_a: i16,
    /// Code B
    pub code_b: i16,
    /// Label font size in device pixels
    pub label_size: f32,
    /// Size of the loaded reference composite, if any
    pub image_size: Option<(u32, u32)>,
}

impl Default for PatternInput {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            eotf: Eotf::Pq,
            hdr: false,
            desktop_is_hdr: false,
            code_a: 0,
            code_b: 255,
            label_size: LABEL_SIZE,
            image_size: None,
        }
    }
}

impl PatternInput {
    /// True when the surface has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Test pattern pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pattern {
    /// 8x8 A/B chessboard
    #[default]
    Chessboard,
    /// 16-bar ramp from A to B
    GammaRamp,
    /// Per-column ramp from A to B
    Banding,
    /// Reference image composite
    ReferenceImage,
}

impl Pattern {
    /// All pages in order.
    pub const ALL: [Pattern; 4] = [
        Pattern::Chessboard,
        Pattern::GammaRamp,
        Pattern::Banding,
        Pattern::ReferenceImage,
    ];

    /// Highest page index.
    pub const MAX_PAGE: usize = Self::ALL.len() - 1;

    /// Page index.
    pub fn page(self) -> usize {
        self as usize
    }

    /// Page at `index`, clamped to the last page.
    pub fn from_page(index: usize) -> Self {
        Self::ALL[index.min(Self::MAX_PAGE)]
    }

    /// Next page, staying on the last one.
    pub fn next(self) -> Self {
        Self::from_page(self.page() + 1)
    }

    /// Previous page, staying on the first one.
    pub fn prev(self) -> Self {
        Self::from_page(self.page().saturating_sub(1))
    }

    /// Short name.
    pub fn name(self) -> &'static str {
        match self {
            Pattern::Chessboard => "chessboard",
            Pattern::GammaRamp => "ramp",
            Pattern::Banding => "banding",
            Pattern::ReferenceImage => "image",
        }
    }

    /// Parses a short name or a page number.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Ok(i) = name.parse::<usize>() {
            return (i <= Self::MAX_PAGE).then(|| Self::ALL[i]);
        }
        match name.to_ascii_lowercase().as_str() {
            "chessboard" | "checkerboard" => Some(Pattern::Chessboard),
            "ramp" | "gamma" | "gamma-ramp" => Some(Pattern::GammaRamp),
            "banding" => Some(Pattern::Banding),
            "image" | "reference" => Some(Pattern::ReferenceImage),
            _ => None,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the generator for `pattern`.
pub fn generate(pattern: Pattern, input: &PatternInput) -> DrawList {
    match pattern {
        Pattern::Chessboard => chessboard::chessboard(input),
        Pattern::GammaRamp => ramp::gamma_ramp(input),
        Pattern::Banding => banding::banding(input),
        Pattern::ReferenceImage => reference::reference_image(input),
    }
}
