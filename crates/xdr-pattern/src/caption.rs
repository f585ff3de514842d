//! Code-to-luma mapping, captions and bar labels.
//!
//! Shared by the ramp generators. The caption depends on whether the desktop
//! itself runs in HDR; that flag is resolved once per frame by the caller
//! and passed in [`PatternInput::desktop_is_hdr`].

use xdr_transfer::Eotf;

use crate::format::{format_g4, format_hex2};
use crate::PatternInput;

/// Grey level of a code in the frame's encoding.
///
/// HDR frames are scRGB through the active EOTF. SDR frames are
/// display-native, `code / 255`.
#[inline]
pub fn code_luma(hdr: bool, eotf: Eotf, code: f32) -> f32 {
    if hdr {
        eotf.to_scrgb(code)
    } else {
        code / 255.0
    }
}

/// Background grey for a `#rrggbb` code such as 23 (`#171717`).
///
/// In HDR the code is read as sRGB so the background matches the SDR one.
#[inline]
pub fn background_luma(hdr: bool, code: u8) -> f32 {
    if hdr {
        Eotf::Srgb.to_scrgb(code as f32)
    } else {
        code as f32 / 255.0
    }
}

/// Caption naming the transfer function on screen.
pub fn caption(input: &PatternInput) -> String {
    match (input.hdr, input.desktop_is_hdr) {
        (true, true) => format!("{} EOTF", input.eotf.display_name()),
        (true, false) => format!(
            "{} EOTF (mapped onto monitor native gamma)",
            input.eotf.display_name()
        ),
        (false, true) => "sRGB gamma".to_string(),
        (false, false) => "Monitor native gamma".to_string(),
    }
}

/// Label for a ramp bar: nits in HDR, hex code in SDR.
pub fn bar_label(hdr: bool, eotf: Eotf, code: f32) -> String {
    if hdr {
        format_g4(eotf.to_nits(code))
    } else {
        format_hex2(code)
    }
}
