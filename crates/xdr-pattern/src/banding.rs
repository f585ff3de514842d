//! Banding ramp: one bar per device pixel column.
//!
//! Column `x` shows code `A + (B - A) * x / (width - 1)` as a float, so a
//! panel with more than 8 or 10 bits of precision gets a smooth gradient
//! and any banding comes from the display chain. `width` must already be
//! in device pixels.

use xdr_core::Rect;

use crate::caption::{caption, code_luma};
use crate::draw::{Anchor, DrawList};
use crate::PatternInput;

/// Code shown by column `x` of a `width` wide ramp.
#[inline]
pub fn column_code(code_a: i16, code_b: i16, x: u32, width: u32) -> f32 {
    if width <= 1 {
        return code_a as f32;
    }
    let a = code_a as f32;
    a + (code_b as f32 - a) * x as f32 / (width - 1) as f32
}

/// Draws the banding ramp.
pub fn banding(input: &PatternInput) -> DrawList {
    let mut list = DrawList::with_capacity(input.width as usize + 1);
    if input.is_empty() {
        return list;
    }

    let height = input.height as f32;
    for x in 0..input.width {
        let code = column_code(input.code_a, input.code_b, x, input.width);
        list.fill(
            Rect::new(x as f32, 0.0, 1.0, height),
            code_luma(input.hdr, input.eotf, code),
        );
    }

    list.label(
        caption(input),
        Rect::new(0.0, 0.0, input.width as f32, height),
        Anchor::Top,
        input.label_size,
    );
    list
}
