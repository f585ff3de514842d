//! 8x8 chessboard of the two codes.
//!
//! Cell `(row, col)` shows A when `row + col` is even, B otherwise. Every
//! cell extends one pixel past its right and bottom edges so fractional
//! cell sizes never leave seams; the next cell paints over the overlap.

use xdr_core::Rect;

use crate::caption::code_luma;
use crate::draw::DrawList;
use crate::PatternInput;

/// Cells per side.
pub const GRID: u32 = 8;

/// Draws the chessboard.
pub fn chessboard(input: &PatternInput) -> DrawList {
    let mut list = DrawList::with_capacity((GRID * GRID) as usize);
    if input.is_empty() {
        return list;
    }

    let luma_a = code_luma(input.hdr, input.eotf, input.code_a as f32);
    let luma_b = code_luma(input.hdr, input.eotf, input.code_b as f32);
    let cell_w = input.width as f32 * 0.125;
    let cell_h = input.height as f32 * 0.125;

    for row in 0..GRID {
        for col in 0..GRID {
            let luma = if (row + col) % 2 == 0 { luma_a } else { luma_b };
            let rect = Rect::new(col as f32 * cell_w, row as f32 * cell_h, cell_w + 1.0, cell_h + 1.0);
            list.fill(rect, luma);
        }
    }
    list
}
