//! 16-bar gamma ramp.
//!
//! Bar `i` shows code `A + (B - A) * i / 15`, unrounded, so the two end bars
//! are exactly A and B. Each bar carries a label at its bottom edge and the
//! ramp gets one caption at the top.

use xdr_core::Rect;

use crate::caption::{bar_label, caption, code_luma};
use crate::draw::{Anchor, DrawList};
use crate::PatternInput;

/// Number of bars.
pub const BARS: u32 = 16;

/// Code shown by bar `i`.
#[inline]
pub fn bar_code(code_a: i16, code_b: i16, i: u32) -> f32 {
    let span = (code_b as i32 - code_a as i32) * i as i32;
    code_a as f32 + span as f32 / (BARS - 1) as f32
}

/// Draws the gamma ramp.
pub fn gamma_ramp(input: &PatternInput) -> DrawList {
    let mut list = DrawList::with_capacity(BARS as usize * 2 + 1);
    if input.is_empty() {
        return list;
    }

    let cell_w = input.width as f32 * 0.0625;
    let height = input.height as f32;

    for i in 0..BARS {
        let code = bar_code(input.code_a, input.code_b, i);
        let rect = Rect::new(i as f32 * cell_w, 0.0, cell_w + 1.0, height);
        list.fill(rect, code_luma(input.hdr, input.eotf, code));
        list.label(
            bar_label(input.hdr, input.eotf, code),
            rect,
            Anchor::Bottom,
            input.label_size,
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use xdr_transfer::Eotf;

    fn pq_full_range() -> PatternInput {
        PatternInput {
            width: 1600,
            height: 900,
            eotf: Eotf::Pq,
            hdr: true,
            desktop_is_hdr: true,
            code_a: 0,
            code_b: 1023,
            ..PatternInput::default()
        }
    }

    #[test]
    fn pq_end_bars() {
        let list = gamma_ramp(&pq_full_range());
        let labels: Vec<_> = list.labels().collect();
        assert_eq!(labels.len(), 17);
        assert_eq!(labels[0], ("0", Anchor::Bottom));
        assert_eq!(labels[15], ("1E+04", Anchor::Bottom));
        assert_eq!(labels[16], ("PQ EOTF", Anchor::Top));

        let fills: Vec<_> = list.fills().collect();
        assert_eq!(fills[0].1, 0.0);
        assert_relative_eq!(fills[15].1, 125.0, max_relative = 1e-6);
    }

    #[test]
    fn bar_geometry() {
        let list = gamma_ramp(&pq_full_range());
        let fills: Vec<_> = list.fills().collect();
        assert_eq!(*fills[0].0, Rect::new(0.0, 0.0, 101.0, 900.0));
        assert_eq!(*fills[3].0, Rect::new(300.0, 0.0, 101.0, 900.0));
    }

    #[test]
    fn codes_are_unrounded() {
        assert_eq!(bar_code(0, 255, 0), 0.0);
        assert_eq!(bar_code(0, 255, 15), 255.0);
        assert_eq!(bar_code(0, 100, 1), 100.0 / 15.0);
        assert_eq!(bar_code(200, 100, 15), 100.0);
    }

    #[test]
    fn sdr_hex_labels() {
        let input = PatternInput {
            width: 320,
            height: 200,
            hdr: false,
            desktop_is_hdr: false,
            code_a: 0,
            code_b: 255,
            ..PatternInput::default()
        };
        let list = gamma_ramp(&input);
        let labels: Vec<_> = list.labels().map(|(t, _)| t.to_string()).collect();
        assert_eq!(labels[0], "00");
        assert_eq!(labels[1], "11");
        assert_eq!(labels[15], "FF");
        assert_eq!(labels[16], "Monitor native gamma");
    }
}
