//! Software rasterizer for draw lists.
//!
//! Paints fills and the reference image into a [`LinearImage`]. Rectangle
//! edges snap to the nearest pixel boundary and are clipped to the surface;
//! later commands paint over earlier ones. Labels need text shaping and are
//! left to the UI layer.

use tracing::trace;
use xdr_core::{FrameEncoding, LinearImage, Rect, CHANNELS};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::draw::{DrawCommand, DrawList};

/// Paints `list` onto a `width`x`height` frame cleared to an opaque
/// `background` grey.
///
/// `image` is the composite drawn by [`DrawCommand::Image`]; without it
/// those commands are skipped.
pub fn rasterize(
    list: &DrawList,
    width: u32,
    height: u32,
    encoding: FrameEncoding,
    background: f32,
    image: Option<&LinearImage>,
) -> LinearImage {
    let mut frame = LinearImage::filled(
        width,
        height,
        encoding,
        [background, background, background, 1.0],
    );

    for cmd in list.commands() {
        match cmd {
            DrawCommand::Clear(rgba) => frame.fill_span(0, 0, width, height, *rgba),
            DrawCommand::Fill { rect, luma } => {
                if let Some((x0, y0, x1, y1)) = rect.to_pixel_span(width, height) {
                    frame.fill_span(x0, y0, x1, y1, [*luma, *luma, *luma, 1.0]);
                }
            }
            DrawCommand::Image { rect } => {
                if let Some(src) = image {
                    blit_scaled(&mut frame, src, rect);
                }
            }
            DrawCommand::Label { .. } => {}
        }
    }

    trace!(width, height, commands = list.len(), "rasterized");
    frame
}

/// Bilinear sample at continuous source coordinates, edges clamped.
fn sample_bilinear(src: &LinearImage, sx: f32, sy: f32) -> [f32; 4] {
    let max_x = src.width() as f32 - 1.0;
    let max_y = src.height() as f32 - 1.0;
    let sx = sx.clamp(0.0, max_x);
    let sy = sy.clamp(0.0, max_y);
    let x0 = sx.floor() as u32;
    let y0 = sy.floor() as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let fx = sx - x0 as f32;
    let fy = sy - y0 as f32;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0.0; 4];
    for c in 0..CHANNELS {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = top + (bottom - top) * fy;
    }
    out
}

/// Scales `src` into `dest` on `frame` using pixel-center mapping.
fn blit_scaled(frame: &mut LinearImage, src: &LinearImage, dest: &Rect) {
    if src.width() == 0 || src.height() == 0 {
        return;
    }
    let Some((x0, y0, x1, y1)) = dest.to_pixel_span(frame.width(), frame.height()) else {
        return;
    };
    let scale_x = src.width() as f32 / dest.width;
    let scale_y = src.height() as f32 / dest.height;
    let row_len = frame.width() as usize * CHANNELS;

    let paint_row = |(y, row): (usize, &mut [f32])| {
        let y = y as u32;
        if y < y0 || y >= y1 {
            return;
        }
        let sy = (y as f32 + 0.5 - dest.y) * scale_y - 0.5;
        for x in x0..x1 {
            let sx = (x as f32 + 0.5 - dest.x) * scale_x - 0.5;
            let i = x as usize * CHANNELS;
            row[i..i + CHANNELS].copy_from_slice(&sample_bilinear(src, sx, sy));
        }
    };

    #[cfg(feature = "parallel")]
    frame.data_mut().par_chunks_mut(row_len).enumerate().for_each(paint_row);

    #[cfg(not(feature = "parallel"))]
    frame.data_mut().chunks_mut(row_len).enumerate().for_each(paint_row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chessboard::chessboard;
    use crate::draw::Anchor;
    use crate::PatternInput;

    #[test]
    fn chessboard_fills_every_pixel() {
        let input = PatternInput {
            width: 21,
            height: 13,
            code_a: 0,
            code_b: 255,
            ..PatternInput::default()
        };
        let frame = rasterize(&chessboard(&input), 21, 13, FrameEncoding::DisplayNative, 0.5, None);
        for y in 0..13 {
            for x in 0..21 {
                let p = frame.pixel(x, y);
                assert!(p[0] == 0.0 || p[0] == 1.0, "seam at ({x}, {y}): {p:?}");
            }
        }
        assert_eq!(frame.pixel(0, 0)[0], 0.0);
        assert_eq!(frame.pixel(20, 0)[0], 1.0);
    }

    #[test]
    fn background_and_labels() {
        let mut list = DrawList::new();
        list.label("x", Rect::new(0.0, 0.0, 4.0, 4.0), Anchor::Top, 13.0);
        let frame = rasterize(&list, 4, 4, FrameEncoding::ScRgb, 0.25, None);
        assert!(frame.data().chunks(4).all(|p| p == [0.25, 0.25, 0.25, 1.0]));
        assert_eq!(frame.encoding(), FrameEncoding::ScRgb);
    }

    #[test]
    fn later_fill_wins() {
        let mut list = DrawList::new();
        list.fill(Rect::new(0.0, 0.0, 3.0, 1.0), 0.1);
        list.fill(Rect::new(1.0, 0.0, 3.0, 1.0), 0.9);
        let frame = rasterize(&list, 4, 1, FrameEncoding::DisplayNative, 0.0, None);
        assert_eq!(frame.pixel(0, 0)[0], 0.1);
        assert_eq!(frame.pixel(1, 0)[0], 0.9);
        assert_eq!(frame.pixel(3, 0)[0], 0.9);
    }

    #[test]
    fn image_scaled_into_rect() {
        let src = LinearImage::filled(2, 2, FrameEncoding::ScRgb, [3.0, 2.0, 1.0, 1.0]);
        let mut list = DrawList::new();
        list.push(DrawCommand::Clear([0.0; 4]));
        list.push(DrawCommand::Image {
            rect: Rect::new(2.0, 0.0, 4.0, 4.0),
        });
        let frame = rasterize(&list, 8, 4, FrameEncoding::ScRgb, 0.5, Some(&src));
        assert_eq!(frame.pixel(0, 0), [0.0; 4]);
        assert_eq!(frame.pixel(3, 2), [3.0, 2.0, 1.0, 1.0]);
        assert_eq!(frame.pixel(6, 3), [0.0; 4]);
    }

    #[test]
    fn bilinear_midpoint() {
        let mut src = LinearImage::new(2, 1, FrameEncoding::ScRgb);
        src.set_pixel(0, 0, [0.0, 0.0, 0.0, 1.0]);
        src.set_pixel(1, 0, [2.0, 2.0, 2.0, 1.0]);
        assert_eq!(sample_bilinear(&src, 0.5, 0.0), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(sample_bilinear(&src, -3.0, 0.0), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(sample_bilinear(&src, 9.0, 0.0), [2.0, 2.0, 2.0, 1.0]);
    }
}
