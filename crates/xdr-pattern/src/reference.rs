//! Reference image page.
//!
//! The composite is scaled to fit the surface with its aspect ratio kept,
//! centered on the long axis. The page first clears to transparent black so
//! whatever sits behind the surface shows in the letterbox.

use xdr_core::Rect;

use crate::draw::{DrawCommand, DrawList};
use crate::PatternInput;

/// Largest rectangle of the image's aspect ratio centered in the surface.
pub fn aspect_fit(image_width: u32, image_height: u32, width: u32, height: u32) -> Rect {
    let aspect = image_width as f32 / image_height as f32;
    let (w, h) = (width as f32, height as f32);
    let surface = w / h;

    if surface > aspect {
        let new_w = aspect * h;
        Rect::new((w - new_w) / 2.0, 0.0, new_w, h)
    } else if surface < aspect {
        let new_h = w / aspect;
        Rect::new(0.0, (h - new_h) / 2.0, w, new_h)
    } else {
        Rect::new(0.0, 0.0, w, h)
    }
}

/// Draws the reference image page.
///
/// Without a loaded image only the clear is emitted.
pub fn reference_image(input: &PatternInput) -> DrawList {
    let mut list = DrawList::with_capacity(2);
    if input.is_empty() {
        return list;
    }
    list.push(DrawCommand::Clear([0.0; 4]));
    if let Some((iw, ih)) = input.image_size.filter(|&(w, h)| w > 0 && h > 0) {
        list.push(DrawCommand::Image {
            rect: aspect_fit(iw, ih, input.width, input.height),
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillarbox() {
        // square image on a 16:9 surface
        let r = aspect_fit(1000, 1000, 1600, 900);
        assert_eq!(r, Rect::new(350.0, 0.0, 900.0, 900.0));
    }

    #[test]
    fn letterbox() {
        let r = aspect_fit(2000, 1000, 1000, 1000);
        assert_eq!(r, Rect::new(0.0, 250.0, 1000.0, 500.0));
    }

    #[test]
    fn exact_fit() {
        assert_eq!(aspect_fit(320, 240, 640, 480), Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn page_without_image() {
        let list = reference_image(&PatternInput {
            width: 10,
            height: 10,
            ..PatternInput::default()
        });
        assert_eq!(list.commands(), &[DrawCommand::Clear([0.0; 4])]);
    }
}
