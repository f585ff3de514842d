//! Floating point rectangles for draw lists.
//!
//! Coordinates are in device pixels with the origin at the top-left corner.
//! Fractional values are allowed; rasterization decides how edges snap.

/// Axis-aligned rectangle, origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when width or height is not positive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns true if the point lies inside.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Snaps the rectangle to whole pixels and clips it to a `width`x`height`
    /// surface. Returns `(x0, y0, x1, y1)` with exclusive ends, or `None` when
    /// nothing is left.
    pub fn to_pixel_span(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let clip = |v: f32, max: u32| -> u32 { v.round().clamp(0.0, max as f32) as u32 };
        let x0 = clip(self.x, width);
        let y0 = clip(self.y, height);
        let x1 = clip(self.right(), width);
        let y1 = clip(self.bottom(), height);
        (x1 > x0 && y1 > y0).then_some((x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges() {
        let r = Rect::new(10.0, 20.0, 5.0, 7.5);
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.bottom(), 27.5);
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(15.0, 20.0));
        assert!(Rect::new(0.0, 0.0, 0.0, 3.0).is_empty());
    }

    #[test]
    fn pixel_span_clips_and_rounds() {
        let r = Rect::new(-3.0, 1.4, 10.6, 2.2);
        assert_eq!(r.to_pixel_span(5, 5), Some((0, 1, 5, 4)));

        let outside = Rect::new(10.0, 0.0, 4.0, 4.0);
        assert_eq!(outside.to_pixel_span(5, 5), None);
    }
}
