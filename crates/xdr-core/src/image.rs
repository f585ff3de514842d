//! Pixel buffers.
//!
//! Two buffer shapes move through the workspace:
//!
//! - [`DecodedImage`] is what a decoder hands back: RGBA, either 8-bit
//!   display-encoded (sRGB) or half-float linear scRGB, with an explicit row
//!   stride and a [`Gamut`] tag. The pixel storage is shared behind an
//!   [`Arc`] and never mutated; a new load replaces the whole value.
//! - [`LinearImage`] is an RGBA `f32` frame ready for an output surface,
//!   tagged with the [`FrameEncoding`] its values are expressed in.

use std::sync::Arc;

use half::f16;

use crate::error::{Error, Result};
use crate::gamut::Gamut;

/// Number of channels in every buffer (RGBA).
pub const CHANNELS: usize = 4;

/// Storage of a decoded buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    /// 8-bit RGBA, display-encoded with the sRGB curve, nominal range [0, 1].
    Rgba8(Vec<u8>),
    /// Half-float RGBA, linear scRGB (1.0 == 80 nits), unclamped.
    RgbaF16(Vec<f16>),
}

impl PixelData {
    /// Number of stored elements.
    pub fn len(&self) -> usize {
        match self {
            PixelData::Rgba8(v) => v.len(),
            PixelData::RgbaF16(v) => v.len(),
        }
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for linear storage.
    pub fn is_linear(&self) -> bool {
        matches!(self, PixelData::RgbaF16(_))
    }

    /// Bytes per element.
    pub fn element_size(&self) -> usize {
        match self {
            PixelData::Rgba8(_) => 1,
            PixelData::RgbaF16(_) => 2,
        }
    }
}

/// One pass of a decoded reference image.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    stride: usize,
    gamut: Gamut,
    pixels: Arc<PixelData>,
}

impl DecodedImage {
    /// Wraps tightly packed RGBA data.
    pub fn new(width: u32, height: u32, gamut: Gamut, pixels: PixelData) -> Result<Self> {
        Self::with_stride(width, height, width as usize * CHANNELS, gamut, pixels)
    }

    /// Wraps RGBA data whose rows are `stride` elements apart.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        gamut: Gamut,
        pixels: PixelData,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero-sized image"));
        }
        let min_stride = width as usize * CHANNELS;
        if stride < min_stride {
            return Err(Error::InvalidStride {
                stride,
                min_stride,
                width,
            });
        }
        // The last row only needs to hold its pixels, not the full stride.
        let expected = stride * (height as usize - 1) + min_stride;
        if pixels.len() < expected {
            return Err(Error::BufferTooSmall {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            gamut,
            pixels: Arc::new(pixels),
        })
    }

    /// Image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row stride in elements.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Gamut tag.
    #[inline]
    pub fn gamut(&self) -> Gamut {
        self.gamut
    }

    /// Raw storage.
    #[inline]
    pub fn pixels(&self) -> &PixelData {
        &self.pixels
    }

    /// Pixel at `(x, y)` as stored, widened to `f32`.
    ///
    /// 8-bit values are divided by 255 and stay display-encoded.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let i = y as usize * self.stride + x as usize * CHANNELS;
        match self.pixels.as_ref() {
            PixelData::Rgba8(v) => {
                let p = &v[i..i + CHANNELS];
                [p[0], p[1], p[2], p[3]].map(|c| c as f32 / 255.0)
            }
            PixelData::RgbaF16(v) => {
                let p = &v[i..i + CHANNELS];
                [p[0], p[1], p[2], p[3]].map(f16::to_f32)
            }
        }
    }
}

/// Value domain of a frame handed to the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameEncoding {
    /// Values are already in the monitor's native encoding, [0, 1].
    DisplayNative,
    /// Linear scRGB, 1.0 == 80 nits, may exceed 1.0.
    ScRgb,
}

/// RGBA `f32` frame, tightly packed.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearImage {
    width: u32,
    height: u32,
    encoding: FrameEncoding,
    data: Vec<f32>,
}

impl LinearImage {
    /// Creates a frame filled with transparent black.
    pub fn new(width: u32, height: u32, encoding: FrameEncoding) -> Self {
        Self::filled(width, height, encoding, [0.0; 4])
    }

    /// Creates a frame filled with one color.
    pub fn filled(width: u32, height: u32, encoding: FrameEncoding, rgba: [f32; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            encoding,
            data,
        }
    }

    /// Wraps existing RGBA data.
    pub fn from_data(
        width: u32,
        height: u32,
        encoding: FrameEncoding,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferTooSmall {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            encoding,
            data,
        })
    }

    /// Frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value domain.
    #[inline]
    pub fn encoding(&self) -> FrameEncoding {
        self.encoding
    }

    /// RGBA data, row-major.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable RGBA data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Writes one pixel.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [f32; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Fills the half-open span `[x0, x1) x [y0, y1)`, clipped to the
    /// image. An inverted span fills nothing.
    pub fn fill_span(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, rgba: [f32; 4]) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let row_len = self.width as usize * CHANNELS;
        for y in y0..y1 {
            let row = &mut self.data[y as usize * row_len..(y as usize + 1) * row_len];
            for px in row[x0 as usize * CHANNELS..x1 as usize * CHANNELS].chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_rejects_short_buffer() {
        let err = DecodedImage::new(2, 2, Gamut::Bt709, PixelData::Rgba8(vec![0; 15]));
        assert!(matches!(err, Err(Error::BufferTooSmall { expected: 16, got: 15 })));
    }

    #[test]
    fn decoded_rejects_narrow_stride() {
        let err = DecodedImage::with_stride(4, 1, 12, Gamut::Bt709, PixelData::Rgba8(vec![0; 16]));
        assert!(matches!(err, Err(Error::InvalidStride { .. })));
    }

    #[test]
    fn decoded_reads_through_stride() {
        // 1x2 image with 8 elements per row, padding between rows
        let data = vec![
            f16::from_f32(0.5), f16::ONE, f16::ZERO, f16::ONE,
            f16::ZERO, f16::ZERO, f16::ZERO, f16::ZERO,
            f16::from_f32(2.0), f16::ZERO, f16::ONE, f16::ONE,
        ];
        let img = DecodedImage::with_stride(1, 2, 8, Gamut::Bt2100, PixelData::RgbaF16(data))
            .unwrap();
        assert_eq!(img.pixel(0, 0), [0.5, 1.0, 0.0, 1.0]);
        assert_eq!(img.pixel(0, 1), [2.0, 0.0, 1.0, 1.0]);
        assert!(img.pixels().is_linear());
    }

    #[test]
    fn rgba8_pixel_normalized() {
        let img = DecodedImage::new(1, 1, Gamut::Bt709, PixelData::Rgba8(vec![255, 0, 51, 255]))
            .unwrap();
        assert_eq!(img.pixel(0, 0), [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn linear_fill_span() {
        let mut img = LinearImage::new(4, 3, FrameEncoding::ScRgb);
        img.fill_span(1, 1, 3, 9, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(img.pixel(0, 0), [0.0; 4]);
        assert_eq!(img.pixel(1, 1), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(img.pixel(2, 2), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(img.pixel(3, 2), [0.0; 4]);
    }

    #[test]
    fn linear_fill_span_out_of_range_start() {
        let mut img = LinearImage::new(4, 3, FrameEncoding::ScRgb);
        img.fill_span(6, 0, 9, 3, [1.0; 4]);
        img.fill_span(3, 2, 1, 1, [1.0; 4]);
        img.fill_span(2, 5, 4, 9, [1.0; 4]);
        assert!(img.data().iter().all(|&v| v == 0.0));
    }
}
