//! Peak scan of a full-range decode.
//!
//! The peak is the largest R, G or B value anywhere in the buffer. Alpha is
//! ignored. Every pixel is visited. The maximum is tracked in half precision,
//! the storage format of the full-range decode, so the result is exactly one
//! of the stored values. NaN and negative values never raise the peak.
//!
//! Channel max is associative and commutative, so the row-partitioned
//! parallel scan returns the same value as the serial one.

use half::f16;
use tracing::trace;
use xdr_core::{DecodedImage, PixelData, CHANNELS};
use xdr_transfer::srgb;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[inline]
fn row_peak_f16(row: &[f16], width: usize) -> f16 {
    let mut peak = f16::ZERO;
    for px in row[..width * CHANNELS].chunks_exact(CHANNELS) {
        for &c in &px[..3] {
            if c > peak {
                peak = c;
            }
        }
    }
    peak
}

#[inline]
fn row_peak_u8(row: &[u8], width: usize) -> u8 {
    row[..width * CHANNELS]
        .chunks_exact(CHANNELS)
        .map(|px| px[0].max(px[1]).max(px[2]))
        .max()
        .unwrap_or(0)
}

#[inline]
fn max_f16(a: f16, b: f16) -> f16 {
    if b > a { b } else { a }
}

/// Serial peak scan, linear scRGB.
///
/// 8-bit buffers are display-encoded; their peak is linearized with the sRGB
/// curve and can never exceed 1.0.
pub fn scan_peak_serial(image: &DecodedImage) -> f32 {
    let width = image.width() as usize;
    let stride = image.stride();
    match image.pixels() {
        PixelData::RgbaF16(data) => data
            .chunks(stride)
            .take(image.height() as usize)
            .map(|row| row_peak_f16(row, width))
            .fold(f16::ZERO, max_f16)
            .to_f32(),
        PixelData::Rgba8(data) => {
            let code = data
                .chunks(stride)
                .take(image.height() as usize)
                .map(|row| row_peak_u8(row, width))
                .max()
                .unwrap_or(0);
            srgb::eotf(code as f32 / 255.0)
        }
    }
}

/// Row-partitioned parallel peak scan, same result as [`scan_peak_serial`].
#[cfg(feature = "parallel")]
pub fn scan_peak_parallel(image: &DecodedImage) -> f32 {
    let width = image.width() as usize;
    let stride = image.stride();
    match image.pixels() {
        PixelData::RgbaF16(data) => data
            .par_chunks(stride)
            .take(image.height() as usize)
            .map(|row| row_peak_f16(row, width))
            .reduce(|| f16::ZERO, max_f16)
            .to_f32(),
        PixelData::Rgba8(_) => scan_peak_serial(image),
    }
}

/// Peak of a decoded buffer in scRGB, using the parallel scan when enabled.
pub fn peak_hdr(image: &DecodedImage) -> f32 {
    #[cfg(feature = "parallel")]
    let peak = scan_peak_parallel(image);
    #[cfg(not(feature = "parallel"))]
    let peak = scan_peak_serial(image);

    trace!(width = image.width(), height = image.height(), peak, "peak scan");
    peak
}

#[cfg(test)]
mod tests {
    use super::*;
    use xdr_core::Gamut;

    fn f16_image(width: u32, height: u32, stride: usize, values: &[(usize, f32)]) -> DecodedImage {
        let len = stride * (height as usize - 1) + width as usize * CHANNELS;
        let mut data = vec![f16::from_f32(0.25); len];
        for &(i, v) in values {
            data[i] = f16::from_f32(v);
        }
        DecodedImage::with_stride(width, height, stride, Gamut::Bt709, PixelData::RgbaF16(data))
            .unwrap()
    }

    #[test]
    fn finds_max_in_any_channel() {
        // blue channel of the last pixel
        let img = f16_image(3, 3, 12, &[(2 * 12 + 2 * 4 + 2, 7.5)]);
        assert_eq!(scan_peak_serial(&img), 7.5);
    }

    #[test]
    fn ignores_alpha_and_padding() {
        // alpha of pixel 0 and the padding after row 0
        let img = f16_image(2, 2, 10, &[(3, 100.0), (8, 200.0), (9, 300.0)]);
        assert_eq!(scan_peak_serial(&img), 0.25);
    }

    #[test]
    fn ignores_nan_and_negatives() {
        let img = f16_image(2, 1, 8, &[(0, f32::NAN), (1, -5.0), (4, 1.5)]);
        assert_eq!(scan_peak_serial(&img), 1.5);
    }

    #[test]
    fn peak_is_stored_half_value() {
        let img = f16_image(1, 1, 4, &[(0, 3.3333)]);
        assert_eq!(scan_peak_serial(&img), f16::from_f32(3.3333).to_f32());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_serial() {
        let width = 37u32;
        let height = 53u32;
        let stride = width as usize * CHANNELS + 4;
        let marks: Vec<(usize, f32)> = (0..height as usize)
            .map(|y| (y * stride + (y % width as usize) * CHANNELS + y % 3, y as f32 * 0.37))
            .collect();
        let img = f16_image(width, height, stride, &marks);
        assert_eq!(scan_peak_parallel(&img), scan_peak_serial(&img));
        assert_eq!(peak_hdr(&img), scan_peak_serial(&img));
    }

    #[test]
    fn rgba8_peak_is_linearized() {
        let img = DecodedImage::new(
            2,
            1,
            Gamut::Bt709,
            PixelData::Rgba8(vec![10, 128, 20, 255, 0, 0, 0, 255]),
        )
        .unwrap();
        let expected = srgb::eotf(128.0 / 255.0);
        assert_eq!(scan_peak_serial(&img), expected);
    }
}
