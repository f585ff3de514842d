//! Composite of a decoded reference image pair.
//!
//! [`ReferencePair`] owns the two decodes of one loaded image plus the peak
//! measured when it was built. [`composite`] brings both into linear BT.709,
//! applies [`BlendParams`] and returns a frame in the requested encoding:
//!
//! - [`FrameEncoding::ScRgb`]: the blended linear values as they are.
//! - [`FrameEncoding::DisplayNative`]: clipped to [0, 1] and encoded with
//!   the gamma 2.2 curve of an SDR desktop.

use glam::{Mat3, Vec3};
use tracing::debug;
use xdr_core::{DecodedImage, FrameEncoding, LinearImage, CHANNELS};
use xdr_transfer::{gamma, srgb};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::blend::BlendParams;
use crate::error::{ColorError, ColorResult};
use crate::peak::peak_hdr;
use crate::primaries::to_working_matrix;

/// The two decodes of one reference image.
#[derive(Debug, Clone)]
pub struct ReferencePair {
    sdr: DecodedImage,
    hdr: DecodedImage,
    peak_hdr: f32,
}

impl ReferencePair {
    /// Pairs two decodes and measures the full-range peak.
    pub fn new(sdr: DecodedImage, hdr: DecodedImage) -> ColorResult<Self> {
        if sdr.dimensions() != hdr.dimensions() {
            return Err(ColorError::DimensionMismatch {
                sdr_width: sdr.width(),
                sdr_height: sdr.height(),
                hdr_width: hdr.width(),
                hdr_height: hdr.height(),
            });
        }
        let peak_hdr = peak_hdr(&hdr);
        debug!(
            width = sdr.width(),
            height = sdr.height(),
            sdr_gamut = %sdr.gamut(),
            hdr_gamut = %hdr.gamut(),
            peak_hdr,
            "reference pair"
        );
        Ok(Self { sdr, hdr, peak_hdr })
    }

    /// SDR-clamped decode.
    pub fn sdr(&self) -> &DecodedImage {
        &self.sdr
    }

    /// Full-range decode.
    pub fn hdr(&self) -> &DecodedImage {
        &self.hdr
    }

    /// Brightest channel value of the full-range decode, scRGB.
    pub fn peak_hdr(&self) -> f32 {
        self.peak_hdr
    }

    /// `(width, height)` shared by both decodes.
    pub fn dimensions(&self) -> (u32, u32) {
        self.sdr.dimensions()
    }
}

/// Reads a pixel of a decode in linear BT.709.
struct WorkingReader<'a> {
    image: &'a DecodedImage,
    matrix: Mat3,
    identity: bool,
}

impl<'a> WorkingReader<'a> {
    fn new(image: &'a DecodedImage) -> Self {
        let matrix = to_working_matrix(image.gamut());
        Self {
            image,
            matrix,
            identity: matrix == Mat3::IDENTITY,
        }
    }

    #[inline]
    fn read(&self, x: u32, y: u32) -> [f32; 4] {
        let [r, g, b, a] = self.image.pixel(x, y);
        let rgb = if self.image.pixels().is_linear() {
            [r, g, b]
        } else {
            srgb::eotf_rgb([r, g, b])
        };
        if self.identity {
            return [rgb[0], rgb[1], rgb[2], a];
        }
        let v = self.matrix * Vec3::from_array(rgb);
        [v.x, v.y, v.z, a]
    }
}

#[inline]
fn encode_pixel(px: [f32; 4], encoding: FrameEncoding) -> [f32; 4] {
    match encoding {
        FrameEncoding::ScRgb => px,
        FrameEncoding::DisplayNative => {
            let enc = |c: f32| gamma::oetf_22(c.clamp(0.0, 1.0));
            [enc(px[0]), enc(px[1]), enc(px[2]), px[3].clamp(0.0, 1.0)]
        }
    }
}

fn composite_row(
    row: &mut [f32],
    y: u32,
    sdr: &WorkingReader<'_>,
    hdr: &WorkingReader<'_>,
    params: &BlendParams,
    encoding: FrameEncoding,
) {
    for (x, out) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let x = x as u32;
        let px = params.apply(sdr.read(x, y), hdr.read(x, y));
        out.copy_from_slice(&encode_pixel(px, encoding));
    }
}

/// Blends a reference pair into a frame of its own size.
pub fn composite(
    pair: &ReferencePair,
    params: &BlendParams,
    encoding: FrameEncoding,
) -> LinearImage {
    let (width, height) = pair.dimensions();
    debug!(width, height, weight = params.weight, white_scale = params.white_scale, ?encoding, "composite");

    let sdr = WorkingReader::new(&pair.sdr);
    let hdr = WorkingReader::new(&pair.hdr);
    let mut out = LinearImage::new(width, height, encoding);
    let row_len = width as usize * CHANNELS;

    #[cfg(feature = "parallel")]
    out.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| composite_row(row, y as u32, &sdr, &hdr, params, encoding));

    #[cfg(not(feature = "parallel"))]
    out.data_mut()
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| composite_row(row, y as u32, &sdr, &hdr, params, encoding));

    out
}
