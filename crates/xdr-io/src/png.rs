//! PNG reference images and frame dumps.
//!
//! [`PngDecoder`] implements [`Decoder`] for plain PNG files. The source
//! curve is not read from the file; it is configured, either sRGB (the
//! usual 8-bit image) or PQ (a 16-bit HDR10-style still, nits on the ST 2084
//! scale). Palette, grayscale and low bit depth inputs are expanded to RGBA.
//!
//! [`write_frame`] dumps a rendered frame:
//!
//! - display-native frames as 8-bit RGBA, tagged sRGB
//! - scRGB frames as 16-bit RGBA PQ, `nits = value * 80`, BT.709 primaries
//!
//! # Example
//!
//! ```rust,ignore
//! use xdr_io::png::{write_frame, PngDecoder};
//! use xdr_io::Decoder;
//!
//! let bytes = std::fs::read("still.png")?;
//! let decoder = PngDecoder::pq();
//! let sdr = decoder.decode(&bytes, false, 1.0)?;
//! let hdr = decoder.decode(&bytes, true, 6.0)?;
//! write_frame("frame.png", &frame)?;
//! ```

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use half::f16;
use tracing::{debug, warn};
use xdr_core::{
    DecodeError, DecodeErrorCode, DecodedImage, FrameEncoding, Gamut, LinearImage, PixelData,
    CHANNELS,
};
use xdr_transfer::{pq, srgb, NITS_TO_SCRGB, SDR_WHITE_NITS};

use crate::decode::Decoder;
use crate::error::{IoError, IoResult};

/// Transfer curve of the source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceTransfer {
    /// sRGB-encoded SDR image.
    #[default]
    Srgb,
    /// SMPTE ST 2084 encoded HDR image.
    Pq,
}

impl SourceTransfer {
    /// Parses `srgb` or `pq`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "srgb" | "sdr" => Some(Self::Srgb),
            "pq" | "st2084" | "hdr10" => Some(Self::Pq),
            _ => None,
        }
    }

    /// Encoded [0, 1] value to linear scRGB.
    #[inline]
    fn to_linear(self, v: f32) -> f32 {
        match self {
            Self::Srgb => srgb::eotf(v),
            Self::Pq => pq::eotf(v) * NITS_TO_SCRGB,
        }
    }
}

/// PNG implementation of [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PngDecoder {
    /// Source curve.
    pub transfer: SourceTransfer,
    /// Gamut tag put on both decodes.
    pub gamut: Gamut,
}

impl PngDecoder {
    /// Creates a decoder.
    pub fn new(transfer: SourceTransfer, gamut: Gamut) -> Self {
        Self { transfer, gamut }
    }

    /// sRGB source, BT.709 primaries.
    pub fn srgb() -> Self {
        Self::new(SourceTransfer::Srgb, Gamut::Bt709)
    }

    /// PQ source, BT.2100 primaries.
    pub fn pq() -> Self {
        Self::new(SourceTransfer::Pq, Gamut::Bt2100)
    }
}

/// RGBA samples normalized to [0, 1], still in the source encoding.
struct EncodedRgba {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

fn stage_error(stage: &str, code: DecodeErrorCode, err: impl ToString) -> DecodeError {
    DecodeError::new(stage, code).with_detail(err.to_string())
}

fn read_encoded(bytes: &[u8]) -> Result<EncodedRgba, DecodeError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| stage_error("png_read_info", DecodeErrorCode::InvalidParam, e))?;

    let buf_size = reader.output_buffer_size().ok_or_else(|| {
        DecodeError::new("png_output_buffer", DecodeErrorCode::MemError)
            .with_detail("cannot determine output buffer size")
    })?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| stage_error("png_next_frame", DecodeErrorCode::InvalidParam, e))?;
    let buf = &buf[..info.buffer_size()];

    let samples: Vec<f32> = match info.bit_depth {
        png::BitDepth::Eight => buf.iter().map(|&b| b as f32 / 255.0).collect(),
        png::BitDepth::Sixteen => buf
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f32 / 65535.0)
            .collect(),
        other => {
            return Err(DecodeError::new("png_next_frame", DecodeErrorCode::UnsupportedFeature)
                .with_detail(format!("bit depth {other:?}")));
        }
    };

    let data: Vec<f32> = match info.color_type {
        png::ColorType::Rgba => samples,
        png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 1.0])
            .collect(),
        png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&g| [g, g, g, 1.0]).collect(),
        other => {
            return Err(DecodeError::new("png_next_frame", DecodeErrorCode::UnsupportedFeature)
                .with_detail(format!("color type {other:?}")));
        }
    };

    Ok(EncodedRgba {
        width: info.width,
        height: info.height,
        data,
    })
}

impl Decoder for PngDecoder {
    fn decode(
        &self,
        bytes: &[u8],
        want_linear: bool,
        max_boost: f32,
    ) -> Result<DecodedImage, DecodeError> {
        let src = read_encoded(bytes).inspect_err(|e| warn!(error = %e, "PNG decode failed"))?;
        let transfer = self.transfer;

        let pixels = if want_linear {
            let ceiling = if max_boost >= 1.0 { max_boost } else { f32::INFINITY };
            let data = src
                .data
                .chunks_exact(CHANNELS)
                .flat_map(|p| {
                    let lin = |v: f32| f16::from_f32(transfer.to_linear(v).min(ceiling));
                    [lin(p[0]), lin(p[1]), lin(p[2]), f16::from_f32(p[3])]
                })
                .collect();
            PixelData::RgbaF16(data)
        } else {
            let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            let data = src
                .data
                .chunks_exact(CHANNELS)
                .flat_map(|p| {
                    let enc = |v: f32| match transfer {
                        SourceTransfer::Srgb => quantize(v),
                        SourceTransfer::Pq => quantize(srgb::oetf(transfer.to_linear(v).min(1.0))),
                    };
                    [enc(p[0]), enc(p[1]), enc(p[2]), quantize(p[3])]
                })
                .collect();
            PixelData::Rgba8(data)
        };

        debug!(
            width = src.width,
            height = src.height,
            want_linear,
            max_boost,
            ?transfer,
            gamut = %self.gamut,
            "PNG decoded"
        );
        DecodedImage::new(src.width, src.height, self.gamut, pixels).map_err(|e| {
            DecodeError::new("png_wrap", DecodeErrorCode::InvalidParam).with_detail(e.to_string())
        })
    }
}

/// Encodes a frame as PNG bytes.
pub fn encode_frame(frame: &LinearImage) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, frame)?;
    Ok(out)
}

/// Writes a frame to a PNG file.
pub fn write_frame<P: AsRef<Path>>(path: P, frame: &LinearImage) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode_into(BufWriter::new(file), frame)?;
    debug!(path = %path.as_ref().display(), encoding = ?frame.encoding(), "frame written");
    Ok(())
}

fn encode_into<W: Write>(writer: W, frame: &LinearImage) -> IoResult<()> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(IoError::InvalidFrame(format!(
            "{}x{}",
            frame.width(),
            frame.height()
        )));
    }

    let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_compression(png::Compression::default());

    let bytes: Vec<u8> = match frame.encoding() {
        FrameEncoding::DisplayNative => {
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);
            frame
                .data()
                .iter()
                .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
                .collect()
        }
        FrameEncoding::ScRgb => {
            encoder.set_depth(png::BitDepth::Sixteen);
            frame
                .data()
                .chunks_exact(CHANNELS)
                .flat_map(|p| {
                    let q = |v: f32| -> u16 { (v.clamp(0.0, 1.0) * 65535.0).round() as u16 };
                    let enc = |v: f32| q(pq::oetf((v * SDR_WHITE_NITS).max(0.0)));
                    [enc(p[0]), enc(p[1]), enc(p[2]), q(p[3])]
                })
                .flat_map(u16::to_be_bytes)
                .collect()
        }
    };

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}
