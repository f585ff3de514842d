//! Decoder interface.
//!
//! A reference image is decoded twice per load: once SDR-clamped
//! (`want_linear == false`), once full range (`want_linear == true`) with
//! a boost ceiling. Gain-map codecs, PNG readers or test doubles all plug in
//! through [`Decoder`].

use xdr_core::{DecodeError, DecodedImage};

/// Turns encoded bytes into a [`DecodedImage`].
pub trait Decoder: Send + Sync {
    /// Decodes `bytes`.
    ///
    /// * `want_linear` - `false`: RGBA8 display-encoded, clipped to SDR
    ///   white. `true`: half-float linear scRGB, full range.
    /// * `max_boost` - ceiling on the full-range pass in scRGB; values
    ///   below 1 mean no ceiling.
    fn decode(
        &self,
        bytes: &[u8],
        want_linear: bool,
        max_boost: f32,
    ) -> Result<DecodedImage, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn decode(
        &self,
        bytes: &[u8],
        want_linear: bool,
        max_boost: f32,
    ) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes, want_linear, max_boost)
    }
}

impl<D: Decoder + ?Sized> Decoder for std::sync::Arc<D> {
    fn decode(
        &self,
        bytes: &[u8],
        want_linear: bool,
        max_boost: f32,
    ) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes, want_linear, max_boost)
    }
}
