//! SMPTE ST 2084 Perceptual Quantizer (PQ) transfer function.
//!
//! PQ encodes absolute luminance up to 10,000 cd/m2 in a perceptually
//! uniform way.
//!
//! # Range
//!
//! - Encoded: [0, 1]
//! - Linear: [0, 10000] cd/m2 (nits)
//!
//! Inputs outside the range go through the same formula. The only clamp is
//! the floor on `v^(1/m2) - c1`, which keeps the base of the final power
//! non-negative.
//!
//! # Reference
//!
//! SMPTE ST 2084:2014
//!
//! # Usage
//!
//! ```rust
//! use xdr_transfer::pq;
//!
//! let nits = pq::eotf(0.5);
//! let signal = pq::oetf(100.0);
//! assert!((signal - 0.508).abs() < 0.01);
//! ```

/// Maximum luminance in cd/m2 (nits).
pub const L_MAX: f32 = 10000.0;

const M1: f32 = 1305.0 / 8192.0;
const INV_M1: f32 = 8192.0 / 1305.0;
const M2: f32 = 2523.0 / 32.0;
const INV_M2: f32 = 32.0 / 2523.0;
const C1: f32 = 107.0 / 128.0;
const C2: f32 = 2413.0 / 128.0;
const C3: f32 = 2392.0 / 128.0;

/// PQ EOTF: decodes a PQ signal to absolute luminance (cd/m2).
///
/// # Example
///
/// ```rust
/// use xdr_transfer::pq::eotf;
///
/// assert_eq!(eotf(0.0), 0.0);
/// assert_eq!(eotf(1.0), 10000.0);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    let vp = v.powf(INV_M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;

    (num / den).powf(INV_M1) * L_MAX
}

/// PQ inverse EOTF: encodes absolute luminance (cd/m2) to a PQ signal.
#[inline]
pub fn oetf(l: f32) -> f32 {
    let yp = (l / L_MAX).powf(M1);
    let num = C1 + C2 * yp;
    let den = 1.0 + C3 * yp;

    (num / den).powf(M2)
}
