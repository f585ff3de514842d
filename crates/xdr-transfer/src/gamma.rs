//! Pure power-law transfer functions.
//!
//! - 2.2: typical PC monitor response
//! - 2.4: BT.1886 reference EOTF
//!
//! # Range
//!
//! - Input/Output: [0, 1], extrapolated above

/// EOTF for an arbitrary gamma: `v^gamma`.
///
/// ```rust
/// use xdr_transfer::gamma::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    v.powf(gamma)
}

/// OETF for an arbitrary gamma: `l^(1/gamma)`.
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    l.powf(1.0 / gamma)
}

/// Gamma 2.2 EOTF.
#[inline]
pub fn eotf_22(v: f32) -> f32 {
    gamma_eotf(v, 2.2)
}

/// Gamma 2.2 OETF.
#[inline]
pub fn oetf_22(l: f32) -> f32 {
    gamma_oetf(l, 2.2)
}

/// Gamma 2.4 EOTF.
#[inline]
pub fn eotf_24(v: f32) -> f32 {
    gamma_eotf(v, 2.4)
}

/// Gamma 2.4 OETF.
#[inline]
pub fn oetf_24(l: f32) -> f32 {
    gamma_oetf(l, 2.4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 50.0;
            assert!((oetf_22(eotf_22(v)) - v).abs() < 1e-5);
            assert!((oetf_24(eotf_24(v)) - v).abs() < 1e-5);
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(eotf_22(0.0), 0.0);
        assert_eq!(eotf_24(1.0), 1.0);
        assert_eq!(oetf_22(1.0), 1.0);
    }
}
