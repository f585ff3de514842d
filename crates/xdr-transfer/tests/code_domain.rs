//! Code-domain validation against double precision reference formulas.
//!
//! PQ spreads codes over [0, 1023]; the sRGB and gamma variants put 80 nits
//! at code 255 and extrapolate beyond it.

use xdr_transfer::Eotf;

fn pq_nits_f64(code: f64) -> f64 {
    let p = (code / 1023.0).powf(32.0 / 2523.0);
    let num = (p - 107.0 / 128.0).max(0.0);
    let den = 2413.0 / 128.0 - 2392.0 / 128.0 * p;
    (num / den).powf(8192.0 / 1305.0) * 10000.0
}

fn srgb_nits_f64(code: f64) -> f64 {
    let v = code / 255.0;
    let l = if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    };
    l * 80.0
}

fn gamma_nits_f64(code: f64, gamma: f64) -> f64 {
    (code / 255.0).powf(gamma) * 80.0
}

fn check(eotf: Eotf, reference: impl Fn(f64) -> f64) {
    for code in (0..=1023).step_by(7) {
        let expected = reference(code as f64);
        let got = eotf.to_nits(code as f32) as f64;
        let tol = expected.abs() * 1e-4 + 1e-6;
        assert!(
            (got - expected).abs() <= tol,
            "{eotf:?} code {code}: got {got}, expected {expected}"
        );
    }
}

#[test]
fn pq_matches_reference() {
    check(Eotf::Pq, pq_nits_f64);
}

#[test]
fn srgb_matches_reference() {
    check(Eotf::Srgb, srgb_nits_f64);
}

#[test]
fn gamma_matches_reference() {
    check(Eotf::Gamma22, |c| gamma_nits_f64(c, 2.2));
    check(Eotf::Gamma24, |c| gamma_nits_f64(c, 2.4));
}

#[test]
fn pq_brackets_sdr_white() {
    // 80 nits sits between PQ codes 497 and 498
    assert!(Eotf::Pq.to_nits(497.0) < 80.0);
    assert!(Eotf::Pq.to_nits(498.0) > 80.0);
    assert_eq!(Eotf::Pq.to_code(80.0).round(), 497.0);
}

#[test]
fn scrgb_is_nits_over_80() {
    for eotf in Eotf::ALL {
        for code in [0.0, 64.0, 255.0, 700.0] {
            let n = eotf.to_nits(code);
            assert!((eotf.to_scrgb(code) - n / 80.0).abs() <= n * 1e-6);
        }
    }
}
