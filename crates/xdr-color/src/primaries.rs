//! Gamut primaries and conversion into the working space.
//!
//! The working space is linear BT.709 (scRGB). Both decodes are brought
//! there before they are mixed. All three gamuts share the D65 white point,
//! so no chromatic adaptation is needed.

use glam::{Mat3, Vec3};
use xdr_core::Gamut;

/// RGB primaries and white point as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Name
    pub name: &'static str,
}

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// BT.709 / sRGB primaries.
pub const BT709: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "BT.709",
};

/// Display P3 primaries (DCI-P3 with D65 white).
pub const DISPLAY_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// BT.2100 primaries (same as BT.2020).
pub const BT2100: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "BT.2100",
};

/// Primaries table entry for a gamut tag.
pub const fn primaries(gamut: Gamut) -> &'static Primaries {
    match gamut {
        Gamut::Bt709 => &BT709,
        Gamut::DisplayP3 => &DISPLAY_P3,
        Gamut::Bt2100 => &BT2100,
    }
}

fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// RGB to XYZ matrix for a set of primaries.
///
/// Columns are the primaries' XYZ, scaled so RGB (1, 1, 1) lands on the
/// white point with Y = 1.
pub fn rgb_to_xyz_matrix(p: &Primaries) -> Mat3 {
    let r = xy_to_xyz(p.r.0, p.r.1);
    let g = xy_to_xyz(p.g.0, p.g.1);
    let b = xy_to_xyz(p.b.0, p.b.1);
    let w = xy_to_xyz(p.w.0, p.w.1);

    let m = Mat3::from_cols(r, g, b);
    let s = m.inverse() * w;

    Mat3::from_cols(r * s.x, g * s.y, b * s.z)
}

/// XYZ to RGB matrix, inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(p: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(p).inverse()
}

/// Matrix converting linear RGB in `src` primaries to `dst` primaries.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    xyz_to_rgb_matrix(dst) * rgb_to_xyz_matrix(src)
}

/// Matrix from a gamut's linear RGB into linear BT.709.
///
/// BT.709 input gets the exact identity.
pub fn to_working_matrix(gamut: Gamut) -> Mat3 {
    match gamut {
        Gamut::Bt709 => Mat3::IDENTITY,
        other => rgb_to_rgb_matrix(primaries(other), &BT709),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn bt709_luminance_row() {
        let m = rgb_to_xyz_matrix(&BT709);
        // Y row is the Rec.709 luma weights
        let y = m.row(1);
        assert_abs_diff_eq!(y.x, 0.2126, epsilon = 1e-3);
        assert_abs_diff_eq!(y.y, 0.7152, epsilon = 1e-3);
        assert_abs_diff_eq!(y.z, 0.0722, epsilon = 1e-3);
    }

    #[test]
    fn white_is_preserved() {
        for gamut in Gamut::ALL {
            let w = to_working_matrix(gamut) * Vec3::ONE;
            assert_abs_diff_eq!(w.x, 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(w.y, 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(w.z, 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn wide_gamut_red_leaves_bt709() {
        // Saturated P3 and BT.2100 red are outside BT.709
        for gamut in [Gamut::DisplayP3, Gamut::Bt2100] {
            let red = to_working_matrix(gamut) * Vec3::X;
            assert!(red.x > 1.0, "{gamut}: {red}");
            assert!(red.y < 0.0, "{gamut}: {red}");
        }
    }

    #[test]
    fn p3_to_709_known_matrix() {
        let m = to_working_matrix(Gamut::DisplayP3);
        assert_abs_diff_eq!(m.x_axis.x, 1.2249, epsilon = 1e-3);
        assert_abs_diff_eq!(m.y_axis.x, -0.2247, epsilon = 1e-3);
        assert_abs_diff_eq!(m.y_axis.y, 1.0421, epsilon = 1e-3);
        assert_abs_diff_eq!(m.z_axis.z, 1.0983, epsilon = 1e-3);
    }
}
