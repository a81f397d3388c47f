//! The CIE conversion graph.
//!
//! Pairwise converters between CIE XYZ and its derived representations:
//!
//! ```text
//!            xyY      u'v'
//!             ^        ^
//!             |        |
//!  LCHab <-> Lab <-> XYZ <-> Luv <-> LCHuv
//! ```
//!
//! Every white-point dependent step takes the reference white as XYZ with
//! `Y = 1`. XYZ components are relative (`Y = 1` for the perfect diffuser),
//! lightness is on `[0, 100]`.
//!
//! # Constants
//!
//! Lab and Luv use the exact CIE constants rather than the rounded
//! `0.008856` / `903.3` pair, so the two branches meet continuously:
//!
//! - `EPSILON = 216 / 24389`
//! - `KAPPA = 24389 / 27`
//!
//! # Usage
//!
//! ```rust
//! use chroma_color::convert::{xyz_to_lab, lab_to_lch, lch_to_lab, lab_to_xyz};
//! use chroma_math::Vec3;
//!
//! let d65 = Vec3::new(0.95047, 1.0, 1.08883);
//! let lab = xyz_to_lab(Vec3::new(0.2, 0.3, 0.1), d65).unwrap();
//! let lch = lab_to_lch(lab).unwrap();
//! let back = lab_to_xyz(lch_to_lab(lch).unwrap(), d65).unwrap();
//! assert!((back.y - 0.3).abs() < 1e-12);
//! ```

use chroma_math::Vec3;

use crate::{ColorError, ColorResult};

/// CIE threshold between the linear and cube-root branches.
pub const EPSILON: f64 = 216.0 / 24389.0;

/// CIE slope of the linear branch.
pub const KAPPA: f64 = 24389.0 / 27.0;

// ============================================================================
// Validation
// ============================================================================

fn check_finite(operation: &'static str, v: Vec3) -> ColorResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ColorError::domain(operation, v, "components must be finite"))
    }
}

fn check_lightness(operation: &'static str, v: Vec3) -> ColorResult<()> {
    if v.x < 0.0 {
        return Err(ColorError::domain(operation, v, "lightness must be non-negative"));
    }
    Ok(())
}

fn check_white(operation: &'static str, white: Vec3) -> ColorResult<()> {
    if !white.is_finite() || white.min_element() <= 0.0 {
        return Err(ColorError::domain(
            operation,
            white,
            "reference white must be finite and positive",
        ));
    }
    Ok(())
}

// ============================================================================
// Chromaticity
// ============================================================================

/// XYZ to xyY.
///
/// Black (`X + Y + Z = 0`) takes the chromaticity of `white`.
pub fn xyz_to_xyy(xyz: Vec3, white: Vec3) -> ColorResult<Vec3> {
    check_finite("XYZ -> xyY", xyz)?;
    let sum = xyz.sum();
    if sum.abs() < 1e-15 {
        let ws = white.sum();
        if ws.abs() < 1e-15 {
            return Err(ColorError::domain("XYZ -> xyY", white, "degenerate white"));
        }
        return Ok(Vec3::new(white.x / ws, white.y / ws, 0.0));
    }
    Ok(Vec3::new(xyz.x / sum, xyz.y / sum, xyz.y))
}

/// xyY to XYZ.
pub fn xyy_to_xyz(xyy: Vec3) -> ColorResult<Vec3> {
    check_finite("xyY -> XYZ", xyy)?;
    let Vec3 { x, y, z: big_y } = xyy;
    if y.abs() < 1e-15 {
        if big_y.abs() < 1e-15 {
            return Ok(Vec3::ZERO);
        }
        return Err(ColorError::domain("xyY -> XYZ", xyy, "y chromaticity is zero"));
    }
    Ok(Vec3::new(x * big_y / y, big_y, (1.0 - x - y) * big_y / y))
}

/// XYZ to CIE 1976 u'v' chromaticity.
///
/// Returns `(0, 0)` for black.
pub fn xyz_to_uv(xyz: Vec3) -> (f64, f64) {
    let d = xyz.x + 15.0 * xyz.y + 3.0 * xyz.z;
    if d.abs() < 1e-15 {
        (0.0, 0.0)
    } else {
        (4.0 * xyz.x / d, 9.0 * xyz.y / d)
    }
}

/// XYZ to CIE 1960 uv chromaticity (used for CCT).
pub fn xyz_to_uv_1960(xyz: Vec3) -> (f64, f64) {
    let (u, v) = xyz_to_uv(xyz);
    (u, v * 2.0 / 3.0)
}

// ============================================================================
// CIELAB
// ============================================================================

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPSILON { f3 } else { (116.0 * f - 16.0) / KAPPA }
}

/// XYZ to CIELAB against the reference `white`.
pub fn xyz_to_lab(xyz: Vec3, white: Vec3) -> ColorResult<Vec3> {
    check_finite("XYZ -> Lab", xyz)?;
    check_white("XYZ -> Lab", white)?;

    let fx = lab_f(xyz.x / white.x);
    let fy = lab_f(xyz.y / white.y);
    let fz = lab_f(xyz.z / white.z);

    Ok(Vec3::new(
        116.0 * fy - 16.0,
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    ))
}

/// CIELAB to XYZ against the reference `white`.
///
/// L* above 100 and any a*, b* pass through. They may land outside the
/// spectral locus, with negative X or Z.
///
/// # Errors
///
/// [`ColorError::Domain`] for non-finite components, L* < 0 or an invalid
/// white.
pub fn lab_to_xyz(lab: Vec3, white: Vec3) -> ColorResult<Vec3> {
    check_finite("Lab -> XYZ", lab)?;
    check_lightness("Lab -> XYZ", lab)?;
    check_white("Lab -> XYZ", white)?;

    let l = lab.x;
    let fy = (l + 16.0) / 116.0;
    let fx = lab.y / 500.0 + fy;
    let fz = fy - lab.z / 200.0;

    let yr = if l > KAPPA * EPSILON { fy * fy * fy } else { l / KAPPA };

    Ok(Vec3::new(
        lab_f_inv(fx) * white.x,
        yr * white.y,
        lab_f_inv(fz) * white.z,
    ))
}

// ============================================================================
// Polar forms
// ============================================================================

/// Cartesian (L, a, b) to polar (L, C, h) with `h` in degrees on `[0, 360)`.
///
/// Shared by LCHab and LCHuv.
pub fn lab_to_lch(lab: Vec3) -> ColorResult<Vec3> {
    check_finite("Lab -> LCH", lab)?;
    let c = lab.y.hypot(lab.z);
    let mut h = lab.z.atan2(lab.y).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    // -0.0 ulps can round up to exactly 360
    if h >= 360.0 {
        h -= 360.0;
    }
    Ok(Vec3::new(lab.x, c, h))
}

/// Polar (L, C, h) to Cartesian (L, a, b).
pub fn lch_to_lab(lch: Vec3) -> ColorResult<Vec3> {
    check_finite("LCH -> Lab", lch)?;
    let h = lch.z.to_radians();
    Ok(Vec3::new(lch.x, lch.y * h.cos(), lch.y * h.sin()))
}

// ============================================================================
// CIELUV
// ============================================================================

/// XYZ to CIELUV against the reference `white`.
pub fn xyz_to_luv(xyz: Vec3, white: Vec3) -> ColorResult<Vec3> {
    check_finite("XYZ -> Luv", xyz)?;
    check_white("XYZ -> Luv", white)?;

    let yr = xyz.y / white.y;
    let l = if yr > EPSILON { 116.0 * yr.cbrt() - 16.0 } else { KAPPA * yr };

    let (u, v) = xyz_to_uv(xyz);
    let (uw, vw) = xyz_to_uv(white);
    if xyz.x + 15.0 * xyz.y + 3.0 * xyz.z == 0.0 {
        return Ok(Vec3::new(l, 0.0, 0.0));
    }
    Ok(Vec3::new(l, 13.0 * l * (u - uw), 13.0 * l * (v - vw)))
}

/// CIELUV to XYZ against the reference `white`.
///
/// L* above 100 and any u*, v* pass through. L* = 0 is black whatever the
/// chroma.
///
/// # Errors
///
/// [`ColorError::Domain`] for non-finite components, L* < 0, an invalid
/// white or a zero v' chromaticity.
pub fn luv_to_xyz(luv: Vec3, white: Vec3) -> ColorResult<Vec3> {
    check_finite("Luv -> XYZ", luv)?;
    check_lightness("Luv -> XYZ", luv)?;
    check_white("Luv -> XYZ", white)?;

    let l = luv.x;
    if l == 0.0 {
        return Ok(Vec3::ZERO);
    }
    let y = if l > KAPPA * EPSILON {
        ((l + 16.0) / 116.0).powi(3)
    } else {
        l / KAPPA
    } * white.y;

    let (uw, vw) = xyz_to_uv(white);
    let u = luv.y / (13.0 * l) + uw;
    let v = luv.z / (13.0 * l) + vw;
    if v.abs() < 1e-15 {
        return Err(ColorError::domain("Luv -> XYZ", luv, "v' chromaticity is zero"));
    }

    Ok(Vec3::new(
        y * 9.0 * u / (4.0 * v),
        y,
        y * (12.0 - 3.0 * u - 20.0 * v) / (4.0 * v),
    ))
}

/// CIE 1976 color difference (Euclidean distance in Lab).
#[inline]
pub fn delta_e_76(a: Vec3, b: Vec3) -> f64 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);
    const D50: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);

    fn assert_vec(a: Vec3, b: Vec3, eps: f64) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = eps);
        assert_abs_diff_eq!(a.y, b.y, epsilon = eps);
        assert_abs_diff_eq!(a.z, b.z, epsilon = eps);
    }

    #[test]
    fn test_lab_white_and_black() {
        assert_vec(xyz_to_lab(D65, D65).unwrap(), Vec3::new(100.0, 0.0, 0.0), 1e-12);
        assert_vec(xyz_to_lab(Vec3::ZERO, D65).unwrap(), Vec3::ZERO, 1e-12);
    }

    #[test]
    fn test_lab_reference_value() {
        // sRGB (1, 0, 0) red under D65
        let red = Vec3::new(0.4124564, 0.2126729, 0.0193339);
        let lab = xyz_to_lab(red, D65).unwrap();
        assert_abs_diff_eq!(lab.x, 53.2408, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.y, 80.0925, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.z, 67.2032, epsilon = 1e-3);
    }

    #[test]
    fn test_lab_roundtrip_both_branches() {
        for xyz in [
            Vec3::new(0.2, 0.3, 0.1),
            Vec3::new(0.001, 0.002, 0.0005),
            Vec3::new(0.9, 0.95, 1.0),
        ] {
            let back = lab_to_xyz(xyz_to_lab(xyz, D50).unwrap(), D50).unwrap();
            assert_vec(back, xyz, 1e-12);
        }
    }

    #[test]
    fn test_luv_roundtrip() {
        for xyz in [
            Vec3::new(0.2, 0.3, 0.1),
            Vec3::new(0.004, 0.005, 0.003),
            Vec3::new(0.7, 0.5, 0.9),
        ] {
            let back = luv_to_xyz(xyz_to_luv(xyz, D65).unwrap(), D65).unwrap();
            assert_vec(back, xyz, 1e-12);
        }
        assert_vec(luv_to_xyz(Vec3::ZERO, D65).unwrap(), Vec3::ZERO, 0.0);
    }

    #[test]
    fn test_luv_white() {
        let luv = xyz_to_luv(D65, D65).unwrap();
        assert_vec(luv, Vec3::new(100.0, 0.0, 0.0), 1e-10);
    }

    #[test]
    fn test_lch_hue_range() {
        for (a, b) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0), (-1.0, -0.0), (3.0, -1e-17)] {
            let lch = lab_to_lch(Vec3::new(50.0, a, b)).unwrap();
            assert!((0.0..360.0).contains(&lch.z), "h = {}", lch.z);
        }
        let lch = lab_to_lch(Vec3::new(50.0, 0.0, -10.0)).unwrap();
        assert_abs_diff_eq!(lch.z, 270.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lch_roundtrip() {
        let lab = Vec3::new(62.0, -31.5, 48.25);
        let back = lch_to_lab(lab_to_lch(lab).unwrap()).unwrap();
        assert_vec(back, lab, 1e-12);
    }

    #[test]
    fn test_xyy_roundtrip_and_black() {
        let xyz = Vec3::new(0.3, 0.4, 0.5);
        assert_vec(xyy_to_xyz(xyz_to_xyy(xyz, D65).unwrap()).unwrap(), xyz, 1e-14);
        let black = xyz_to_xyy(Vec3::ZERO, D65).unwrap();
        assert_abs_diff_eq!(black.x, 0.31273, epsilon = 1e-4);
        assert_eq!(black.z, 0.0);
    }

    #[test]
    fn test_domain_errors() {
        let nan = Vec3::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(xyz_to_lab(nan, D65), Err(ColorError::Domain { .. })));
        assert!(matches!(xyz_to_lab(D65, Vec3::ZERO), Err(ColorError::Domain { .. })));
        assert!(xyy_to_xyz(Vec3::new(0.3, 0.0, 0.5)).is_err());
    }

    #[test]
    fn test_negative_lightness_rejected() {
        let dark = Vec3::new(-1.0, 10.0, -10.0);
        assert!(matches!(lab_to_xyz(dark, D65), Err(ColorError::Domain { .. })));
        assert!(matches!(luv_to_xyz(dark, D65), Err(ColorError::Domain { .. })));

        assert_eq!(luv_to_xyz(Vec3::new(0.0, 20.0, 5.0), D65).unwrap(), Vec3::ZERO);
        assert_abs_diff_eq!(lab_to_xyz(Vec3::ZERO, D65).unwrap().y, 0.0, epsilon = 1e-15);

        // Past the white and far outside the locus still converts
        let bright = lab_to_xyz(Vec3::new(120.0, 200.0, -200.0), D65).unwrap();
        assert!(bright.y > 1.0 && bright.is_finite());
        assert!(luv_to_xyz(Vec3::new(120.0, 300.0, 50.0), D65).unwrap().is_finite());
    }

    #[test]
    fn test_delta_e() {
        assert_eq!(delta_e_76(Vec3::new(50.0, 3.0, 0.0), Vec3::new(50.0, 0.0, 4.0)), 5.0);
    }
}
