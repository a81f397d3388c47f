//! Whiteness and yellowness indices.
//!
//! Every index here works on tristimulus values scaled so the reference white
//! has `Y = 100`, the convention the industry formulas are written in.
//!
//! | Index | Formula | Neutral value |
//! |-------|---------|---------------|
//! | CIE 2004 whiteness W | `Y + 800(xn - x) + 1700(yn - y)` | 100 for the perfect diffuser |
//! | CIE 2004 tint T | `k(xn - x) - 650(yn - y)`, k = 1000 (2°) or 900 (10°) | 0 |
//! | ASTM E313 whiteness | `3.388 Z - 3 Y` | |
//! | Berger (1959) | `0.333 Y + 125 Z/Zn - 125 X/Xn` | 33.3 |
//! | Stensby (1968) | `L* - 3 b* + 3 a*` | 100 |
//! | ASTM E313 yellowness | `100 (Cx X - Cz Z) / Y` | ~0 |
//! | ASTM D1925 yellowness | `100 (1.28 X - 1.06 Z) / Y`, illuminant C, 2° | ~0 |
//!
//! # Usage
//!
//! ```rust
//! use chroma_color::indices::{E313Coefficients, whiteness_cie2004, yellowness_e313};
//! use chroma_math::Vec3;
//!
//! let d65 = Vec3::new(95.047, 100.0, 108.883);
//! let (w, t) = whiteness_cie2004(d65, d65, false);
//! assert!((w - 100.0).abs() < 1e-9 && t.abs() < 1e-9);
//! assert!(yellowness_e313(d65, E313Coefficients::D65_2).abs() < 0.01);
//! ```

use chroma_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::convert::xyz_to_xyy;

// ============================================================================
// Whiteness
// ============================================================================

/// CIE 2004 whiteness `W` and tint `T` of `xyz` against `white`.
///
/// `ten_degree` selects the 10° tint coefficient. A positive tint is
/// greenish, a negative one reddish.
pub fn whiteness_cie2004(xyz: Vec3, white: Vec3, ten_degree: bool) -> (f64, f64) {
    let (x, y) = chromaticity(xyz, white);
    let (xn, yn) = chromaticity(white, white);
    let w = xyz.y + 800.0 * (xn - x) + 1700.0 * (yn - y);
    let k = if ten_degree { 900.0 } else { 1000.0 };
    (w, k * (xn - x) - 650.0 * (yn - y))
}

/// ASTM E313 whiteness.
pub fn whiteness_e313(xyz: Vec3) -> f64 {
    3.388 * xyz.z - 3.0 * xyz.y
}

/// Berger (1959) whiteness of `xyz` against `white`.
pub fn whiteness_berger(xyz: Vec3, white: Vec3) -> f64 {
    0.333 * xyz.y + 125.0 * xyz.z / white.z - 125.0 * xyz.x / white.x
}

/// Stensby (1968) whiteness from CIELAB.
pub fn whiteness_stensby(lab: Vec3) -> f64 {
    lab.x - 3.0 * lab.z + 3.0 * lab.y
}

fn chromaticity(xyz: Vec3, white: Vec3) -> (f64, f64) {
    // xyz_to_xyy maps black to the white's chromaticity
    match xyz_to_xyy(xyz, white) {
        Ok(xyy) => (xyy.x, xyy.y),
        Err(_) => (f64::NAN, f64::NAN),
    }
}

// ============================================================================
// Yellowness
// ============================================================================

/// ASTM E313 yellowness coefficients for one observer and illuminant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct E313Coefficients {
    /// Weight of X.
    pub cx: f64,
    /// Weight of Z.
    pub cz: f64,
}

impl E313Coefficients {
    /// Illuminant C, CIE 1931 2°.
    pub const C_2: Self = Self { cx: 1.2769, cz: 1.0592 };
    /// Illuminant D65, CIE 1931 2°.
    pub const D65_2: Self = Self { cx: 1.2985, cz: 1.1335 };
    /// Illuminant C, CIE 1964 10°.
    pub const C_10: Self = Self { cx: 1.2871, cz: 1.0781 };
    /// Illuminant D65, CIE 1964 10°.
    pub const D65_10: Self = Self { cx: 1.3013, cz: 1.1498 };

    /// Published coefficients for illuminant C, else D65.
    pub fn for_viewing(illuminant: &str, ten_degree: bool) -> Self {
        match (illuminant.eq_ignore_ascii_case("C"), ten_degree) {
            (true, false) => Self::C_2,
            (true, true) => Self::C_10,
            (false, false) => Self::D65_2,
            (false, true) => Self::D65_10,
        }
    }
}

/// ASTM E313 yellowness. Zero luminance has no defined index and gives 0.
pub fn yellowness_e313(xyz: Vec3, c: E313Coefficients) -> f64 {
    if xyz.y == 0.0 {
        return 0.0;
    }
    100.0 * (c.cx * xyz.x - c.cz * xyz.z) / xyz.y
}

/// ASTM D1925 yellowness, for XYZ under illuminant C with the 2° observer.
pub fn yellowness_d1925(xyz: Vec3) -> f64 {
    if xyz.y == 0.0 {
        return 0.0;
    }
    100.0 * (1.28 * xyz.x - 1.06 * xyz.z) / xyz.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const D65: Vec3 = Vec3::new(95.047, 100.0, 108.883);
    const C: Vec3 = Vec3::new(98.074, 100.0, 118.232);

    #[test]
    fn test_perfect_diffuser_whiteness() {
        let (w, t) = whiteness_cie2004(D65, D65, false);
        assert_abs_diff_eq!(w, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(whiteness_berger(D65, D65), 33.3, epsilon = 1e-9);
        assert_abs_diff_eq!(whiteness_stensby(Vec3::new(100.0, 0.0, 0.0)), 100.0);
        assert_abs_diff_eq!(whiteness_e313(D65), 3.388 * 108.883 - 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bluish_white_scores_higher() {
        // Same luminance, shifted toward blue
        let bluish = Vec3::new(93.0, 100.0, 115.0);
        let (w, _) = whiteness_cie2004(bluish, D65, false);
        assert!(w > 100.0, "{w}");
        assert!(whiteness_berger(bluish, D65) > 33.3);
        assert!(yellowness_e313(bluish, E313Coefficients::D65_2) < 0.0);
    }

    #[test]
    fn test_tint_coefficient_follows_observer() {
        let greenish = Vec3::new(93.0, 100.0, 108.883);
        let (_, t2) = whiteness_cie2004(greenish, D65, false);
        let (_, t10) = whiteness_cie2004(greenish, D65, true);
        assert!(t2 > 0.0);
        assert!(t10 < t2);
    }

    #[test]
    fn test_yellowness_of_whites_is_near_zero() {
        assert_abs_diff_eq!(yellowness_e313(D65, E313Coefficients::D65_2), 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(yellowness_e313(C, E313Coefficients::C_2), 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(yellowness_d1925(C), 0.21, epsilon = 0.01);
        assert_eq!(yellowness_d1925(Vec3::ZERO), 0.0);

        let yellow = Vec3::new(90.0, 92.0, 60.0);
        assert!(yellowness_e313(yellow, E313Coefficients::D65_2) > 50.0);
    }

    #[test]
    fn test_coefficients_for_viewing() {
        assert_eq!(E313Coefficients::for_viewing("c", false), E313Coefficients::C_2);
        assert_eq!(E313Coefficients::for_viewing("D65", true), E313Coefficients::D65_10);
        assert_eq!(E313Coefficients::for_viewing("A", false), E313Coefficients::D65_2);
    }
}
