//! CIECAM02 and the CAM02-UCS uniform color space.
//!
//! Used by the TM-30 report to compare color samples under a test source and
//! its reference illuminant.
//!
//! Tristimulus values are on the 0-100 scale (`Y = 100` for the adopted
//! white), as CIECAM02 expects.
//!
//! # Usage
//!
//! ```rust
//! use chroma_color::cam02::{Cam02Ucs, ViewingConditions};
//! use chroma_math::Vec3;
//!
//! let white = Vec3::new(95.047, 100.0, 108.883);
//! let ucs = Cam02Ucs::new(white, ViewingConditions::default()).unwrap();
//! let jab = ucs.jab(white).unwrap();
//! assert!((jab.x - 100.0).abs() < 1e-9);
//! ```

use chroma_math::{CAT02, HPE, Mat3, Vec3};
use serde::{Deserialize, Serialize};

use crate::{ColorError, ColorResult};

// ============================================================================
// Viewing conditions
// ============================================================================

/// Surround parameters (`F`, `c`, `Nc`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surround {
    /// Degree of adaptation factor.
    pub f: f64,
    /// Impact of surround.
    pub c: f64,
    /// Chromatic induction factor.
    pub nc: f64,
}

impl Surround {
    /// Average surround.
    pub const AVERAGE: Self = Self { f: 1.0, c: 0.69, nc: 1.0 };
    /// Dim surround.
    pub const DIM: Self = Self { f: 0.9, c: 0.59, nc: 0.9 };
    /// Dark surround.
    pub const DARK: Self = Self { f: 0.8, c: 0.525, nc: 0.8 };
}

/// CIECAM02 viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewingConditions {
    /// Adapting field luminance `L_A` in cd/m².
    pub adapting_luminance: f64,
    /// Relative background luminance `Y_b`.
    pub background_luminance: f64,
    /// Surround.
    pub surround: Surround,
    /// Degree of adaptation `D` (1 discounts the illuminant fully).
    pub degree_of_adaptation: f64,
}

impl Default for ViewingConditions {
    /// TM-30 conditions: `L_A = 100`, `Y_b = 20`, average surround, `D = 1`.
    fn default() -> Self {
        Self {
            adapting_luminance: 100.0,
            background_luminance: 20.0,
            surround: Surround::AVERAGE,
            degree_of_adaptation: 1.0,
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Appearance correlates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// Lightness `J`.
    pub j: f64,
    /// Chroma `C`.
    pub c: f64,
    /// Colorfulness `M`.
    pub m: f64,
    /// Hue angle `h` in degrees on `[0, 360)`.
    pub h: f64,
}

/// CAM02-UCS evaluator for a fixed adopted white and viewing conditions.
#[derive(Debug, Clone)]
pub struct Cam02Ucs {
    vc: ViewingConditions,
    white: Vec3,
    d_rgb: Vec3,
    to_hpe: Mat3,
    f_l: f64,
    n: f64,
    n_bb: f64,
    z: f64,
    a_w: f64,
}

impl Cam02Ucs {
    /// Precomputes the model for `white` (XYZ, `Y = 100`).
    pub fn new(white: Vec3, vc: ViewingConditions) -> ColorResult<Self> {
        if !white.is_finite() || white.y <= 0.0 {
            return Err(ColorError::domain("CIECAM02", white, "adopted white must have positive luminance"));
        }
        let la = vc.adapting_luminance;
        let k = 1.0 / (5.0 * la + 1.0);
        let k4 = k.powi(4);
        let f_l = 0.2 * k4 * (5.0 * la) + 0.1 * (1.0 - k4).powi(2) * (5.0 * la).cbrt();

        let n = vc.background_luminance / white.y;
        let n_bb = 0.725 * (1.0 / n).powf(0.2);
        let z = 1.48 + n.sqrt();

        let rgb_w = CAT02 * white;
        if rgb_w.min_element() <= 0.0 {
            return Err(ColorError::domain("CIECAM02", white, "adopted white has a non-positive cone response"));
        }
        let d = vc.degree_of_adaptation;
        let d_rgb = Vec3::new(
            d * white.y / rgb_w.x + 1.0 - d,
            d * white.y / rgb_w.y + 1.0 - d,
            d * white.y / rgb_w.z + 1.0 - d,
        );
        // CAT02 is a well conditioned constant
        let to_hpe = HPE * CAT02.inverse().unwrap_or(Mat3::IDENTITY);

        let mut model = Self {
            vc,
            white,
            d_rgb,
            to_hpe,
            f_l,
            n,
            n_bb,
            z,
            a_w: 1.0,
        };
        let rgb_aw = model.post_adaptation(white);
        model.a_w = model.achromatic(rgb_aw);
        Ok(model)
    }

    /// Adopted white.
    pub fn white(&self) -> Vec3 {
        self.white
    }

    /// Luminance level adaptation factor `F_L`.
    pub fn f_l(&self) -> f64 {
        self.f_l
    }

    fn post_adaptation(&self, xyz: Vec3) -> Vec3 {
        let rgb = CAT02 * xyz;
        let rgb_c = Vec3::new(rgb.x * self.d_rgb.x, rgb.y * self.d_rgb.y, rgb.z * self.d_rgb.z);
        let rgb_p = self.to_hpe * rgb_c;
        rgb_p.map(|v| compress(self.f_l, v))
    }

    fn achromatic(&self, rgb_a: Vec3) -> f64 {
        (2.0 * rgb_a.x + rgb_a.y + rgb_a.z / 20.0 - 0.305) * self.n_bb
    }

    /// CIECAM02 appearance correlates of `xyz` (`Y = 100` scale).
    pub fn appearance(&self, xyz: Vec3) -> ColorResult<Appearance> {
        if !xyz.is_finite() {
            return Err(ColorError::domain("CIECAM02", xyz, "components must be finite"));
        }
        let rgb_a = self.post_adaptation(xyz);

        let a = rgb_a.x - 12.0 * rgb_a.y / 11.0 + rgb_a.z / 11.0;
        let b = (rgb_a.x + rgb_a.y - 2.0 * rgb_a.z) / 9.0;
        let mut h = b.atan2(a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        if h >= 360.0 {
            h -= 360.0;
        }

        let big_a = self.achromatic(rgb_a);
        let ratio = (big_a / self.a_w).max(0.0);
        let j = 100.0 * ratio.powf(self.vc.surround.c * self.z);

        let e_t = 0.25 * ((h.to_radians() + 2.0).cos() + 3.8);
        let denom = rgb_a.x + rgb_a.y + 21.0 / 20.0 * rgb_a.z;
        let t = if denom.abs() < 1e-15 {
            0.0
        } else {
            (50000.0 / 13.0 * self.vc.surround.nc * self.n_bb * e_t * a.hypot(b)) / denom
        };
        let c = t.max(0.0).powf(0.9) * (j / 100.0).sqrt() * (1.64 - 0.29_f64.powf(self.n)).powf(0.73);
        let m = c * self.f_l.powf(0.25);

        Ok(Appearance { j, c, m, h })
    }

    /// CAM02-UCS coordinates `(J', a', b')` of `xyz` (`Y = 100` scale).
    pub fn jab(&self, xyz: Vec3) -> ColorResult<Vec3> {
        let app = self.appearance(xyz)?;
        let j_p = 1.7 * app.j / (1.0 + 0.007 * app.j);
        let m_p = (1.0 + 0.0228 * app.m).ln() / 0.0228;
        let h = app.h.to_radians();
        Ok(Vec3::new(j_p, m_p * h.cos(), m_p * h.sin()))
    }
}

/// Post-adaptation non-linear response compression, sign preserving.
#[inline]
fn compress(f_l: f64, v: f64) -> f64 {
    let p = (f_l * v.abs() / 100.0).powf(0.42);
    v.signum() * 400.0 * p / (27.13 + p) + 0.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cie_159_worked_example() {
        // CIE 159:2004 example: X=19.31 Y=23.93 Z=10.14 under
        // Xw=98.88 Yw=90 Zw=32.03, LA=200, Yb=18, average surround.
        let vc = ViewingConditions {
            adapting_luminance: 200.0,
            background_luminance: 18.0,
            surround: Surround::AVERAGE,
            degree_of_adaptation: 1.0 - (1.0 / 3.6) * ((-200.0 - 42.0) / 92.0_f64).exp(),
        };
        let model = Cam02Ucs::new(Vec3::new(98.88, 90.0, 32.03), vc).unwrap();
        let app = model.appearance(Vec3::new(19.31, 23.93, 10.14)).unwrap();
        assert_abs_diff_eq!(app.j, 48.0314, epsilon = 1e-3);
        assert_abs_diff_eq!(app.c, 38.7789, epsilon = 1e-3);
        assert_abs_diff_eq!(app.h, 191.0452, epsilon = 1e-3);
    }

    #[test]
    fn test_white_is_achromatic() {
        let white = Vec3::new(95.047, 100.0, 108.883);
        let ucs = Cam02Ucs::new(white, ViewingConditions::default()).unwrap();
        let jab = ucs.jab(white).unwrap();
        assert_abs_diff_eq!(jab.x, 100.0, epsilon = 1e-9);
        assert!(jab.y.hypot(jab.z) < 0.5);
    }

    #[test]
    fn test_black_and_hue_range() {
        let white = Vec3::new(95.047, 100.0, 108.883);
        let ucs = Cam02Ucs::new(white, ViewingConditions::default()).unwrap();
        let app = ucs.appearance(Vec3::ZERO).unwrap();
        assert!(app.j < 1e-6);
        for xyz in [Vec3::new(40.0, 20.0, 5.0), Vec3::new(10.0, 30.0, 60.0)] {
            let h = ucs.appearance(xyz).unwrap().h;
            assert!((0.0..360.0).contains(&h));
        }
    }

    #[test]
    fn test_invalid_white() {
        assert!(Cam02Ucs::new(Vec3::ZERO, ViewingConditions::default()).is_err());
    }
}
