//! XYZ <-> RGB working-space conversion and RGB derivatives.
//!
//! XYZ passed to [`xyz_to_rgb`] must already be relative to the working
//! space's own reference white (adapt first with [`crate::Cat`]).
//!
//! # Out-of-gamut values
//!
//! Linear values outside `[0, 1]` are not errors. [`xyz_to_rgb`] returns an
//! [`RgbEncoding`] carrying:
//!
//! - `value` - encoded RGB, clamped to `[0, 1]`
//! - `unclamped` - encoded RGB with the curve mirrored past the ends
//! - `linear` - linear RGB before encoding
//! - `out_of_gamut` - whether any linear component left `[0, 1]`
//!
//! [`rgb_to_xyz`] decodes with the same mirrored curve, so
//! `rgb_to_xyz(xyz_to_rgb(x).unclamped) == x` for every finite `x`.
//!
//! # Derivatives
//!
//! [`to_hex`], [`rgb_to_hsl`], [`rgb_to_hsv`], [`rgb_to_cmy`] and
//! [`rgb_to_cmyk`] operate on encoded RGB in `[0, 1]`.

use chroma_math::Vec3;
use chroma_primaries::WorkingSpace;

use crate::{ColorError, ColorResult};

/// Tolerance for gamut membership tests.
const GAMUT_EPSILON: f64 = 1e-9;

/// Result of encoding XYZ into an RGB working space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbEncoding {
    /// Encoded RGB clamped to `[0, 1]`.
    pub value: Vec3,
    /// Encoded RGB without clamping (mirrored transfer curve).
    pub unclamped: Vec3,
    /// Linear RGB.
    pub linear: Vec3,
    /// True if any linear component is outside `[0, 1]`.
    pub out_of_gamut: bool,
}

/// Converts XYZ (relative to the space's white) to encoded RGB.
pub fn xyz_to_rgb(xyz: Vec3, space: &WorkingSpace) -> ColorResult<RgbEncoding> {
    if !xyz.is_finite() {
        return Err(ColorError::domain("XYZ -> RGB", xyz, "components must be finite"));
    }
    let linear = space.from_xyz_matrix() * xyz;
    let out_of_gamut = linear.min_element() < -GAMUT_EPSILON || linear.max_element() > 1.0 + GAMUT_EPSILON;

    let tf = space.transfer;
    let unclamped = Vec3::from_array(tf.encode_rgb(linear.to_array()));
    let value = Vec3::from_array(tf.encode_rgb(linear.clamp01().to_array()));

    Ok(RgbEncoding {
        value,
        unclamped,
        linear,
        out_of_gamut,
    })
}

/// Converts encoded RGB to XYZ (relative to the space's white).
///
/// Values outside `[0, 1]` are decoded with the mirrored curve.
pub fn rgb_to_xyz(encoded: Vec3, space: &WorkingSpace) -> ColorResult<Vec3> {
    if !encoded.is_finite() {
        return Err(ColorError::domain("RGB -> XYZ", encoded, "components must be finite"));
    }
    let linear = Vec3::from_array(space.transfer.decode_rgb(encoded.to_array()));
    Ok(space.to_xyz_matrix() * linear)
}

// ============================================================================
// Derivatives
// ============================================================================

/// Formats clamped RGB as `#RRGGBB`.
pub fn to_hex(rgb: Vec3) -> String {
    let [r, g, b] = rgb.clamp01().to_array().map(|v| (v * 255.0).round() as u8);
    format!("#{r:02X}{g:02X}{b:02X}")
}

fn hue_and_extrema(rgb: Vec3) -> (f64, f64, f64) {
    let max = rgb.max_element();
    let min = rgb.min_element();
    let delta = max - min;

    let hue = if delta <= 0.0 {
        0.0
    } else if max == rgb.x {
        60.0 * ((rgb.y - rgb.z) / delta).rem_euclid(6.0)
    } else if max == rgb.y {
        60.0 * ((rgb.z - rgb.x) / delta + 2.0)
    } else {
        60.0 * ((rgb.x - rgb.y) / delta + 4.0)
    };
    (hue, min, max)
}

/// RGB to HSV: hue in degrees, saturation and value on `[0, 1]`.
pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let rgb = rgb.clamp01();
    let (h, min, max) = hue_and_extrema(rgb);
    let s = if max <= 0.0 { 0.0 } else { (max - min) / max };
    Vec3::new(h, s, max)
}

/// RGB to HSL: hue in degrees, saturation and lightness on `[0, 1]`.
pub fn rgb_to_hsl(rgb: Vec3) -> Vec3 {
    let rgb = rgb.clamp01();
    let (h, min, max) = hue_and_extrema(rgb);
    let l = (max + min) / 2.0;
    let delta = max - min;
    let s = if delta <= 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };
    Vec3::new(h, s, l)
}

/// RGB to CMY.
pub fn rgb_to_cmy(rgb: Vec3) -> Vec3 {
    Vec3::ONE - rgb.clamp01()
}

/// RGB to CMYK, all components on `[0, 1]`.
pub fn rgb_to_cmyk(rgb: Vec3) -> [f64; 4] {
    let cmy = rgb_to_cmy(rgb);
    let k = cmy.min_element();
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let s = 1.0 - k;
    [(cmy.x - k) / s, (cmy.y - k) / s, (cmy.z - k) / s, k]
}
