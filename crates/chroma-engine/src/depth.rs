//! Bit depths and the input normalizer.
//!
//! Every input component belongs to an [`Axis`]; the axis and the declared
//! [`BitDepth`] fix the accepted domain and the divisor that maps a value to
//! the canonical domain:
//!
//! | Axis | 8 | 15+1 | 16 | 32 |
//! |------|---|------|----|----|
//! | RGB | 0..255 ÷255 | 0..32768 ÷32768 | 0..65535 ÷65535 | 0..1 |
//! | XYZ | 0..1 | 0..1 | 0..1 | 0..1 |
//! | L* | 0..100 | 0..32768 ÷327.68 | 0..65535 ÷655.35 | 0..1 ×100 |
//! | a* b* u* v* | ±200 | ±25600 ÷128 | ±51200 ÷256 | ±1 ×200 |
//! | C* | 0..230 | 0..230·327.68 ÷327.68 | 0..230·655.35 ÷655.35 | 0..230 |
//! | h° | 0..360 | 0..360·327.68 ÷327.68 | 0..360·655.35 ÷655.35 | 0..360 |
//!
//! "15+1" is the asymmetric 15-bit-plus-one encoding: code 32768 (2^15, not
//! 2^15 - 1) represents 1.0.
//!
//! # Usage
//!
//! ```rust
//! use chroma_engine::depth::{Axis, BitDepth, normalize};
//!
//! let a = normalize("R", 255.0, Axis::Rgb, BitDepth::Eight).unwrap();
//! let b = normalize("R", 65535.0, Axis::Rgb, BitDepth::Sixteen).unwrap();
//! assert_eq!(a, b);
//! assert!(normalize("R", 256.0, Axis::Rgb, BitDepth::Eight).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

/// Declared bit depth of an input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit integer codes.
    #[default]
    #[serde(rename = "8")]
    Eight,
    /// 15 bits plus one code value (32768 = 1.0).
    #[serde(rename = "15+1")]
    FifteenPlusOne,
    /// 16-bit integer codes.
    #[serde(rename = "16")]
    Sixteen,
    /// 32-bit float, unit range.
    #[serde(rename = "32")]
    ThirtyTwo,
}

impl BitDepth {
    /// Every depth.
    pub const ALL: [BitDepth; 4] = [Self::Eight, Self::FifteenPlusOne, Self::Sixteen, Self::ThirtyTwo];

    /// Display name (`8`, `15+1`, `16`, `32`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eight => "8",
            Self::FifteenPlusOne => "15+1",
            Self::Sixteen => "16",
            Self::ThirtyTwo => "32",
        }
    }

    /// Code value representing RGB 1.0.
    pub const fn rgb_max(self) -> f64 {
        match self {
            Self::Eight => 255.0,
            Self::FifteenPlusOne => 32768.0,
            Self::Sixteen => 65535.0,
            Self::ThirtyTwo => 1.0,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BitDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s.trim())
            .ok_or_else(|| format!("unknown bit depth '{s}' (expected 8, 15+1, 16 or 32)"))
    }
}

/// Component class, which fixes the domain at each depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// RGB code value.
    Rgb,
    /// XYZ tristimulus, always 0..1.
    Xyz,
    /// Lightness L*.
    Lightness,
    /// Opponent coordinate a*, b*, u* or v*.
    Opponent,
    /// Chroma C*.
    Chroma,
    /// Hue angle h° (degrees).
    Hue,
}

const L16: f64 = 655.35;
const L15: f64 = 327.68;
const CHROMA_MAX: f64 = 230.0;
const HUE_MAX: f64 = 360.0;

/// `(min, max, divisor)`: accepted input range and `canonical = value / divisor`.
pub const fn domain(axis: Axis, depth: BitDepth) -> (f64, f64, f64) {
    use Axis::*;
    use BitDepth::*;
    match (axis, depth) {
        (Rgb, d) => (0.0, d.rgb_max(), d.rgb_max()),
        (Xyz, _) => (0.0, 1.0, 1.0),

        (Lightness, Eight) => (0.0, 100.0, 1.0),
        (Lightness, FifteenPlusOne) => (0.0, 32768.0, L15),
        (Lightness, Sixteen) => (0.0, 65535.0, L16),
        (Lightness, ThirtyTwo) => (0.0, 1.0, 0.01),

        (Opponent, Eight) => (-200.0, 200.0, 1.0),
        (Opponent, FifteenPlusOne) => (-25600.0, 25600.0, 128.0),
        (Opponent, Sixteen) => (-51200.0, 51200.0, 256.0),
        (Opponent, ThirtyTwo) => (-1.0, 1.0, 0.005),

        (Chroma, Eight) | (Chroma, ThirtyTwo) => (0.0, CHROMA_MAX, 1.0),
        (Chroma, FifteenPlusOne) => (0.0, CHROMA_MAX * L15, L15),
        (Chroma, Sixteen) => (0.0, CHROMA_MAX * L16, L16),

        (Hue, Eight) | (Hue, ThirtyTwo) => (0.0, HUE_MAX, 1.0),
        (Hue, FifteenPlusOne) => (0.0, HUE_MAX * L15, L15),
        (Hue, Sixteen) => (0.0, HUE_MAX * L16, L16),
    }
}

/// Rescales `value` from `depth` to the canonical domain of `axis`.
///
/// # Errors
///
/// [`EngineError::Range`] if `value` is outside the depth's domain or not
/// finite.
pub fn normalize(field: &str, value: f64, axis: Axis, depth: BitDepth) -> EngineResult<f64> {
    let (min, max, divisor) = domain(axis, depth);
    if !(min..=max).contains(&value) {
        return Err(EngineError::Range {
            field: field.to_string(),
            value,
            depth: depth.name().to_string(),
            min,
            max,
        });
    }
    Ok(value / divisor)
}

/// Scales a canonical value back to `depth`.
pub fn denormalize(value: f64, axis: Axis, depth: BitDepth) -> f64 {
    value * domain(axis, depth).2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_full_scale_agrees_across_depths() {
        for axis in [Axis::Rgb, Axis::Lightness, Axis::Opponent, Axis::Chroma, Axis::Hue] {
            let canon: Vec<f64> = BitDepth::ALL
                .iter()
                .map(|&d| normalize("v", domain(axis, d).1, axis, d).unwrap())
                .collect();
            for c in &canon {
                assert_abs_diff_eq!(*c, canon[0], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_fifteen_plus_one_divisor() {
        assert_eq!(normalize("R", 32768.0, Axis::Rgb, BitDepth::FifteenPlusOne).unwrap(), 1.0);
        assert_eq!(normalize("R", 16384.0, Axis::Rgb, BitDepth::FifteenPlusOne).unwrap(), 0.5);
        assert_abs_diff_eq!(
            normalize("L", 16384.0, Axis::Lightness, BitDepth::FifteenPlusOne).unwrap(),
            50.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_range_errors() {
        let err = normalize("a*", -201.0, Axis::Opponent, BitDepth::Eight).unwrap_err();
        match err {
            EngineError::Range { field, min, max, .. } => {
                assert_eq!(field, "a*");
                assert_eq!((min, max), (-200.0, 200.0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(normalize("X", 1.5, Axis::Xyz, BitDepth::Sixteen).is_err());
        assert!(normalize("X", f64::NAN, Axis::Xyz, BitDepth::Eight).is_err());
        assert!(normalize("L", 1.2, Axis::Lightness, BitDepth::ThirtyTwo).is_err());
    }

    #[test]
    fn test_thirty_two_scaling() {
        assert_abs_diff_eq!(
            normalize("L", 0.5, Axis::Lightness, BitDepth::ThirtyTwo).unwrap(),
            50.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            normalize("b*", -0.25, Axis::Opponent, BitDepth::ThirtyTwo).unwrap(),
            -50.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(denormalize(0.5, Axis::Rgb, BitDepth::Sixteen), 32767.5, epsilon = 1e-9);
    }

    #[test]
    fn test_parse() {
        assert_eq!("15+1".parse::<BitDepth>().unwrap(), BitDepth::FifteenPlusOne);
        assert!("12".parse::<BitDepth>().is_err());
    }
}
