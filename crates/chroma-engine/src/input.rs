//! Typed color input and the model detector.
//!
//! A request starts as a [`RawInput`]: every argument group optional, the
//! way a command line or a form delivers it. [`detect`] validates that
//! exactly one group is complete and none is partial, normalizes it through the bit-depth
//! table and yields a [`ColorInput`]. Nothing past this point inspects
//! which arguments were set.
//!
//! # Groups
//!
//! | Model | Components | Axes |
//! |-------|------------|------|
//! | CIELAB | L*, a*, b* | lightness, opponent, opponent |
//! | CIELCHab | L*, C*, h° | lightness, chroma, hue |
//! | CIELUV | L*, u*, v* | lightness, opponent, opponent |
//! | CIELCHuv | L*, C*, h° | lightness, chroma, hue |
//! | CIEXYZ | X, Y, Z | xyz |
//! | RGB | R, G, B | rgb |
//! | Spectrum | start, stop, interval, data (type optional) | - |
//! | Wavelength | λ | - |
//!
//! The table order is the detection order used in error messages.
//!
//! # Usage
//!
//! ```rust
//! use chroma_engine::{BitDepth, ColorInput, ColorModel, RawInput, detect};
//!
//! let raw = RawInput { rgb: [Some(255.0), Some(128.0), Some(0.0)], ..Default::default() };
//! let input = detect(&raw, BitDepth::Eight).unwrap();
//! assert_eq!(input.model(), ColorModel::Rgb);
//! ```

use std::fmt;

use chroma_math::Vec3;
use chroma_spectral::{SpectralDistribution, SpectrumType};
use serde::{Deserialize, Serialize};

use crate::depth::{Axis, BitDepth, normalize};
use crate::{EngineError, EngineResult};

// ============================================================================
// Models
// ============================================================================

/// Input representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorModel {
    /// Encoded RGB in the input working space.
    Rgb,
    /// CIE 1931 XYZ.
    Xyz,
    /// CIE 1976 L*a*b*.
    Lab,
    /// Cylindrical CIELAB.
    LchAb,
    /// CIE 1976 L*u*v*.
    Luv,
    /// Cylindrical CIELUV.
    LchUv,
    /// Sampled spectral distribution.
    Spectrum,
    /// Monochromatic stimulus.
    Wavelength,
}

impl ColorModel {
    /// Detection order.
    pub const DETECTION_ORDER: [ColorModel; 8] = [
        Self::Lab,
        Self::LchAb,
        Self::Luv,
        Self::LchUv,
        Self::Xyz,
        Self::Rgb,
        Self::Spectrum,
        Self::Wavelength,
    ];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Xyz => "CIEXYZ",
            Self::Lab => "CIELAB",
            Self::LchAb => "CIELCHab",
            Self::Luv => "CIELUV",
            Self::LchUv => "CIELCHuv",
            Self::Spectrum => "Spectrum",
            Self::Wavelength => "Wavelength",
        }
    }

    /// Component names of a triplet model.
    pub const fn components(self) -> Option<[&'static str; 3]> {
        match self {
            Self::Rgb => Some(["R", "G", "B"]),
            Self::Xyz => Some(["X", "Y", "Z"]),
            Self::Lab => Some(["L*", "a*", "b*"]),
            Self::Luv => Some(["L*", "u*", "v*"]),
            Self::LchAb | Self::LchUv => Some(["L*", "C*", "h"]),
            Self::Spectrum | Self::Wavelength => None,
        }
    }

    /// Bit-depth axes of a triplet model.
    pub const fn axes(self) -> Option<[Axis; 3]> {
        use Axis::*;
        match self {
            Self::Rgb => Some([Rgb, Rgb, Rgb]),
            Self::Xyz => Some([Xyz, Xyz, Xyz]),
            Self::Lab | Self::Luv => Some([Lightness, Opponent, Opponent]),
            Self::LchAb | Self::LchUv => Some([Lightness, Chroma, Hue]),
            Self::Spectrum | Self::Wavelength => None,
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Typed input
// ============================================================================

/// Three canonical components and the depth they were normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    /// Canonical values (unit RGB/XYZ, L* in 0..100, degrees for hue).
    pub values: [f64; 3],
    /// Declared input depth.
    pub depth: BitDepth,
}

impl Triplet {
    /// Values as a vector.
    pub fn vec(&self) -> Vec3 {
        Vec3::from_array(self.values)
    }
}

/// A normalized tristimulus-like input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", content = "value")]
pub enum ColorValue {
    /// Encoded RGB, 0..1.
    Rgb(Triplet),
    /// XYZ, 0..1.
    Xyz(Triplet),
    /// L*a*b*.
    Lab(Triplet),
    /// L*C*h (ab).
    LchAb(Triplet),
    /// L*u*v*.
    Luv(Triplet),
    /// L*C*h (uv).
    LchUv(Triplet),
}

impl ColorValue {
    /// Builds the variant for a triplet model.
    fn new(model: ColorModel, triplet: Triplet) -> Option<Self> {
        Some(match model {
            ColorModel::Rgb => Self::Rgb(triplet),
            ColorModel::Xyz => Self::Xyz(triplet),
            ColorModel::Lab => Self::Lab(triplet),
            ColorModel::LchAb => Self::LchAb(triplet),
            ColorModel::Luv => Self::Luv(triplet),
            ColorModel::LchUv => Self::LchUv(triplet),
            ColorModel::Spectrum | ColorModel::Wavelength => return None,
        })
    }

    /// Model tag.
    pub fn model(&self) -> ColorModel {
        match self {
            Self::Rgb(_) => ColorModel::Rgb,
            Self::Xyz(_) => ColorModel::Xyz,
            Self::Lab(_) => ColorModel::Lab,
            Self::LchAb(_) => ColorModel::LchAb,
            Self::Luv(_) => ColorModel::Luv,
            Self::LchUv(_) => ColorModel::LchUv,
        }
    }

    /// Components and depth.
    pub fn triplet(&self) -> &Triplet {
        match self {
            Self::Rgb(t) | Self::Xyz(t) | Self::Lab(t) | Self::LchAb(t) | Self::Luv(t) | Self::LchUv(t) => t,
        }
    }
}

/// A validated input: exactly one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColorInput {
    /// Triplet input.
    Color(ColorValue),
    /// Spectral distribution.
    Spectrum(SpectralDistribution),
    /// Monochromatic wavelength (nm).
    Wavelength(f64),
}

impl ColorInput {
    /// Model tag.
    pub fn model(&self) -> ColorModel {
        match self {
            Self::Color(c) => c.model(),
            Self::Spectrum(_) => ColorModel::Spectrum,
            Self::Wavelength(_) => ColorModel::Wavelength,
        }
    }

    /// Spectral distribution, if the input is one.
    pub fn spectrum(&self) -> Option<&SpectralDistribution> {
        match self {
            Self::Spectrum(sd) => Some(sd),
            _ => None,
        }
    }

    /// True for reflective or transmissive spectra.
    pub fn is_object_spectrum(&self) -> bool {
        self.spectrum().is_some_and(|sd| sd.kind().is_object())
    }
}

// ============================================================================
// Raw input and detection
// ============================================================================

/// Spectral argument group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumArgs {
    /// First wavelength (nm).
    pub start: Option<f64>,
    /// Last wavelength (nm).
    pub stop: Option<f64>,
    /// Sample interval (nm).
    pub interval: Option<f64>,
    /// Measurement type, reflective when unset.
    #[serde(alias = "type")]
    pub kind: Option<SpectrumType>,
    /// Samples, one per wavelength.
    pub data: Option<Vec<f64>>,
}

impl SpectrumArgs {
    fn missing(&self) -> Vec<&'static str> {
        [
            ("start", self.start.is_none()),
            ("stop", self.stop.is_none()),
            ("interval", self.interval.is_none()),
            ("data", self.data.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect()
    }

    fn fill(&self) -> Fill {
        let missing = self.missing();
        if missing.is_empty() {
            Fill::Full
        } else if missing.len() < 4 || self.kind.is_some() {
            Fill::Partial(missing)
        } else {
            Fill::Empty
        }
    }
}

/// How much of an argument group was supplied.
#[derive(Debug, Clone, PartialEq)]
enum Fill {
    Empty,
    Partial(Vec<&'static str>),
    Full,
}

/// Every argument group, each optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    /// R, G, B.
    pub rgb: [Option<f64>; 3],
    /// X, Y, Z.
    pub xyz: [Option<f64>; 3],
    /// L*, a*, b*.
    pub lab: [Option<f64>; 3],
    /// L*, C*, h (ab).
    pub lchab: [Option<f64>; 3],
    /// L*, u*, v*.
    pub luv: [Option<f64>; 3],
    /// L*, C*, h (uv).
    pub lchuv: [Option<f64>; 3],
    /// Spectral group.
    pub spectrum: SpectrumArgs,
    /// Monochromatic wavelength (nm).
    pub wavelength: Option<f64>,
}

impl RawInput {
    fn triplet(&self, model: ColorModel) -> Option<&[Option<f64>; 3]> {
        match model {
            ColorModel::Rgb => Some(&self.rgb),
            ColorModel::Xyz => Some(&self.xyz),
            ColorModel::Lab => Some(&self.lab),
            ColorModel::LchAb => Some(&self.lchab),
            ColorModel::Luv => Some(&self.luv),
            ColorModel::LchUv => Some(&self.lchuv),
            ColorModel::Spectrum | ColorModel::Wavelength => None,
        }
    }

    fn fill(&self, model: ColorModel) -> Fill {
        match model {
            ColorModel::Spectrum => self.spectrum.fill(),
            ColorModel::Wavelength if self.wavelength.is_some() => Fill::Full,
            ColorModel::Wavelength => Fill::Empty,
            m => {
                let (Some(values), Some(names)) = (self.triplet(m), m.components()) else {
                    return Fill::Empty;
                };
                let missing: Vec<&'static str> = values
                    .iter()
                    .zip(names)
                    .filter_map(|(v, n)| v.is_none().then_some(n))
                    .collect();
                match missing.len() {
                    0 => Fill::Full,
                    3 => Fill::Empty,
                    _ => Fill::Partial(missing),
                }
            }
        }
    }
}

/// Resolves `raw` to exactly one normalized input.
///
/// # Errors
///
/// - [`EngineError::AmbiguousInput`] if more than one group is complete
/// - [`EngineError::IncompleteInput`] for the first partially filled group
/// - [`EngineError::MissingInput`] if nothing is given
/// - [`EngineError::Range`] for components outside the depth's domain
/// - spectral range errors for an invalid distribution or wavelength
pub fn detect(raw: &RawInput, depth: BitDepth) -> EngineResult<ColorInput> {
    let mut complete = Vec::new();
    let mut partial = None;
    for model in ColorModel::DETECTION_ORDER {
        match raw.fill(model) {
            Fill::Full => complete.push(model),
            Fill::Partial(missing) if partial.is_none() => partial = Some((model, missing)),
            _ => {}
        }
    }

    if complete.len() > 1 {
        return Err(EngineError::AmbiguousInput { models: complete });
    }
    if let Some((model, missing)) = partial {
        return Err(EngineError::IncompleteInput { model, missing });
    }
    let Some(&model) = complete.first() else {
        return Err(EngineError::MissingInput);
    };

    match model {
        ColorModel::Spectrum => spectrum(&raw.spectrum),
        ColorModel::Wavelength => {
            let wavelength = raw.wavelength.ok_or(EngineError::MissingInput)?;
            // Validated against the observer range
            chroma_spectral::wavelength_to_xyz(wavelength, chroma_spectral::Observer::Cie1931)?;
            Ok(ColorInput::Wavelength(wavelength))
        }
        m => triplet(m, raw, depth),
    }
}

fn triplet(model: ColorModel, raw: &RawInput, depth: BitDepth) -> EngineResult<ColorInput> {
    let (Some(values), Some(names), Some(axes)) = (raw.triplet(model), model.components(), model.axes()) else {
        return Err(EngineError::MissingInput);
    };

    let mut canonical = [0.0; 3];
    for (i, slot) in canonical.iter_mut().enumerate() {
        let value = values[i].ok_or_else(|| EngineError::IncompleteInput {
            model,
            missing: vec![names[i]],
        })?;
        *slot = normalize(&format!("{} {}", model.name(), names[i]), value, axes[i], depth)?;
    }
    let triplet = Triplet {
        values: canonical,
        depth,
    };
    ColorValue::new(model, triplet)
        .map(ColorInput::Color)
        .ok_or(EngineError::MissingInput)
}

fn spectrum(args: &SpectrumArgs) -> EngineResult<ColorInput> {
    let (Some(start), Some(stop), Some(interval), Some(data)) = (args.start, args.stop, args.interval, &args.data)
    else {
        return Err(EngineError::IncompleteInput {
            model: ColorModel::Spectrum,
            missing: args.missing(),
        });
    };
    let kind = args.kind.unwrap_or(SpectrumType::Reflective);
    let sd = SpectralDistribution::build(data.clone(), start, stop, interval, kind)?;
    Ok(ColorInput::Spectrum(sd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn lab(l: f64, a: f64, b: f64) -> RawInput {
        RawInput {
            lab: [Some(l), Some(a), Some(b)],
            ..Default::default()
        }
    }

    #[test]
    fn test_detects_single_triplet() {
        let input = detect(&lab(50.0, 20.0, -30.0), BitDepth::Eight).unwrap();
        let ColorInput::Color(ColorValue::Lab(t)) = input else {
            panic!("expected Lab, got {input:?}");
        };
        assert_eq!(t.values, [50.0, 20.0, -30.0]);
        assert_eq!(t.depth, BitDepth::Eight);
    }

    #[test]
    fn test_normalizes_sixteen_bit_rgb() {
        let raw = RawInput {
            rgb: [Some(65535.0), Some(0.0), Some(32767.5)],
            ..Default::default()
        };
        let input = detect(&raw, BitDepth::Sixteen).unwrap();
        let ColorInput::Color(value) = input else {
            panic!("expected a triplet");
        };
        assert_abs_diff_eq!(value.triplet().values[0], 1.0);
        assert_abs_diff_eq!(value.triplet().values[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ambiguous() {
        let mut raw = lab(50.0, 0.0, 0.0);
        raw.xyz = [Some(0.2), Some(0.3), Some(0.4)];
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousInput);
        assert_eq!(
            err,
            EngineError::AmbiguousInput {
                models: vec![ColorModel::Lab, ColorModel::Xyz]
            }
        );

        // A partial third group does not hide the ambiguity
        raw.rgb = [Some(1.0), None, None];
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousInput);

        raw.rgb = [None; 3];
        raw.wavelength = Some(550.0);
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(
            err,
            EngineError::AmbiguousInput {
                models: vec![ColorModel::Lab, ColorModel::Xyz, ColorModel::Wavelength]
            }
        );
    }

    #[test]
    fn test_partial_group_beside_complete_one() {
        let mut raw = lab(50.0, 0.0, 0.0);
        raw.xyz = [Some(0.2), None, None];
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteInput);
        assert_eq!(
            err,
            EngineError::IncompleteInput {
                model: ColorModel::Xyz,
                missing: vec!["Y", "Z"]
            }
        );

        let mut raw = lab(50.0, 0.0, 0.0);
        raw.spectrum.kind = Some(SpectrumType::Emissive);
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(
            err,
            EngineError::IncompleteInput {
                model: ColorModel::Spectrum,
                missing: vec!["start", "stop", "interval", "data"]
            }
        );
    }

    #[test]
    fn test_incomplete() {
        let raw = RawInput {
            luv: [Some(50.0), None, Some(3.0)],
            ..Default::default()
        };
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(
            err,
            EngineError::IncompleteInput {
                model: ColorModel::Luv,
                missing: vec!["u*"]
            }
        );

        let raw = RawInput {
            spectrum: SpectrumArgs {
                start: Some(400.0),
                data: Some(vec![0.5; 31]),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(
            err,
            EngineError::IncompleteInput {
                model: ColorModel::Spectrum,
                missing: vec!["stop", "interval"]
            }
        );
    }

    #[test]
    fn test_missing() {
        let err = detect(&RawInput::default(), BitDepth::Eight).unwrap_err();
        assert_eq!(err, EngineError::MissingInput);
        assert_eq!(err.kind(), ErrorKind::IncompleteInput);
    }

    #[test]
    fn test_range_error_names_component() {
        let err = detect(&lab(50.0, 250.0, 0.0), BitDepth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(err.to_string().contains("CIELAB a*"), "{err}");
    }

    #[test]
    fn test_spectrum_and_wavelength() {
        let raw = RawInput {
            spectrum: SpectrumArgs {
                start: Some(400.0),
                stop: Some(700.0),
                interval: Some(10.0),
                kind: None,
                data: Some(vec![0.5; 31]),
            },
            ..Default::default()
        };
        let input = detect(&raw, BitDepth::Eight).unwrap();
        assert!(input.is_object_spectrum());

        let raw = RawInput {
            wavelength: Some(555.0),
            ..Default::default()
        };
        assert_eq!(detect(&raw, BitDepth::Eight).unwrap(), ColorInput::Wavelength(555.0));

        let raw = RawInput {
            wavelength: Some(900.0),
            ..Default::default()
        };
        let err = detect(&raw, BitDepth::Eight).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SpectralRange);
    }
}
