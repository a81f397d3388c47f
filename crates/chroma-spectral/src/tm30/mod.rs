//! IES TM-30 color rendition.
//!
//! Compares how a test source and a reference illuminant of the same
//! correlated color temperature render the color evaluation samples in
//! CAM02-UCS, then condenses the shifts into:
//!
//! - **Rf** - fidelity index, 0..100, 100 for a perfect match
//! - **Rg** - gamut index, 100 when the test gamut area equals the reference
//! - per-hue-bin fidelity, chroma shift (Rcs) and hue shift (Rhs)
//!
//! # Pipeline
//!
//! ```text
//! test SPD ─► resample 380..780/5 ─► CCT, Duv (CIE 1931 2°)
//!                                       │
//!                     reference: Planckian < 4000 K < blend < 5000 K < daylight
//!                                       │
//! samples × {test, reference} ─► XYZ (CIE 1964 10°) ─► CAM02-UCS J'a'b'
//!                                       │
//!                        ΔE per sample ─► Rf, 16 hue bins ─► Rcs, Rhs, Rg
//! ```
//!
//! The report is always computed in full; [`Tm30Report::project`] reduces it
//! to the requested [`Tm30Format`].
//!
//! # Usage
//!
//! ```rust
//! use chroma_spectral::{illuminant, tm30};
//! use chroma_color::cam02::ViewingConditions;
//!
//! let d50 = illuminant::find("D50").unwrap();
//! let spd = d50.spd().unwrap();
//! let report = tm30::evaluate(spd, d50, &ViewingConditions::default()).unwrap();
//! assert!(report.rf > 99.0);
//! ```

pub mod samples;

use std::fmt;
use std::str::FromStr;

use chroma_color::cam02::{Cam02Ucs, ViewingConditions};
use chroma_math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colorimetry::cct_duv;
use crate::illuminant::{Illuminant, d_series, planckian};
use crate::{Observer, SpectralDistribution, SpectralError, SpectralResult, SpectrumType};
use samples::{SAMPLE_INTERVAL, SAMPLE_START, SAMPLE_STOP, evaluation_samples};

/// Coarsest accepted sampling interval (nm).
pub const MAX_INTERVAL: f64 = 5.0;
/// Number of hue bins.
pub const BIN_COUNT: usize = 16;
/// Hue bin width (degrees).
pub const BIN_WIDTH: f64 = 360.0 / BIN_COUNT as f64;

/// Below this CCT the reference is Planckian (K).
pub const PLANCKIAN_LIMIT: f64 = 4000.0;
/// Above this CCT the reference is CIE daylight (K).
pub const DAYLIGHT_LIMIT: f64 = 5000.0;

// ============================================================================
// Report types
// ============================================================================

/// Report detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tm30Format {
    /// Everything, including per-sample shifts.
    #[default]
    Full,
    /// Indices and per-bin statistics.
    Intermediate,
    /// Indices only.
    Simple,
}

impl Tm30Format {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Intermediate => "Intermediate",
            Self::Simple => "Simple",
        }
    }
}

impl fmt::Display for Tm30Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tm30Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "intermediate" => Ok(Self::Intermediate),
            "simple" => Ok(Self::Simple),
            _ => Err(format!("unknown TM-30 format '{s}' (expected full, intermediate or simple)")),
        }
    }
}

/// Reference illuminant used for the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reference {
    /// Blackbody at the test CCT.
    Planckian,
    /// CIE daylight at the test CCT.
    Daylight,
    /// Mix of both, equal luminance, `daylight_fraction` of daylight.
    Blend {
        /// Weight of the daylight component, 0..1.
        daylight_fraction: f64,
    },
}

/// Statistics of one 22.5° hue bin, keyed by reference hue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueBin {
    /// Bin number, 0 starts at 0°.
    pub index: usize,
    /// Hue range `[from, to)` in degrees.
    pub hue_range: [f64; 2],
    /// Samples in the bin.
    pub count: usize,
    /// Local fidelity index.
    pub rf: Option<f64>,
    /// Relative chroma shift along the reference hue.
    pub rcs: Option<f64>,
    /// Hue shift (radians) normal to the reference hue.
    pub rhs: Option<f64>,
    /// Average `(a', b')` under the test source.
    pub test: Option<[f64; 2]>,
    /// Average `(a', b')` under the reference.
    pub reference: Option<[f64; 2]>,
}

/// One evaluation sample under both sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleShift {
    /// Sample number.
    pub index: usize,
    /// `J'a'b'` under the test source.
    pub test: [f64; 3],
    /// `J'a'b'` under the reference.
    pub reference: [f64; 3],
    /// CAM02-UCS color difference.
    pub delta_e: f64,
    /// Sample fidelity index.
    pub rf: f64,
    /// Hue bin of the reference color.
    pub bin: usize,
}

/// Full TM-30 computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tm30Report {
    /// Correlated color temperature of the test source (K).
    pub cct: f64,
    /// Distance from the Planckian locus.
    pub duv: f64,
    /// Fidelity index.
    pub rf: f64,
    /// Gamut index.
    pub rg: f64,
    /// Reference illuminant.
    pub reference: Reference,
    /// Hue bins.
    pub bins: Vec<HueBin>,
    /// Per-sample shifts.
    pub samples: Vec<SampleShift>,
}

/// Indices only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tm30Simple {
    /// Correlated color temperature (K).
    pub cct: f64,
    /// Distance from the Planckian locus.
    pub duv: f64,
    /// Fidelity index.
    pub rf: f64,
    /// Gamut index.
    pub rg: f64,
}

/// Indices and hue bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tm30Intermediate {
    /// Correlated color temperature (K).
    pub cct: f64,
    /// Distance from the Planckian locus.
    pub duv: f64,
    /// Fidelity index.
    pub rf: f64,
    /// Gamut index.
    pub rg: f64,
    /// Hue bins.
    pub bins: Vec<HueBin>,
}

/// A report projected to one [`Tm30Format`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum Tm30Output {
    /// Complete report.
    Full(Tm30Report),
    /// Indices and hue bins.
    Intermediate(Tm30Intermediate),
    /// Indices.
    Simple(Tm30Simple),
}

impl Tm30Output {
    /// Fidelity index.
    pub fn rf(&self) -> f64 {
        match self {
            Self::Full(r) => r.rf,
            Self::Intermediate(r) => r.rf,
            Self::Simple(r) => r.rf,
        }
    }

    /// Gamut index.
    pub fn rg(&self) -> f64 {
        match self {
            Self::Full(r) => r.rg,
            Self::Intermediate(r) => r.rg,
            Self::Simple(r) => r.rg,
        }
    }
}

impl Tm30Report {
    /// Reduces the report to `format`.
    pub fn project(&self, format: Tm30Format) -> Tm30Output {
        match format {
            Tm30Format::Full => Tm30Output::Full(self.clone()),
            Tm30Format::Intermediate => Tm30Output::Intermediate(Tm30Intermediate {
                cct: self.cct,
                duv: self.duv,
                rf: self.rf,
                rg: self.rg,
                bins: self.bins.clone(),
            }),
            Tm30Format::Simple => Tm30Output::Simple(Tm30Simple {
                cct: self.cct,
                duv: self.duv,
                rf: self.rf,
                rg: self.rg,
            }),
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Fidelity scale: `10·ln(exp((100 - 7.54·ΔE) / 10) + 1)`.
pub fn fidelity(delta_e: f64) -> f64 {
    10.0 * (((100.0 - 7.54 * delta_e) / 10.0).exp() + 1.0).ln()
}

fn on_sample_grid(f: impl Fn(f64) -> f64) -> SpectralDistribution {
    SpectralDistribution::sample(SAMPLE_START, SAMPLE_STOP, SAMPLE_INTERVAL, SpectrumType::Emissive, f)
}

fn luminance_10(sd: &SpectralDistribution) -> f64 {
    sd.iter().map(|(w, v)| v * Observer::Cie1964.cmf(w).y).sum()
}

/// Reference illuminant for a test CCT, on the sample grid.
pub fn reference_source(cct: f64) -> (Reference, SpectralDistribution) {
    if cct < PLANCKIAN_LIMIT {
        let spd = planckian(cct);
        return (Reference::Planckian, on_sample_grid(|w| spd.value_at(w)));
    }
    if cct > DAYLIGHT_LIMIT {
        let spd = d_series(cct);
        return (Reference::Daylight, on_sample_grid(|w| spd.value_at(w)));
    }
    let (planck_spd, daylight_spd) = (planckian(cct), d_series(cct));
    let p = on_sample_grid(|w| planck_spd.value_at(w));
    let d = on_sample_grid(|w| daylight_spd.value_at(w));
    let (yp, yd) = (luminance_10(&p), luminance_10(&d));
    let m = (cct - PLANCKIAN_LIMIT) / (DAYLIGHT_LIMIT - PLANCKIAN_LIMIT);
    let values = p
        .values()
        .iter()
        .zip(d.values())
        .map(|(a, b)| (1.0 - m) * a / yp + m * b / yd)
        .collect();
    let blend = SpectralDistribution::from_parts(values, SAMPLE_START, SAMPLE_INTERVAL, SpectrumType::Emissive).normalized();
    (Reference::Blend { daylight_fraction: m }, blend)
}

/// White and sample tristimulus values under `source`, white `Y = 100`.
fn sample_colors(source: &SpectralDistribution) -> SpectralResult<(Vec3, Vec<Vec3>)> {
    let weights: Vec<Vec3> = source
        .iter()
        .map(|(w, s)| Observer::Cie1964.cmf(w) * s)
        .collect();
    let y: f64 = weights.iter().map(|w| w.y).sum();
    if y <= 0.0 {
        return Err(SpectralError::range("luminance", y, "a source with visible power"));
    }
    let k = 100.0 / y;
    let white = weights.iter().fold(Vec3::ZERO, |acc, w| acc + *w) * k;
    let colors = evaluation_samples()
        .iter()
        .map(|r| {
            weights
                .iter()
                .zip(r.values())
                .fold(Vec3::ZERO, |acc, (w, v)| acc + *w * *v)
                * k
        })
        .collect();
    Ok((white, colors))
}

fn appearance(source: &SpectralDistribution, vc: &ViewingConditions) -> SpectralResult<Vec<Vec3>> {
    let (white, colors) = sample_colors(source)?;
    let model = Cam02Ucs::new(white, *vc)?;
    colors
        .into_iter()
        .map(|xyz| model.jab(xyz).map_err(SpectralError::from))
        .collect()
}

/// Shoelace area of a closed polygon.
fn polygon_area(points: &[[f64; 2]]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let (p, q) = (points[i], points[(i + 1) % n]);
            p[0] * q[1] - q[0] * p[1]
        })
        .sum();
    twice.abs() / 2.0
}

fn hue_bin(a: f64, b: f64) -> usize {
    let h = b.atan2(a).to_degrees().rem_euclid(360.0);
    ((h / BIN_WIDTH) as usize).min(BIN_COUNT - 1)
}

fn mean2(points: impl Iterator<Item = [f64; 2]>) -> Option<[f64; 2]> {
    let (sum, n) = points.fold(([0.0, 0.0], 0usize), |(s, n), p| ([s[0] + p[0], s[1] + p[1]], n + 1));
    (n > 0).then(|| [sum[0] / n as f64, sum[1] / n as f64])
}

fn build_bin(index: usize, shifts: &[SampleShift]) -> HueBin {
    let members: Vec<&SampleShift> = shifts.iter().filter(|s| s.bin == index).collect();
    let test = mean2(members.iter().map(|s| [s.test[1], s.test[2]]));
    let reference = mean2(members.iter().map(|s| [s.reference[1], s.reference[2]]));

    let rf = (!members.is_empty())
        .then(|| fidelity(members.iter().map(|s| s.delta_e).sum::<f64>() / members.len() as f64));
    let (rcs, rhs) = match (test, reference) {
        (Some(t), Some(r)) => {
            let chroma = r[0].hypot(r[1]);
            let theta = r[1].atan2(r[0]);
            let (da, db) = (t[0] - r[0], t[1] - r[1]);
            if chroma > 0.0 {
                (
                    Some((da * theta.cos() + db * theta.sin()) / chroma),
                    Some((-da * theta.sin() + db * theta.cos()) / chroma),
                )
            } else {
                (None, None)
            }
        }
        _ => (None, None),
    };

    HueBin {
        index,
        hue_range: [index as f64 * BIN_WIDTH, (index + 1) as f64 * BIN_WIDTH],
        count: members.len(),
        rf,
        rcs,
        rhs,
        test,
        reference,
    }
}

/// Computes the full TM-30 report for `sd`.
///
/// Emissive data is the test source. Reflective and transmissive data is
/// turned into one by multiplying with the illuminant SPD.
///
/// # Errors
///
/// - [`SpectralError::InsufficientResolution`] if the interval exceeds 5 nm
/// - [`SpectralError::MissingSpd`] for object data under a chromaticity-only illuminant
/// - [`SpectralError::SpectralRange`] if the source has no visible power
pub fn evaluate(
    sd: &SpectralDistribution,
    illuminant: &Illuminant,
    vc: &ViewingConditions,
) -> SpectralResult<Tm30Report> {
    if sd.interval() > MAX_INTERVAL {
        return Err(SpectralError::InsufficientResolution {
            interval: sd.interval(),
            required: MAX_INTERVAL,
        });
    }

    let test = if sd.kind().is_object() {
        let spd = illuminant
            .spd()
            .ok_or_else(|| SpectralError::MissingSpd(illuminant.name().to_string()))?;
        on_sample_grid(|w| sd.value_at(w) * spd.value_at(w))
    } else {
        on_sample_grid(|w| sd.value_at(w))
    };

    let xyz = test
        .iter()
        .fold(Vec3::ZERO, |acc, (w, v)| acc + Observer::Cie1931.cmf(w) * v);
    if xyz.y <= 0.0 {
        return Err(SpectralError::range("luminance", xyz.y, "a source with visible power"));
    }
    let (cct, duv) = cct_duv(xyz);
    let (reference, ref_spd) = reference_source(cct);

    let jab_test = appearance(&test, vc)?;
    let jab_ref = appearance(&ref_spd, vc)?;

    let samples: Vec<SampleShift> = jab_test
        .iter()
        .zip(&jab_ref)
        .enumerate()
        .map(|(index, (t, r))| {
            let delta_e = t.distance(*r);
            SampleShift {
                index,
                test: t.to_array(),
                reference: r.to_array(),
                delta_e,
                rf: fidelity(delta_e),
                bin: hue_bin(r.y, r.z),
            }
        })
        .collect();

    let mean_de = samples.iter().map(|s| s.delta_e).sum::<f64>() / samples.len() as f64;
    let rf = fidelity(mean_de);

    let bins: Vec<HueBin> = (0..BIN_COUNT).map(|i| build_bin(i, &samples)).collect();
    let test_poly: Vec<[f64; 2]> = bins.iter().filter_map(|b| b.test).collect();
    let ref_poly: Vec<[f64; 2]> = bins.iter().filter_map(|b| b.reference).collect();
    let ref_area = polygon_area(&ref_poly);
    let rg = if ref_area > 0.0 {
        100.0 * polygon_area(&test_poly) / ref_area
    } else {
        100.0
    };

    debug!(cct, duv, rf, rg, ?reference, "TM-30 evaluated");

    Ok(Tm30Report {
        cct,
        duv,
        rf,
        rg,
        reference,
        bins,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::illuminant;
    use approx::assert_abs_diff_eq;

    fn led() -> SpectralDistribution {
        let values: Vec<f64> = (0..=80)
            .map(|i| {
                let w = 380.0 + 5.0 * i as f64;
                let blue = 0.7 * (-((w - 450.0) / 20.0).powi(2)).exp();
                let phosphor = if w > 480.0 { (-((w - 580.0) / 80.0).powi(2)).exp() } else { 0.0 };
                (blue + phosphor).min(1.0)
            })
            .collect();
        SpectralDistribution::build(values, 380.0, 780.0, 5.0, SpectrumType::Emissive).unwrap()
    }

    #[test]
    fn test_reference_source_matches_itself() {
        let vc = ViewingConditions::default();
        let spd = illuminant::planckian(3000.0);
        let report = evaluate(&spd, &illuminant::ALL[0], &vc).unwrap();
        assert_eq!(report.reference, Reference::Planckian);
        assert!((report.cct - 3000.0).abs() < 5.0);
        assert!(report.rf > 99.9, "{}", report.rf);
        assert_abs_diff_eq!(report.rg, 100.0, epsilon = 0.1);
    }

    #[test]
    fn test_phosphor_led() {
        let report = evaluate(&led(), &illuminant::ALL[0], &ViewingConditions::default()).unwrap();
        assert!(report.rf > 60.0 && report.rf < 90.0, "Rf {}", report.rf);
        assert!(report.rg > 80.0 && report.rg < 105.0, "Rg {}", report.rg);
        assert_eq!(report.samples.len(), samples::SAMPLE_COUNT);
        assert_eq!(report.bins.len(), BIN_COUNT);
        assert_eq!(report.bins.iter().map(|b| b.count).sum::<usize>(), samples::SAMPLE_COUNT);
    }

    #[test]
    fn test_all_bins_populated() {
        let report = evaluate(&illuminant::d_series(6500.0), &illuminant::ALL[0], &ViewingConditions::default()).unwrap();
        assert_eq!(report.reference, Reference::Daylight);
        assert!(report.bins.iter().all(|b| b.count > 0 && b.rf.is_some()));
    }

    #[test]
    fn test_blend_region() {
        let (reference, spd) = reference_source(4500.0);
        assert_eq!(reference, Reference::Blend { daylight_fraction: 0.5 });
        assert_eq!(spd.start(), SAMPLE_START);
        assert_eq!(spd.stop(), SAMPLE_STOP);
    }

    #[test]
    fn test_coarse_interval_rejected() {
        let sd = SpectralDistribution::build(vec![0.5; 41], 380.0, 780.0, 10.0, SpectrumType::Emissive).unwrap();
        let err = evaluate(&sd, &illuminant::ALL[0], &ViewingConditions::default()).unwrap_err();
        assert_eq!(
            err,
            SpectralError::InsufficientResolution {
                interval: 10.0,
                required: 5.0
            }
        );
    }

    #[test]
    fn test_reflective_needs_spd() {
        let sd = SpectralDistribution::build(vec![0.5; 81], 380.0, 780.0, 5.0, SpectrumType::Reflective).unwrap();
        let fl2 = illuminant::find("FL2").unwrap();
        assert!(matches!(
            evaluate(&sd, fl2, &ViewingConditions::default()),
            Err(SpectralError::MissingSpd(_))
        ));
        // A neutral reflector under D65 renders like D65 itself
        let d65 = illuminant::find("D65").unwrap();
        let report = evaluate(&sd, d65, &ViewingConditions::default()).unwrap();
        assert!(report.rf > 99.0);
    }

    #[test]
    fn test_projection_is_subset() {
        let report = evaluate(&led(), &illuminant::ALL[0], &ViewingConditions::default()).unwrap();
        match report.project(Tm30Format::Simple) {
            Tm30Output::Simple(s) => {
                assert_eq!(s.rf, report.rf);
                assert_eq!(s.rg, report.rg);
            }
            other => panic!("unexpected {other:?}"),
        }
        match report.project(Tm30Format::Intermediate) {
            Tm30Output::Intermediate(i) => assert_eq!(i.bins, report.bins),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(report.project(Tm30Format::Full), Tm30Output::Full(report.clone()));
    }

    #[test]
    fn test_fidelity_scale() {
        assert_abs_diff_eq!(fidelity(0.0), 100.0, epsilon = 1e-3);
        assert!(fidelity(20.0) > 0.0);
        assert!(fidelity(5.0) < fidelity(1.0));
    }

    #[test]
    fn test_format_names() {
        assert_eq!("simple".parse::<Tm30Format>().unwrap(), Tm30Format::Simple);
        assert_eq!(Tm30Format::Intermediate.to_string(), "Intermediate");
        assert!("detailed".parse::<Tm30Format>().is_err());
    }
}
