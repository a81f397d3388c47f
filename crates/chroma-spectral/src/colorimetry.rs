//! Colorimetric integration of spectral data.
//!
//! All integrals are evaluated on the observer grid (360..=830 nm, 1 nm),
//! sampling distributions with Sprague interpolation.
//!
//! # Normalization
//!
//! | Data | XYZ |
//! |------|-----|
//! | Reflective / transmissive | `Σ R·S·cmf / Σ S·ȳ` under the illuminant SPD `S`, so `Y <= 1` |
//! | Emissive | `Σ P·cmf / Σ ȳ`, relative to the equal-energy white |
//! | Single wavelength | `cmf(λ)` scaled to `X + Y + Z = 1`, relative to the equal-energy white |
//!
//! Object data is extended past its sampled range with its end values;
//! emissive data is zero outside its range.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chroma_color::convert::{xyz_to_uv_1960, xyz_to_xyy};
use chroma_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::illuminant::{Illuminant, planck};
use crate::observer::{CMF_START, CMF_STOP};
use crate::ssi::spectral_similarity_index;
use crate::{Observer, SpectralDistribution, SpectralError, SpectralResult};

/// Maximum luminous efficacy of radiation at 555 nm (lm/W).
pub const KM: f64 = 683.0;

/// Lowest temperature of the Planckian locus search (K).
pub const CCT_MIN: f64 = 1000.0;
/// Highest temperature of the Planckian locus search (K).
pub const CCT_MAX: f64 = 100_000.0;

fn grid() -> impl Iterator<Item = f64> {
    let n = (CMF_STOP - CMF_START) as usize;
    (0..=n).map(|i| CMF_START + i as f64)
}

fn clamped_value(sd: &SpectralDistribution, w: f64) -> f64 {
    sd.value_at(w.clamp(sd.start(), sd.stop()))
}

/// Integrates `Σ f(λ)·cmf(λ)` over the observer grid.
fn integrate(observer: Observer, f: impl Fn(f64) -> f64) -> Vec3 {
    grid().fold(Vec3::ZERO, |acc, w| acc + observer.cmf(w) * f(w))
}

/// White point of an SPD for `observer`, `Y = 1`.
pub fn spd_white_point(spd: &SpectralDistribution, observer: Observer) -> Vec3 {
    let xyz = integrate(observer, |w| spd.value_at(w));
    if xyz.y > 0.0 { xyz / xyz.y } else { Vec3::ONE }
}

/// Equal-energy white point for `observer`, `Y = 1`.
pub fn equal_energy_white(observer: Observer) -> Vec3 {
    let xyz = integrate(observer, |_| 1.0);
    xyz / xyz.y
}

/// XYZ of a spectral distribution.
///
/// Object data is integrated under `illuminant`. Emissive data ignores it
/// and is relative to [`equal_energy_white`].
///
/// # Errors
///
/// [`SpectralError::MissingSpd`] for object data under a chromaticity-only
/// illuminant.
pub fn spectral_to_xyz(sd: &SpectralDistribution, observer: Observer, illuminant: &Illuminant) -> SpectralResult<Vec3> {
    if !sd.kind().is_object() {
        let norm = integrate(observer, |_| 1.0).y;
        return Ok(integrate(observer, |w| sd.value_at(w)) / norm);
    }
    let spd = illuminant
        .spd()
        .ok_or_else(|| SpectralError::MissingSpd(illuminant.name().to_string()))?;
    let norm = integrate(observer, |w| spd.value_at(w)).y;
    Ok(integrate(observer, |w| spd.value_at(w) * clamped_value(sd, w)) / norm)
}

/// XYZ of a monochromatic stimulus, scaled to `X + Y + Z = 1`.
///
/// # Errors
///
/// [`SpectralError::SpectralRange`] outside 360..=830 nm.
pub fn wavelength_to_xyz(wavelength: f64, observer: Observer) -> SpectralResult<Vec3> {
    if !(CMF_START..=CMF_STOP).contains(&wavelength) {
        return Err(SpectralError::range(
            "wavelength",
            wavelength,
            format!("{CMF_START}..={CMF_STOP} nm"),
        ));
    }
    let xyz = observer.cmf(wavelength);
    let sum = xyz.sum();
    if sum <= 0.0 {
        return Err(SpectralError::range("wavelength", wavelength, "a wavelength with non-zero response"));
    }
    Ok(xyz / sum)
}

/// Luminous efficiency of radiation, `ΣS·V / ΣS` with `V` the photopic
/// luminous efficiency function (CIE 1931 ȳ).
pub fn luminous_efficiency(sd: &SpectralDistribution) -> f64 {
    let (lum, power) = sd
        .iter()
        .fold((0.0, 0.0), |(l, p), (w, v)| (l + v * Observer::Cie1931.cmf(w).y, p + v));
    if power > 0.0 { lum / power } else { 0.0 }
}

/// Luminous efficacy of radiation (lm/W) of an emissive distribution.
pub fn luminous_efficacy(sd: &SpectralDistribution) -> f64 {
    KM * luminous_efficiency(sd)
}

/// Luminous flux (lm) of an emissive distribution in W/nm, `Km·ΣS·V·Δλ`.
pub fn luminous_flux(sd: &SpectralDistribution) -> f64 {
    KM * sd.interval() * sd.iter().map(|(w, v)| v * Observer::Cie1931.cmf(w).y).sum::<f64>()
}

// ============================================================================
// Correlated color temperature
// ============================================================================

/// CIE 1960 uv of the Planckian radiator at `cct` (CIE 1931 2°).
pub fn planckian_uv(cct: f64) -> (f64, f64) {
    xyz_to_uv_1960(integrate(Observer::Cie1931, |w| planck(w, cct)))
}

const SCAN_STEPS: usize = 96;

/// `(cct, u, v)` of the Planckian locus at log-spaced temperatures.
fn locus_scan() -> &'static [(f64, f64, f64)] {
    static SCAN: OnceLock<Vec<(f64, f64, f64)>> = OnceLock::new();
    SCAN.get_or_init(|| {
        let (ln_lo, ln_hi) = (CCT_MIN.ln(), CCT_MAX.ln());
        (0..=SCAN_STEPS)
            .map(|i| {
                let cct = (ln_lo + (ln_hi - ln_lo) * i as f64 / SCAN_STEPS as f64).exp();
                let (u, v) = planckian_uv(cct);
                (cct, u, v)
            })
            .collect()
    })
}

fn locus_distance(u: f64, v: f64, cct: f64) -> f64 {
    let (ut, vt) = planckian_uv(cct);
    (u - ut).hypot(v - vt)
}

/// Correlated color temperature (K) and Duv of an XYZ value (CIE 1931 2°).
///
/// Finds the nearest point of the Planckian locus in CIE 1960 uv: a
/// logarithmic scan over [`CCT_MIN`]..[`CCT_MAX`] followed by golden-section
/// refinement. Duv is positive above the locus.
pub fn cct_duv(xyz: Vec3) -> (f64, f64) {
    let (u, v) = xyz_to_uv_1960(xyz);
    let scan = locus_scan();
    let at = |i: usize| scan[i].0;

    let best = scan
        .iter()
        .enumerate()
        .map(|(i, &(_, ut, vt))| (i, (u - ut).hypot(v - vt)))
        .fold((0, f64::INFINITY), |b, c| if c.1 < b.1 { c } else { b })
        .0;

    let (mut a, mut b) = (at(best.saturating_sub(1)).ln(), at((best + 1).min(SCAN_STEPS)).ln());
    let phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let f = |ln_t: f64| locus_distance(u, v, ln_t.exp());
    let mut c = b - phi * (b - a);
    let mut d = a + phi * (b - a);
    let (mut fc, mut fd) = (f(c), f(d));
    for _ in 0..60 {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - phi * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + phi * (b - a);
            fd = f(d);
        }
        if (b - a).abs() < 1e-10 {
            break;
        }
    }
    let cct = ((a + b) / 2.0).exp();
    let (_, vt) = planckian_uv(cct);
    let dist = locus_distance(u, v, cct);
    (cct, if v >= vt { dist } else { -dist })
}

// ============================================================================
// Summary
// ============================================================================

/// Colorimetric summary of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralSummary {
    /// XYZ under the summary illuminant, CIE 1931 2°.
    pub xyz: [f64; 3],
    /// xy chromaticity.
    pub xy: [f64; 2],
    /// Correlated color temperature (K) of the stimulus.
    pub cct: f64,
    /// Distance from the Planckian locus in CIE 1960 uv.
    pub duv: f64,
    /// Wavelength of the largest sample (nm).
    pub peak_wavelength: f64,
    /// Luminous efficacy of radiation (lm/W), emissive data only.
    pub luminous_efficacy: Option<f64>,
    /// Luminous efficiency of radiation in [0, 1], emissive data only.
    #[serde(default)]
    pub luminous_efficiency: Option<f64>,
    /// Luminous flux (lm) reading the samples as W/nm, emissive data only.
    #[serde(default)]
    pub luminous_flux: Option<f64>,
    /// Spectral Similarity Index of each SPD-backed CIE illuminant against
    /// the distribution, emissive data only.
    #[serde(default)]
    pub ssi: Option<BTreeMap<String, f64>>,
}

/// Summarizes a distribution under `illuminant` with the CIE 1931 2° observer.
pub fn summarize(sd: &SpectralDistribution, illuminant: &Illuminant) -> SpectralResult<SpectralSummary> {
    let xyz = spectral_to_xyz(sd, Observer::Cie1931, illuminant)?;
    let white = illuminant.white_point(Observer::Cie1931);
    let xyy = xyz_to_xyy(xyz, white)?;
    let (cct, duv) = cct_duv(xyz);
    let emissive = !sd.kind().is_object();
    Ok(SpectralSummary {
        xyz: xyz.to_array(),
        xy: [xyy.x, xyy.y],
        cct,
        duv,
        peak_wavelength: sd.peak_wavelength(),
        luminous_efficacy: emissive.then(|| luminous_efficacy(sd)),
        luminous_efficiency: emissive.then(|| luminous_efficiency(sd)),
        luminous_flux: emissive.then(|| luminous_flux(sd)),
        ssi: emissive.then(|| similarity_to_cie_illuminants(sd)),
    })
}

/// SSI of every SPD-backed illuminant of the `CIE` list, with `sd` as the
/// reference.
fn similarity_to_cie_illuminants(sd: &SpectralDistribution) -> BTreeMap<String, f64> {
    crate::illuminant::CIE_LIST
        .iter()
        .filter_map(|name| crate::illuminant::find(name))
        .filter_map(|il| {
            let spd = il.spd()?;
            spectral_similarity_index(spd, sd).map(|ssi| (il.name().to_string(), ssi))
        })
        .collect()
}
