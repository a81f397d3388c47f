//! Result aggregator.
//!
//! Resolves a [`ConversionRequest`] against the [`Registry`], runs the
//! spectral stage once per request, then fans the Cartesian product of
//! observers × illuminants × CATs × working spaces out over rayon and
//! collects one [`ConversionResult`] per tuple.
//!
//! # Pipeline
//!
//! ```text
//! request ─► resolve selections ─► spectral stage (interpolate, recover,
//!                   │                summarize, TM-30)
//!                   ▼
//!        tuples (o, I, c, S) ──par_iter──► tristimulus under W(o, I)
//!                                              │
//!                     xyY, u'v', Lab, LCHab, Luv, LCHuv, RGB in S,
//!                     CCT, dominant wavelength, whiteness
//!                                              │
//!                               sort by key ◄──┘
//! ```
//!
//! # White points
//!
//! Every record is expressed against the white `W` of its illuminant and
//! observer. How the input reaches `W` depends on its model:
//!
//! | Input | Tristimulus under `W` |
//! |-------|-----------------------|
//! | Lab, LCHab, Luv, LCHuv | decoded against `W` |
//! | XYZ | taken as is |
//! | RGB | decoded in the input space, adapted space white → `W` |
//! | reflective/transmissive spectrum | integrated under the illuminant SPD |
//! | emissive spectrum, wavelength | relative to E, adapted E → `W` |
//!
//! RGB output adapts `W` → working-space white with the tuple's CAT;
//! [`Cat::None`] skips adaptation on both sides.
//!
//! # Failure
//!
//! Any failing tuple fails the whole run. A cancelled run returns
//! [`EngineError::Cancelled`] and no records.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chroma_color::convert::{
    lab_to_lch, lab_to_xyz, lch_to_lab, luv_to_xyz, xyz_to_lab, xyz_to_luv, xyz_to_uv, xyz_to_xyy,
};
use chroma_color::rgb::{rgb_to_xyz, xyz_to_rgb};
use chroma_color::{Cat, ColorError};
use chroma_math::Vec3;
use chroma_primaries::WorkingSpace;
use chroma_spectral::colorimetry::equal_energy_white;
use chroma_spectral::{
    Illuminant, Observer, SpectralDistribution, SpectralError, recover, spectral_to_xyz, summarize, tm30,
    wavelength_to_xyz,
};
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

use crate::result::{Qualities, RgbOutput};
use crate::{
    BitDepth, ColorInput, ColorValue, ConversionRequest, ConversionResult, EngineConfig, EngineError, EngineResult,
    PrecalculatedData, Registry, ResultKey, ResultSet, SpectralReport,
};

// ============================================================================
// Cancellation
// ============================================================================

/// Cooperative cancellation flag, checked before each tuple.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// One point of the parameter cross product.
#[derive(Debug, Clone, Copy)]
struct Tuple {
    observer: Observer,
    illuminant: &'static Illuminant,
    cat: Cat,
    space: &'static WorkingSpace,
}

impl Tuple {
    fn key(&self) -> ResultKey {
        ResultKey {
            observer: self.observer.name().to_string(),
            illuminant: self.illuminant.name().to_string(),
            cat: self.cat.name().to_string(),
            rgb_space: self.space.name.to_string(),
        }
    }
}

/// Request with every name resolved.
struct Plan<'r> {
    request: &'r ConversionRequest,
    input_illuminant: &'static Illuminant,
    input_space: &'static WorkingSpace,
    tuples: Vec<Tuple>,
}

fn resolve<'r>(registry: &Registry, request: &'r ConversionRequest) -> EngineResult<Plan<'r>> {
    let needs_spd = request.input.is_object_spectrum();

    let input_illuminant = registry.illuminant(&request.illuminant)?;
    if needs_spd && !input_illuminant.has_spd() {
        return Err(EngineError::unknown("illuminant spectral distribution", input_illuminant.name()));
    }

    let illuminants: Vec<&'static Illuminant> = match &request.illuminant_list {
        Some(list) => {
            let members = registry.illuminant_list(list)?;
            if needs_spd {
                let (kept, dropped): (Vec<&'static Illuminant>, Vec<&'static Illuminant>) = members.iter().copied().partition(|i| i.has_spd());
                if !dropped.is_empty() {
                    info!(
                        list = %list,
                        dropped = ?dropped.iter().map(|i| i.name()).collect::<Vec<_>>(),
                        "excluding illuminants without a spectral power distribution"
                    );
                }
                kept
            } else {
                members.to_vec()
            }
        }
        None => vec![input_illuminant],
    };

    let observers = registry.observers(&request.observer)?;
    let cats = registry.cats(&request.cat)?;
    let spaces = registry.rgb_spaces(&request.rgb_space)?;
    let input_space = registry.rgb_space(&request.input_rgb_space)?;

    let mut tuples = Vec::with_capacity(observers.len() * illuminants.len() * cats.len() * spaces.len());
    for &observer in &observers {
        for &illuminant in &illuminants {
            for &cat in &cats {
                for &space in &spaces {
                    tuples.push(Tuple {
                        observer,
                        illuminant,
                        cat,
                        space,
                    });
                }
            }
        }
    }

    debug!(
        model = %request.input.model(),
        observers = observers.len(),
        illuminants = illuminants.len(),
        cats = cats.len(),
        spaces = spaces.len(),
        "resolved request"
    );

    Ok(Plan {
        request,
        input_illuminant,
        input_space,
        tuples,
    })
}

// ============================================================================
// Engine
// ============================================================================

/// The conversion engine.
///
/// # Example
///
/// ```rust
/// use chroma_engine::{BitDepth, ConversionRequest, Engine, RawInput, detect};
///
/// let raw = RawInput { rgb: [Some(132.0), Some(205.0), Some(12.0)], ..Default::default() };
/// let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap());
/// let results = Engine::default().convert(&request).unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results.records[0].rgb.hex, "#84CD0C");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with an explicit configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes every record of `request`.
    pub fn convert(&self, request: &ConversionRequest) -> EngineResult<ResultSet> {
        self.convert_with(request, None, &CancelToken::new())
    }

    /// Computes `request`, reusing `precalculated` records for matching
    /// tuples and honoring `cancel`.
    ///
    /// # Errors
    ///
    /// The first error of resolution, the spectral stage or any tuple;
    /// [`EngineError::Cancelled`] if `cancel` fired.
    pub fn convert_with(
        &self,
        request: &ConversionRequest,
        precalculated: Option<&PrecalculatedData>,
        cancel: &CancelToken,
    ) -> EngineResult<ResultSet> {
        let plan = resolve(Registry::global(), request)?;
        let spectral = self.spectral_stage(&plan)?;

        let reuse = precalculated.map(PrecalculatedData::index).unwrap_or_default();
        let source = spectral.as_ref().and_then(|s| s.interpolated.as_ref().or(s.source.as_ref()));
        let depth = request.depth().unwrap_or_default();

        let mut records = plan
            .tuples
            .par_iter()
            .map(|tuple| {
                if cancel.is_cancelled() {
                    return Err(EngineError::Cancelled);
                }
                let key = tuple.key();
                if let Some(&record) = reuse.get(&key) {
                    trace!(?key, "using precalculated record");
                    return Ok(record.clone());
                }
                self.convert_tuple(&plan, tuple, key, source, depth)
            })
            .collect::<EngineResult<Vec<_>>>()?;

        if let Some(data) = precalculated {
            let unused = data.records.len().saturating_sub(
                records
                    .iter()
                    .filter(|r| reuse.contains_key(&r.key))
                    .count(),
            );
            if unused > 0 {
                debug!(unused, "ignoring precalculated records outside the request");
            }
        }

        records.sort_by(|a, b| a.key.cmp(&b.key));
        info!(records = records.len(), "conversion complete");
        Ok(ResultSet { records, spectral })
    }

    // ========================================================================
    // Spectral stage
    // ========================================================================

    fn spectral_stage(&self, plan: &Plan<'_>) -> EngineResult<Option<SpectralReport>> {
        let request = plan.request;
        let mut report = SpectralReport {
            source: request.input.spectrum().cloned(),
            ..Default::default()
        };

        if request.recover {
            if report.source.is_some() {
                debug!("spectral input given, skipping reflectance recovery");
            } else {
                let xyz = self.recovery_target(plan)?;
                let recovery = recover(xyz, plan.input_illuminant, &self.config.recovery)?;
                if !recovery.converged {
                    warn!(
                        residual = recovery.residual,
                        iterations = recovery.iterations,
                        "reflectance recovery did not reach tolerance"
                    );
                }
                report.recovery = Some(recovery);
            }
        }

        if let Some(interval) = request.interpolation_interval {
            let base = report
                .source
                .as_ref()
                .or(report.recovery.as_ref().map(|r| &r.distribution));
            match base {
                Some(sd) => report.interpolated = Some(sd.interpolate(interval)?),
                None => warn!(interval, "no spectral data to interpolate"),
            }
        }

        let Some(sd) = report.distribution().cloned() else {
            if request.tm30.is_some() {
                return Err(EngineError::NoSpectrum { operation: "TM-30" });
            }
            return Ok(None);
        };

        report.summary = Some(summarize(&sd, plan.input_illuminant)?);

        if let Some(format) = request.tm30 {
            let full = tm30::evaluate(&sd, plan.input_illuminant, &self.config.viewing)?;
            info!(rf = full.rf, rg = full.rg, cct = full.cct, "TM-30");
            report.tm30 = Some(full.project(format));
        }

        Ok(Some(report))
    }

    /// Input XYZ relative to the input illuminant's spectral white, CIE 1931 2°.
    fn recovery_target(&self, plan: &Plan<'_>) -> EngineResult<Vec3> {
        let observer = Observer::Cie1931;
        let illuminant = plan.input_illuminant;
        let spectral_white = illuminant
            .spectral_white_point(observer)
            .ok_or_else(|| SpectralError::MissingSpd(illuminant.name().to_string()))?;
        let (xyz, catalog_white) = tristimulus(
            &plan.request.input,
            None,
            observer,
            illuminant,
            self.config.recovery_cat,
            plan.input_space,
        )?;
        Ok(self.config.recovery_cat.adapt(xyz, catalog_white, spectral_white)?)
    }

    // ========================================================================
    // Per tuple
    // ========================================================================

    fn convert_tuple(
        &self,
        plan: &Plan<'_>,
        tuple: &Tuple,
        key: ResultKey,
        source: Option<&SpectralDistribution>,
        depth: BitDepth,
    ) -> EngineResult<ConversionResult> {
        let (xyz, white) = tristimulus(
            &plan.request.input,
            source,
            tuple.observer,
            tuple.illuminant,
            tuple.cat,
            plan.input_space,
        )?;

        let xyy = xyz_to_xyy(xyz, white)?;
        let (u, v) = xyz_to_uv(xyz);
        let lab = xyz_to_lab(xyz, white)?;
        let luv = xyz_to_luv(xyz, white)?;

        let space_xyz = tuple.cat.adapt(xyz, white, tuple.space.white_xyz())?;
        let rgb = RgbOutput::from_encoding(&xyz_to_rgb(space_xyz, tuple.space)?, depth);
        let qualities = Qualities::measure(xyz, lab, white, tuple.observer, tuple.illuminant.name(), tuple.cat)?;

        trace!(?key, xyz = ?xyz.to_array(), "tuple");
        Ok(ConversionResult {
            key,
            white_point: white.to_array(),
            xyz: xyz.to_array(),
            xyy: xyy.to_array(),
            uv: [u, v],
            lab: lab.to_array(),
            lchab: lab_to_lch(lab)?.to_array(),
            luv: luv.to_array(),
            lchuv: lab_to_lch(luv)?.to_array(),
            rgb,
            qualities,
        })
    }
}

/// Tristimulus value of `input` and the white it is relative to.
///
/// `source` overrides the input distribution (the interpolated copy).
fn tristimulus(
    input: &ColorInput,
    source: Option<&SpectralDistribution>,
    observer: Observer,
    illuminant: &Illuminant,
    cat: Cat,
    input_space: &WorkingSpace,
) -> EngineResult<(Vec3, Vec3)> {
    let white = illuminant.white_point(observer);
    let from_equal_energy =
        |xyz: Vec3| -> Result<Vec3, ColorError> { cat.adapt(xyz, equal_energy_white(observer), white) };

    let xyz = match input {
        ColorInput::Color(value) => {
            let v = value.triplet().vec();
            match value {
                ColorValue::Xyz(_) => v,
                ColorValue::Lab(_) => lab_to_xyz(v, white)?,
                ColorValue::LchAb(_) => lab_to_xyz(lch_to_lab(v)?, white)?,
                ColorValue::Luv(_) => luv_to_xyz(v, white)?,
                ColorValue::LchUv(_) => luv_to_xyz(lch_to_lab(v)?, white)?,
                ColorValue::Rgb(_) => cat.adapt(rgb_to_xyz(v, input_space)?, input_space.white_xyz(), white)?,
            }
        }
        ColorInput::Spectrum(sd) => {
            let sd = source.unwrap_or(sd);
            let xyz = spectral_to_xyz(sd, observer, illuminant)?;
            if sd.kind().is_object() {
                let spectral_white = illuminant
                    .spectral_white_point(observer)
                    .ok_or_else(|| SpectralError::MissingSpd(illuminant.name().to_string()))?;
                return Ok((xyz, spectral_white));
            }
            from_equal_energy(xyz)?
        }
        ColorInput::Wavelength(nm) => from_equal_energy(wavelength_to_xyz(*nm, observer)?)?,
    };
    Ok((xyz, white))
}
