//! Convert command.
//!
//! Builds a [`RawInput`] from the argument groups, lets the engine detect the
//! model, runs the conversion and prints every record as text or JSON.

use crate::ConvertArgs;
use anyhow::{Context, Result};
use chroma_engine::{
    CancelToken, ConversionRequest, ConversionResult, Engine, EngineConfig, PrecalculatedData, RawInput, ResultSet,
    SpectralReport, SpectrumArgs, detect,
};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use super::{engine_error, format_triplet, read_json, to_json, write_json};

/// Runs the convert command.
pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let raw = raw_input(&args)?;
    let input = detect(&raw, args.bit_depth).map_err(engine_error)?;
    info!(model = %input.model(), depth = %args.bit_depth, "detected input");

    let request = build_request(&args, input);
    let config = match &args.config {
        Some(path) => read_json::<EngineConfig>(path)?,
        None => EngineConfig::default(),
    };
    let precalculated = args.precalculated.as_deref().map(load_precalculated).transpose()?;

    let engine = Engine::new(config);
    let results = engine
        .convert_with(&request, precalculated.as_ref(), &CancelToken::new())
        .map_err(engine_error)?;
    debug!(records = results.len(), "conversion finished");

    if let Some(path) = &args.output {
        write_json(path, &results, args.pretty)?;
        if verbose {
            eprintln!("Wrote {} records to {}", results.len(), path.display());
        }
    }

    if args.json {
        println!("{}", to_json(&results, args.pretty)?);
    } else if args.output.is_none() || verbose {
        print_text(&results);
    }

    Ok(())
}

/// Merges the argument groups into one raw input. Spectral flags override
/// the fields of `--spectrum-file`.
fn raw_input(args: &ConvertArgs) -> Result<RawInput> {
    let mut spectrum: SpectrumArgs = match &args.spectrum_file {
        Some(path) => read_json(path)?,
        None => SpectrumArgs::default(),
    };
    spectrum.start = args.spectrum_start.or(spectrum.start);
    spectrum.stop = args.spectrum_stop.or(spectrum.stop);
    spectrum.interval = args.spectrum_interval.or(spectrum.interval);
    spectrum.kind = args.spectrum_type.or(spectrum.kind);
    if let Some(data) = &args.spectrum_data {
        spectrum.data = Some(data.clone());
    }

    Ok(RawInput {
        rgb: triplet(&args.rgb),
        xyz: triplet(&args.xyz),
        lab: triplet(&args.lab),
        lchab: triplet(&args.lchab),
        luv: triplet(&args.luv),
        lchuv: triplet(&args.lchuv),
        spectrum,
        wavelength: args.wavelength,
    })
}

/// Up to three values into component slots; missing ones stay empty.
fn triplet(values: &Option<Vec<f64>>) -> [Option<f64>; 3] {
    let mut out = [None; 3];
    for (slot, v) in out.iter_mut().zip(values.iter().flatten()) {
        *slot = Some(*v);
    }
    out
}

fn build_request(args: &ConvertArgs, input: chroma_engine::ColorInput) -> ConversionRequest {
    let mut request = ConversionRequest::new(input).with_recovery(args.recover);
    if let Some(observer) = &args.observer {
        request = request.with_observer(observer.as_str());
    }
    if let Some(illuminant) = &args.illuminant {
        request = request.with_illuminant(illuminant.as_str());
    }
    if let Some(list) = &args.illuminant_list {
        request = request.with_illuminant_list(list.as_str());
    }
    if let Some(cat) = &args.cat {
        request = request.with_cat(cat.as_str());
    }
    if let Some(space) = &args.rgb_space {
        request = request.with_rgb_space(space.as_str());
    }
    if let Some(space) = &args.input_rgb_space {
        request = request.with_input_rgb_space(space.as_str());
    }
    if let Some(interval) = args.interpolate {
        request = request.with_interpolation(interval);
    }
    if let Some(format) = args.tm30 {
        request = request.with_tm30(format);
    }
    request
}

/// Reads either a bare record array or a full result set written by `--output`.
fn load_precalculated(path: &Path) -> Result<PrecalculatedData> {
    let value: Value = read_json(path)?;
    let data = if value.get("records").is_some() {
        serde_json::from_value::<ResultSet>(value).map(PrecalculatedData::from)
    } else {
        serde_json::from_value::<PrecalculatedData>(value)
    };
    let data = data.with_context(|| format!("Invalid precalculated data: {}", path.display()))?;
    info!(records = data.records.len(), "loaded precalculated data");
    Ok(data)
}

// ============================================================================
// Text output
// ============================================================================

fn print_text(results: &ResultSet) {
    for (i, record) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_record(record);
    }
    if let Some(spectral) = &results.spectral {
        println!();
        print_spectral(spectral);
    }
}

fn print_record(r: &ConversionResult) {
    let k = &r.key;
    println!("{} | {} | {} | {}", k.observer, k.illuminant, k.cat, k.rgb_space);
    println!("  White:   {}", format_triplet(&r.white_point, 6));
    println!("  XYZ:     {}", format_triplet(&r.xyz, 6));
    println!("  xyY:     {}", format_triplet(&r.xyy, 6));
    println!("  u'v':    {}", format_triplet(&r.uv, 6));
    println!("  Lab:     {}", format_triplet(&r.lab, 4));
    println!("  LCHab:   {}", format_triplet(&r.lchab, 4));
    println!("  Luv:     {}", format_triplet(&r.luv, 4));
    println!("  LCHuv:   {}", format_triplet(&r.lchuv, 4));

    let rgb = &r.rgb;
    let gamut = if rgb.out_of_gamut { " (out of gamut)" } else { "" };
    println!("  RGB:     {}{gamut}", format_triplet(&rgb.encoded, 6));
    println!("  Linear:  {}", format_triplet(&rgb.linear, 6));
    println!("  Scaled:  {} @ {}", format_triplet(&rgb.scaled, 2), rgb.depth);
    println!("  Hex:     {}", rgb.hex);
    println!("  HSL:     {}", format_triplet(&rgb.hsl, 4));
    println!("  HSV:     {}", format_triplet(&rgb.hsv, 4));
    println!("  CMY:     {}", format_triplet(&rgb.cmy, 4));
    println!("  CMYK:    {}", format_triplet(&rgb.cmyk, 4));

    let q = &r.qualities;
    if let (Some(cct), Some(duv), Some(mired)) = (q.cct, q.duv, q.mired) {
        println!("  CCT:     {cct:.1} K (Duv {duv:.5}, {mired:.2} mired)");
    }
    if let (Some(d), Some(c)) = (q.dominant_wavelength, q.complementary_wavelength) {
        println!("  Dominant: {d:.2} nm, complementary {c:.2} nm");
    }
    if let (Some(pe), Some(pc)) = (q.excitation_purity, q.colorimetric_purity) {
        println!("  Purity:  excitation {pe:.4}, colorimetric {pc:.4}");
    }
    println!(
        "  Whiteness: CIE {:.2} (tint {:.2}), E313 {:.2}, Berger {:.2}, Stensby {:.2}",
        q.whiteness_cie, q.tint_cie, q.whiteness_e313, q.whiteness_berger, q.whiteness_stensby
    );
    println!("  Yellowness: E313 {:.2}, D1925 {:.2}", q.yellowness_e313, q.yellowness_d1925);
}

fn print_spectral(s: &SpectralReport) {
    println!("Spectral");
    if let Some(sd) = s.distribution() {
        println!(
            "  Distribution: {} samples, {}-{} nm @ {} nm ({})",
            sd.len(),
            sd.start(),
            sd.stop(),
            sd.interval(),
            sd.kind()
        );
    }
    if let Some(rec) = &s.recovery {
        let status = if rec.converged { "converged" } else { "not converged" };
        println!(
            "  Recovery:     dE {:.5} after {} iterations ({status})",
            rec.residual, rec.iterations
        );
    }
    if let Some(sum) = &s.summary {
        println!("  CCT:          {:.1} K (Duv {:.5})", sum.cct, sum.duv);
        println!("  Peak:         {} nm", sum.peak_wavelength);
        if let Some(ler) = sum.luminous_efficacy {
            println!("  Efficacy:     {ler:.2} lm/W");
        }
        if let (Some(eff), Some(flux)) = (sum.luminous_efficiency, sum.luminous_flux) {
            println!("  Efficiency:   {eff:.4}, flux {flux:.2} lm");
        }
        if let Some(ssi) = &sum.ssi {
            let scores: Vec<String> = ssi.iter().map(|(name, v)| format!("{name} {v:.0}")).collect();
            println!("  SSI:          {}", scores.join(", "));
        }
    }
    if let Some(tm30) = &s.tm30 {
        println!("  TM-30:        Rf {:.1}, Rg {:.1}", tm30.rf(), tm30.rg());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triplet_slots() {
        assert_eq!(triplet(&None), [None; 3]);
        assert_eq!(triplet(&Some(vec![1.0, 2.0])), [Some(1.0), Some(2.0), None]);
        assert_eq!(triplet(&Some(vec![1.0, 2.0, 3.0])), [Some(1.0), Some(2.0), Some(3.0)]);
    }
}
