//! End-to-end properties of the conversion engine.

use approx::assert_abs_diff_eq;
use chroma_color::Cat;
use chroma_color::convert::{lab_to_lch, lab_to_xyz, lch_to_lab};
use chroma_color::rgb::{rgb_to_xyz, xyz_to_rgb};
use chroma_engine::{
    BitDepth, ConversionRequest, Engine, ErrorKind, RawInput, Registry, Selection, SpectrumArgs, detect,
};
use chroma_math::Vec3;
use chroma_primaries::WORKING_SPACES;
use chroma_spectral::{Observer, SpectralDistribution, SpectrumType, Tm30Format, illuminant};
use std::collections::HashSet;

fn rgb8(r: f64, g: f64, b: f64) -> RawInput {
    RawInput {
        rgb: [Some(r), Some(g), Some(b)],
        ..Default::default()
    }
}

fn spectrum(values: Vec<f64>, start: f64, stop: f64, interval: f64, kind: SpectrumType) -> RawInput {
    RawInput {
        spectrum: SpectrumArgs {
            start: Some(start),
            stop: Some(stop),
            interval: Some(interval),
            kind: Some(kind),
            data: Some(values),
        },
        ..Default::default()
    }
}

#[test]
fn test_xyz_rgb_round_trip_every_space() {
    let samples = [
        Vec3::new(0.2, 0.3, 0.4),
        Vec3::new(0.95, 1.0, 1.08),
        Vec3::new(0.05, 0.02, 0.3),
        Vec3::new(0.6, 0.4, 0.01),
        Vec3::ZERO,
    ];
    for space in &WORKING_SPACES {
        for xyz in samples {
            let enc = xyz_to_rgb(xyz, space).unwrap();
            let back = rgb_to_xyz(enc.unclamped, space).unwrap();
            assert!((back - xyz).length() < 1e-6, "{}: {xyz:?} -> {back:?}", space.name);
        }
    }
}

#[test]
fn test_polar_consistency() {
    for l in [0.0, 25.0, 50.0, 100.0] {
        for a in [-120.0, -30.0, 0.0, 0.5, 80.0] {
            for b in [-90.0, -1e-9, 0.0, 45.0, 110.0] {
                let lab = Vec3::new(l, a, b);
                let lch = lab_to_lch(lab).unwrap();
                assert!((0.0..360.0).contains(&lch.z), "hue {} for {lab:?}", lch.z);
                let back = lch_to_lab(lch).unwrap();
                assert_abs_diff_eq!(back.y, a, epsilon = 1e-9);
                assert_abs_diff_eq!(back.z, b, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_cat_none_is_identity() {
    let whites = [
        illuminant::find("A").unwrap(),
        illuminant::find("D65").unwrap(),
        illuminant::find("FL11").unwrap(),
    ];
    let xyz = Vec3::new(0.31, 0.27, 0.66);
    for src in whites {
        for dst in whites {
            let adapted = Cat::None
                .adapt(xyz, src.white_point(Observer::Cie1931), dst.white_point(Observer::Cie1964))
                .unwrap();
            assert_eq!(adapted, xyz);
        }
    }

    // Engine level: XYZ input with no adaptation encodes directly
    let raw = RawInput {
        xyz: [Some(0.3), Some(0.25), Some(0.1)],
        ..Default::default()
    };
    let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap())
        .with_illuminant("A")
        .with_cat("None");
    let results = Engine::default().convert(&request).unwrap();
    let srgb = Registry::global().rgb_space("sRGB").unwrap();
    let direct = xyz_to_rgb(Vec3::new(0.3, 0.25, 0.1), srgb).unwrap();
    assert_eq!(results.records[0].rgb.linear, direct.linear.to_array());
}

#[test]
fn test_full_scale_agrees_across_depths() {
    let eight = detect(&rgb8(255.0, 255.0, 255.0), BitDepth::Eight).unwrap();
    let raw16 = RawInput {
        rgb: [Some(65535.0); 3],
        ..Default::default()
    };
    let sixteen = detect(&raw16, BitDepth::Sixteen).unwrap();

    let engine = Engine::default();
    let a = engine.convert(&ConversionRequest::new(eight)).unwrap();
    let b = engine.convert(&ConversionRequest::new(sixteen)).unwrap();
    assert_eq!(a.records[0].xyz, b.records[0].xyz);
    assert_eq!(a.records[0].lab, b.records[0].lab);
    assert_eq!(a.records[0].rgb.scaled, [255.0; 3]);
    assert_eq!(b.records[0].rgb.scaled, [65535.0; 3]);
}

#[test]
fn test_cross_product_is_complete() {
    let registry = Registry::global();
    let n = registry.illuminant_list("All").unwrap().len();
    let m = registry.cats(&Selection::All).unwrap().len();

    let raw = RawInput {
        lchab: [Some(60.0), Some(40.0), Some(200.0)],
        ..Default::default()
    };
    let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap())
        .with_observer(Selection::All)
        .with_illuminant_list("All")
        .with_cat(Selection::All);
    let results = Engine::default().convert(&request).unwrap();

    assert_eq!(results.len(), 2 * n * m);
    let keys: HashSet<_> = results.iter().map(|r| r.key.clone()).collect();
    assert_eq!(keys.len(), results.len());
}

#[test]
fn test_spectral_round_trip() {
    let values: Vec<f64> = (0..=80)
        .map(|i| 0.5 + 0.35 * (i as f64 / 9.0).sin() * (i as f64 / 31.0).cos())
        .collect();
    let sd = SpectralDistribution::build(values, 380.0, 780.0, 5.0, SpectrumType::Reflective).unwrap();
    let fine = sd.interpolate(1.0).unwrap();
    assert_eq!(fine.len(), 401);
    let back = fine.interpolate(5.0).unwrap();
    assert_eq!(back.len(), sd.len());
    for (a, b) in sd.values().iter().zip(back.values()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_reference_rgb_scenario() {
    let request = ConversionRequest::new(detect(&rgb8(132.0, 205.0, 12.0), BitDepth::Eight).unwrap())
        .with_observer("CIE 1931 2 Degree Standard Observer")
        .with_illuminant("D65")
        .with_cat("Bradford")
        .with_rgb_space("sRGB");
    let results = Engine::default().convert(&request).unwrap();
    assert_eq!(results.len(), 1);
    let r = &results.records[0];

    assert!((70.0..=85.0).contains(&r.lab[0]), "L* = {}", r.lab[0]);

    let white = Vec3::from_array(r.white_point);
    let xyz = lab_to_xyz(Vec3::from_array(r.lab), white).unwrap();
    assert_abs_diff_eq!(xyz.x, r.xyz[0], epsilon = 1e-9);
    assert_abs_diff_eq!(xyz.y, r.xyz[1], epsilon = 1e-9);
    assert_abs_diff_eq!(xyz.z, r.xyz[2], epsilon = 1e-9);

    let lab = lch_to_lab(Vec3::from_array(r.lchab)).unwrap();
    assert_abs_diff_eq!(lab.y, r.lab[1], epsilon = 1e-9);
    assert_abs_diff_eq!(lab.z, r.lab[2], epsilon = 1e-9);
    let luv = lch_to_lab(Vec3::from_array(r.lchuv)).unwrap();
    assert_abs_diff_eq!(luv.y, r.luv[1], epsilon = 1e-9);
    assert_abs_diff_eq!(luv.z, r.luv[2], epsilon = 1e-9);

    for (c, expected) in r.rgb.scaled.iter().zip([132.0, 205.0, 12.0]) {
        assert_abs_diff_eq!(*c, expected, epsilon = 1e-6);
    }
    assert!(!r.rgb.out_of_gamut);
}

#[test]
fn test_tm30_needs_five_nanometers() {
    let d65 = illuminant::find("D65").unwrap().spd().unwrap();
    let coarse: Vec<f64> = (0..=47).map(|i| d65.value_at(360.0 + 10.0 * i as f64)).collect();
    let raw = spectrum(coarse, 360.0, 830.0, 10.0, SpectrumType::Emissive);
    let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap()).with_tm30(Tm30Format::Full);
    let err = Engine::default().convert(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResolution);

    // Interpolating first makes the same data eligible
    let results = Engine::default()
        .convert(&request.with_interpolation(5.0))
        .unwrap();
    let tm30 = results.spectral.unwrap().tm30.unwrap();
    assert!(tm30.rf() > 95.0, "Rf {}", tm30.rf());
}

#[test]
fn test_emissive_tm30_projection() {
    let a = illuminant::find("A").unwrap().spd().unwrap();
    let raw = spectrum(a.values().to_vec(), 360.0, 830.0, 5.0, SpectrumType::Emissive);
    let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap()).with_tm30(Tm30Format::Simple);
    let results = Engine::default().convert(&request).unwrap();
    let spectral = results.spectral.unwrap();

    let summary = spectral.summary.unwrap();
    assert!((2700.0..3000.0).contains(&summary.cct), "CCT {}", summary.cct);
    assert!(summary.luminous_efficacy.is_some());

    let json = serde_json::to_value(spectral.tm30.unwrap()).unwrap();
    assert_eq!(json["format"], "Simple");
    assert!(json.get("bins").is_none());
    assert!(json["rf"].as_f64().unwrap() > 99.0);
}

#[test]
fn test_errors_surface_their_kind() {
    let engine = Engine::default();
    let ok = || ConversionRequest::new(detect(&rgb8(1.0, 2.0, 3.0), BitDepth::Eight).unwrap());

    let err = engine.convert(&ok().with_observer("CIE 2015")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
    let err = engine.convert(&ok().with_rgb_space("Rec.601")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);
    let err = engine.convert(&ok().with_illuminant_list("F")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownReference);

    let raw = spectrum(vec![0.5; 41], 380.0, 780.0, 10.0, SpectrumType::Reflective);
    let request = ConversionRequest::new(detect(&raw, BitDepth::Eight).unwrap()).with_interpolation(7.0);
    assert_eq!(engine.convert(&request).unwrap_err().kind(), ErrorKind::InterpolationRange);

    let raw = spectrum(vec![0.5; 41], 380.0, 780.0, 10.0, SpectrumType::Reflective);
    let mut bad = raw.clone();
    bad.spectrum.data = Some(vec![1.5; 41]);
    assert_eq!(detect(&bad, BitDepth::Eight).unwrap_err().kind(), ErrorKind::SpectralRange);
}
