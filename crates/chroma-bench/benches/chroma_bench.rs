//! Benchmarks for chroma operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use chroma_color::Cat;
use chroma_color::cam02::ViewingConditions;
use chroma_color::convert::{lab_to_lch, lab_to_xyz, xyz_to_lab, xyz_to_luv};
use chroma_color::rgb::{rgb_to_xyz, xyz_to_rgb};
use chroma_engine::{BitDepth, ConversionRequest, Engine, RawInput, Selection, detect};
use chroma_math::Vec3;
use chroma_primaries::WORKING_SPACES;
use chroma_spectral::{Observer, RecoveryConfig, illuminant, recover, spectral_to_xyz, tm30};
use chroma_transfer::{rec709, srgb};

fn samples(n: usize) -> Vec<Vec3> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            Vec3::new(0.05 + 0.9 * t, 0.05 + 0.9 * (1.0 - t), 0.05 + 0.9 * (t * 7.0).fract())
        })
        .collect()
}

/// Benchmark transfer function encode/decode.
fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    for size in [1000, 100000] {
        let values: Vec<f64> = (0..size).map(|i| i as f64 / size as f64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("srgb_eotf", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| srgb::eotf(black_box(x))).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("srgb_oetf", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| srgb::oetf(black_box(x))).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("rec709_oetf", size), &values, |b, v| {
            b.iter(|| v.iter().map(|&x| rec709::oetf(black_box(x))).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Benchmark the tristimulus conversion graph.
fn bench_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let xyz = samples(10000);
    let white = illuminant::find("D65").map(|i| i.white_point(Observer::Cie1931)).unwrap_or(Vec3::ONE);
    group.throughput(Throughput::Elements(xyz.len() as u64));

    group.bench_function("xyz_to_lab", |b| {
        b.iter(|| xyz.iter().map(|&v| xyz_to_lab(black_box(v), white)).collect::<Vec<_>>())
    });
    group.bench_function("lab_round_trip", |b| {
        b.iter(|| {
            xyz.iter()
                .filter_map(|&v| xyz_to_lab(black_box(v), white).ok())
                .filter_map(|lab| lab_to_lch(lab).ok().map(|_| lab))
                .filter_map(|lab| lab_to_xyz(lab, white).ok())
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("xyz_to_luv", |b| {
        b.iter(|| xyz.iter().map(|&v| xyz_to_luv(black_box(v), white)).collect::<Vec<_>>())
    });

    for space in WORKING_SPACES.iter().take(3) {
        group.bench_function(BenchmarkId::new("xyz_rgb_xyz", space.name), |b| {
            b.iter(|| {
                xyz.iter()
                    .filter_map(|&v| xyz_to_rgb(black_box(v), space).ok())
                    .filter_map(|enc| rgb_to_xyz(enc.unclamped, space).ok())
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

/// Benchmark chromatic adaptation transforms.
fn bench_adaptation(c: &mut Criterion) {
    let mut group = c.benchmark_group("adaptation");
    let xyz = samples(10000);
    let a = illuminant::find("A").map(|i| i.white_point(Observer::Cie1931)).unwrap_or(Vec3::ONE);
    let d65 = illuminant::find("D65").map(|i| i.white_point(Observer::Cie1931)).unwrap_or(Vec3::ONE);
    group.throughput(Throughput::Elements(xyz.len() as u64));

    for cat in [Cat::Bradford, Cat::Cat16, Cat::Cmccat97] {
        group.bench_function(cat.name(), |b| {
            b.iter(|| xyz.iter().map(|&v| cat.adapt(black_box(v), a, d65)).collect::<Vec<_>>())
        });
    }

    group.finish();
}

/// Benchmark spectral integration, recovery and TM-30.
fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral");
    let Some(d65) = illuminant::find("D65") else {
        return;
    };
    let Some(a_spd) = illuminant::find("A").and_then(|i| i.spd()) else {
        return;
    };

    group.bench_function("spectral_to_xyz", |b| {
        b.iter(|| spectral_to_xyz(black_box(a_spd), Observer::Cie1931, d65))
    });

    let config = RecoveryConfig::default();
    group.bench_function("recover", |b| {
        b.iter(|| recover(black_box(Vec3::new(0.3, 0.45, 0.1)), d65, &config))
    });

    let fine = a_spd.interpolate(1.0);
    group.bench_function("interpolate_1nm", |b| b.iter(|| black_box(a_spd).interpolate(1.0)));
    if let Ok(fine) = fine {
        group.bench_function("tm30_1nm", |b| {
            b.iter(|| tm30::evaluate(black_box(&fine), d65, &ViewingConditions::default()))
        });
    }

    group.finish();
}

/// Benchmark the engine's parallel cross product.
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let engine = Engine::default();
    let raw = RawInput {
        rgb: [Some(132.0), Some(205.0), Some(12.0)],
        ..Default::default()
    };
    let Ok(input) = detect(&raw, BitDepth::Eight) else {
        return;
    };

    let single = ConversionRequest::new(input.clone());
    group.bench_function("single", |b| b.iter(|| engine.convert(black_box(&single))));

    let full = ConversionRequest::new(input)
        .with_observer(Selection::All)
        .with_illuminant_list("All")
        .with_cat(Selection::All)
        .with_rgb_space(Selection::All);
    group.sample_size(10);
    group.bench_function("full_cross_product", |b| b.iter(|| engine.convert(black_box(&full))));

    group.finish();
}

criterion_group!(
    benches,
    bench_transfer,
    bench_conversions,
    bench_adaptation,
    bench_spectral,
    bench_engine,
);
criterion_main!(benches);
