//! Benchmarks for xdrcal hot paths.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use half::f16;
use std::hint::black_box;

use xdr_color::peak::{scan_peak_parallel, scan_peak_serial};
use xdr_color::{composite, BlendParams, ReferencePair};
use xdr_core::{DecodedImage, FrameEncoding, Gamut, PixelData};
use xdr_pattern::{generate, rasterize, Pattern, PatternInput};
use xdr_transfer::Eotf;

/// EOTF code/nits conversions over the full code range.
fn bench_eotf(c: &mut Criterion) {
    let mut group = c.benchmark_group("eotf");
    let codes: Vec<f32> = (0..=1023).map(|i| i as f32).collect();
    group.throughput(Throughput::Elements(codes.len() as u64));

    for eotf in Eotf::ALL {
        group.bench_with_input(BenchmarkId::new("to_nits", eotf.short_name()), &codes, |b, v| {
            b.iter(|| v.iter().map(|&x| eotf.to_nits(black_box(x))).collect::<Vec<_>>())
        });
        group.bench_with_input(BenchmarkId::new("convert_code", eotf.short_name()), &codes, |b, v| {
            b.iter(|| v.iter().map(|&x| eotf.convert_code(black_box(x), Eotf::Pq)).collect::<Vec<_>>())
        });
    }

    group.finish();
}

fn hdr_image(width: u32, height: u32) -> DecodedImage {
    let data: Vec<f16> = (0..width * height)
        .flat_map(|i| {
            let v = f16::from_f32((i % 997) as f32 / 100.0);
            [v, v, v, f16::ONE]
        })
        .collect();
    DecodedImage::new(width, height, Gamut::DisplayP3, PixelData::RgbaF16(data)).expect("valid image")
}

fn sdr_image(width: u32, height: u32) -> DecodedImage {
    let data: Vec<u8> = (0..width * height).flat_map(|i| [(i % 256) as u8, 128, 64, 255]).collect();
    DecodedImage::new(width, height, Gamut::DisplayP3, PixelData::Rgba8(data)).expect("valid image")
}

/// Peak scan of the full-range decode.
fn bench_peak(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_scan");

    for (w, h) in [(1920u32, 1080u32), (3840, 2160)] {
        let img = hdr_image(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        let id = format!("{w}x{h}");
        group.bench_with_input(BenchmarkId::new("serial", &id), &img, |b, img| {
            b.iter(|| scan_peak_serial(black_box(img)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", &id), &img, |b, img| {
            b.iter(|| scan_peak_parallel(black_box(img)))
        });
    }

    group.finish();
}

/// Headroom blend of a P3 reference pair.
fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    let (w, h) = (1920u32, 1080u32);
    let pair = ReferencePair::new(sdr_image(w, h), hdr_image(w, h)).expect("matching decodes");
    let params = BlendParams::compute(true, pair.peak_hdr(), Some(1.5), 6.0);
    group.throughput(Throughput::Elements((w * h) as u64));

    for encoding in [FrameEncoding::ScRgb, FrameEncoding::DisplayNative] {
        group.bench_function(format!("{encoding:?}"), |b| {
            b.iter(|| composite(black_box(&pair), &params, encoding))
        });
    }

    group.finish();
}

/// Pattern generation plus rasterization at 4K.
fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern");
    let input = PatternInput {
        width: 3840,
        height: 2160,
        eotf: Eotf::Pq,
        hdr: true,
        desktop_is_hdr: true,
        code_a: 0,
        code_b: 1023,
        ..PatternInput::default()
    };

    for pattern in [Pattern::Chessboard, Pattern::GammaRamp, Pattern::Banding] {
        group.bench_function(pattern.name(), |b| {
            b.iter(|| {
                let list = generate(pattern, black_box(&input));
                rasterize(&list, input.width, input.height, FrameEncoding::ScRgb, 0.1, None)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eotf, bench_peak, bench_composite, bench_patterns);
criterion_main!(benches);
