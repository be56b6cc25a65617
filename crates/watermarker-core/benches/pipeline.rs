//! Benchmarks for the per-file transformations.
//!
//! Run with: cargo bench -p watermarker-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use watermarker_core::pipeline::composite::{composite_masked, scale_alpha};
use watermarker_core::pipeline::{resize, ImageWatermark};
use watermarker_core::Resolution;

fn benchmark_resize_stretch(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);
    let target = Resolution::new(900, 600);

    c.bench_function("resize_1080p_to_900x600", |b| {
        b.iter(|| resize(black_box(&img), target))
    });
}

fn benchmark_resize_pad(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(400, 300);
    let target = Resolution::new(900, 600);

    c.bench_function("resize_pad_400x300", |b| {
        b.iter(|| resize(black_box(&img), target))
    });
}

fn benchmark_composite(c: &mut Criterion) {
    let base = RgbaImage::from_pixel(1920, 1080, Rgba([30, 60, 90, 255]));
    let mut overlay = RgbaImage::from_pixel(1920, 1080, Rgba([255, 255, 255, 255]));
    scale_alpha(&mut overlay, 0.25);

    c.bench_function("composite_masked_1080p", |b| {
        b.iter(|| composite_masked(black_box(&overlay), black_box(&base)))
    });
}

fn benchmark_image_watermark(c: &mut Criterion) {
    let photo = DynamicImage::new_rgb8(1920, 1080);
    let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 80, Rgba([255, 255, 255, 200])));
    let stamp = ImageWatermark::new(&logo, 0.25);

    c.bench_function("image_watermark_1080p", |b| {
        b.iter(|| stamp.apply(black_box(&photo)))
    });
}

criterion_group!(
    benches,
    benchmark_resize_stretch,
    benchmark_resize_pad,
    benchmark_composite,
    benchmark_image_watermark,
);
criterion_main!(benches);
