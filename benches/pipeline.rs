//! Benchmarks for the brickify pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};

use brickify::types::{BuiltinCatalogs, Colour, QuantizedGrid};
use brickify::{quantize_image, render_panel, DitherMethod, QuantizeOptions, TilePacker};

/// Horizontal bands of catalog colours with a noisy edge, so the packer
/// sees both long runs and ragged boundaries.
fn banded_grid(width: u32, height: u32, palette: &[Colour]) -> QuantizedGrid {
    let mut grid = QuantizedGrid::filled(width, height, palette[0]);
    for y in 0..height {
        for x in 0..width {
            let band = (y / 3 + (x * 7 + y * 13) % 5 / 4) as usize;
            grid.set(x, y, palette[band % palette.len()]);
        }
    }
    grid
}

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        let b = ((x + y) * 127 / (width + height).max(1)) as u8;
        Rgba([r, g, b, 255])
    });
    DynamicImage::ImageRgba8(img)
}

// -- Packing benchmarks --

fn bench_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("packing");

    let catalog = BuiltinCatalogs::all();
    let palette = catalog.palette();
    let packer = TilePacker::new(&catalog);

    let small = banded_grid(16, 16, &palette);
    let large = banded_grid(128, 96, &palette);
    let solid = QuantizedGrid::filled(128, 96, palette[0]);

    group.bench_function("pack_small", |b| {
        b.iter(|| packer.pack(black_box(&small)).unwrap())
    });

    group.bench_function("pack_large", |b| {
        b.iter(|| packer.pack(black_box(&large)).unwrap())
    });

    group.bench_function("pack_solid", |b| {
        b.iter(|| packer.pack(black_box(&solid)).unwrap())
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let catalog = BuiltinCatalogs::all();
    let panel = TilePacker::new(&catalog)
        .pack(&banded_grid(48, 36, &catalog.palette()))
        .unwrap();

    group.bench_function("render_outlined", |b| {
        b.iter(|| render_panel(black_box(&panel), 16, true).unwrap())
    });

    group.bench_function("render_flat", |b| {
        b.iter(|| render_panel(black_box(&panel), 16, false).unwrap())
    });

    group.finish();
}

// -- Quantization benchmarks --

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantization");

    let palette = BuiltinCatalogs::all().palette();
    let img = gradient_image(640, 480);

    for (name, dither) in [
        ("quantize_direct", DitherMethod::None),
        ("dither_ordered", DitherMethod::Ordered),
        ("dither_floyd_steinberg", DitherMethod::FloydSteinberg),
    ] {
        let opts = QuantizeOptions {
            dither,
            ..Default::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| quantize_image(black_box(&img), 48, &palette, &opts).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_packing, bench_rendering, bench_quantization);
criterion_main!(benches);
