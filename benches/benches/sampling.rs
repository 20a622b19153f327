use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use swatchgrade_vision::{analyze, PixelImage};

fn solid_image(size: u32) -> PixelImage {
    let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            rgba.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
        }
    }
    PixelImage::from_rgba8(size, size, rgba).unwrap()
}

/// Below MAX_SAMPLES: full foreground pass-through, no blur/Sobel selection.
fn bench_small_image_full_passthrough(c: &mut Criterion) {
    let image = solid_image(64);
    c.bench_function("sampling_passthrough_64x64", |b| {
        b.iter(|| analyze(black_box(&image), 8, 10_000))
    });
}

/// Above MAX_SAMPLES: exercises the Gaussian blur + Sobel top-K selection +
/// stratified grid fill.
fn bench_large_image_weighted_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling_weighted");
    for size in [128, 256] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let image = solid_image(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| analyze(black_box(&image), 8, 2_000))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_small_image_full_passthrough, bench_large_image_weighted_sampling);
criterion_main!(benches);
