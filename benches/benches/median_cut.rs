use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use swatchgrade_core::quantize::median_cut;

fn synthetic_pixels(n: usize) -> Vec<[u8; 3]> {
    (0..n)
        .map(|i| [(i % 256) as u8, ((i * 7) % 256) as u8, ((i * 13) % 256) as u8])
        .collect()
}

fn bench_k(c: &mut Criterion) {
    let pixels = synthetic_pixels(10_000);

    let mut group = c.benchmark_group("median_cut_k");
    for k in [2, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| median_cut(black_box(&pixels), k, pixels.len()))
        });
    }
    group.finish();
}

fn bench_pixel_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("median_cut_pixel_count");
    for size in [100, 1_000, 10_000, 65_536] {
        group.throughput(Throughput::Elements(size as u64));
        let pixels = synthetic_pixels(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| median_cut(black_box(&pixels), 8, pixels.len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_k, bench_pixel_count);
criterion_main!(benches);
