use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use swatchgrade_core::ciede2000::ciede2000;
use swatchgrade_core::lab::Lab;

fn bench_single(c: &mut Criterion) {
    let black = Lab::new(0.0, 0.0, 0.0);
    let white = Lab::new(100.0, 0.0, 0.0);

    c.bench_function("ciede2000_single", |b| {
        b.iter(|| ciede2000(black_box(black), black_box(white)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("ciede2000_batch");

    for size in [10, 100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        let foregrounds: Vec<Lab> =
            (0..size).map(|i| Lab::new((i % 100) as f64, ((i % 50) as f64) - 25.0, ((i % 60) as f64) - 30.0)).collect();
        let background = Lab::new(50.0, 10.0, -10.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut total = 0.0;
                for lab in &foregrounds {
                    total += ciede2000(black_box(*lab), black_box(background));
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
