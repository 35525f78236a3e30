//! Autoscaling benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plotframe_scale::{compute, finite_outline, nice_range, Axes, Axis, Dataset, Grid2, RangeOptions};

fn bench_nice_range(c: &mut Criterion) {
    let options = RangeOptions {
        snap: true,
        ..Default::default()
    };
    c.bench_function("nice_range", |b| {
        b.iter(|| nice_range(black_box(-3.7), black_box(912.4), &options))
    });
}

fn bench_guru(c: &mut Criterion) {
    let x: Vec<f64> = (0..10_000).map(|i| i as f64 * 0.01).collect();
    let y: Vec<f64> = x.iter().map(|v| v.sin() * 40.0).collect();
    let axes = Axes::xy(
        Axis::builder().snap(true).build().unwrap(),
        Axis::builder().snap(true).build().unwrap(),
    );
    c.bench_function("guru_10k_samples", |b| {
        b.iter(|| {
            let data = [Dataset::xy(black_box(&x), black_box(&y)).unwrap()];
            compute(&data, &axes)
        })
    });
}

fn bench_outline(c: &mut Criterion) {
    let n = 200;
    let z = Grid2::from_fn(n, n, |row, col| if row + col < n { 1.0 } else { f64::NAN });
    let coords: Vec<f64> = (0..n).map(|i| i as f64).collect();
    c.bench_function("finite_outline_200", |b| {
        b.iter(|| finite_outline(black_box(&coords), black_box(&coords), black_box(&z)))
    });
}

criterion_group!(benches, bench_nice_range, bench_guru, bench_outline);
criterion_main!(benches);
