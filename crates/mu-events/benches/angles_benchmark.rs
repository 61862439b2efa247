use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mu_events::{JaggedCol, pairwise_angles, summarize_angles};
use std::hint::black_box;

/// Deterministic synthetic events with 0..=5 particles each.
fn synthetic_events(n_events: usize) -> (JaggedCol, JaggedCol, JaggedCol) {
    let mut pt = JaggedCol::with_capacity(n_events, n_events * 3);
    let mut eta = JaggedCol::with_capacity(n_events, n_events * 3);
    let mut phi = JaggedCol::with_capacity(n_events, n_events * 3);
    for e in 0..n_events {
        let n = e % 6;
        pt.push_row_iter((0..n).map(|i| 5.0 + ((e * 31 + i * 7) % 97) as f64));
        eta.push_row_iter((0..n).map(|i| ((e * 13 + i * 5) % 50) as f64 * 0.1 - 2.5));
        phi.push_row_iter((0..n).map(|i| ((e * 17 + i * 11) % 628) as f64 * 0.01 - 3.14));
    }
    (pt, eta, phi)
}

fn bench_pairwise_angles(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_angles");
    for &n in &[1_000usize, 100_000] {
        let (pt, eta, phi) = synthetic_events(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(pairwise_angles(&pt, &eta, &phi).unwrap()))
        });
    }
    group.finish();

    let (pt, eta, phi) = synthetic_events(100_000);
    let angles = pairwise_angles(&pt, &eta, &phi).unwrap();
    c.bench_function("summarize_angles_100k", |b| b.iter(|| black_box(summarize_angles(&angles))));
}

criterion_group!(benches, bench_pairwise_angles);
criterion_main!(benches);
