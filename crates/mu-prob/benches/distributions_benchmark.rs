use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_sample_likelihood(c: &mut Criterion) {
    let xs: Vec<f64> = (0..10_000).map(|i| 90.0 + (i as f64) * 0.001 - 5.0).collect();

    c.bench_function("normal_sample_nll_10k", |b| {
        b.iter(|| black_box(mu_prob::normal::sample_nll_log_sigma(&xs, 90.0, 0.5)))
    });

    c.bench_function("normal_sample_nll_grad_10k", |b| {
        b.iter(|| black_box(mu_prob::normal::sample_nll_log_sigma_grad(&xs, 90.0, 0.5)))
    });

    c.bench_function("std_dev_ddof1_10k", |b| {
        b.iter(|| black_box(mu_prob::moments::std_dev(&xs, 1)))
    });

    c.bench_function("min_mean_max_10k", |b| {
        b.iter(|| black_box(mu_prob::moments::min_mean_max(&xs)))
    });
}

criterion_group!(benches, bench_sample_likelihood);
criterion_main!(benches);
