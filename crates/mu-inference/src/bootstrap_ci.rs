//! Bootstrap confidence intervals.
//!
//! Resamples of size `N` are drawn with replacement from the sample, a scalar statistic is
//! evaluated on each, and the two-sided percentile interval of those values is reported.
//!
//! Randomness:
//! - [`bootstrap_ci`] seeds one `StdRng` per call and draws every resample from it in order;
//! - [`bootstrap_ci_parallel`] gives resample `i` its own generator seeded with
//!   `seed + i`, so the output does not depend on the number of threads.

use mu_core::{BootstrapResult, Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Quantile for sorted data via linear interpolation.
///
/// - `q=0` returns min
/// - `q=1` returns max
/// - empty input returns `NaN`
pub fn quantile_linear_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    (1.0 - t) * sorted[i] + t * sorted[j]
}

/// Quantile via sorting + linear interpolation.
pub fn quantile_linear(data: &[f64], q: f64) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    quantile_linear_sorted(&v, q)
}

fn validate_ci_level(ci: f64) -> Result<()> {
    if !(ci.is_finite() && ci > 0.0 && ci < 100.0) {
        return Err(Error::Validation(format!("ci must be a percentage in (0,100), got {ci}")));
    }
    Ok(())
}

/// Two-sided percentile interval at confidence level `ci` (percent).
///
/// `lower` is the `(100-ci)/2` percentile and `upper` the `100-(100-ci)/2` percentile.
/// Any `NaN` among `values` makes both bounds `NaN`.
pub fn percentile_interval(values: &[f64], ci: f64) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(Error::Validation("percentile_interval requires at least 1 value".to_string()));
    }
    validate_ci_level(ci)?;
    if values.iter().any(|v| v.is_nan()) {
        return Ok((f64::NAN, f64::NAN));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let tail = (100.0 - ci) / 2.0;
    let lo = quantile_linear_sorted(&sorted, tail / 100.0);
    let hi = quantile_linear_sorted(&sorted, (100.0 - tail) / 100.0);
    Ok((lo, hi))
}

/// Fill `out` with `sample.len()` draws from `sample`, uniformly with replacement.
pub fn resample_into<R: Rng + ?Sized>(sample: &[f64], out: &mut Vec<f64>, rng: &mut R) {
    let n = sample.len();
    out.clear();
    out.extend((0..n).map(|_| sample[rng.random_range(0..n)]));
}

fn validate_inputs(sample: &[f64], n_boot: usize, ci: f64) -> Result<()> {
    if sample.is_empty() {
        return Err(Error::Validation("cannot bootstrap an empty sample".to_string()));
    }
    if n_boot == 0 {
        return Err(Error::Validation("n_boot must be > 0".to_string()));
    }
    validate_ci_level(ci)
}

fn finish(values: Vec<f64>, ci: f64) -> Result<BootstrapResult> {
    let interval = percentile_interval(&values, ci)?;
    log::debug!(
        "bootstrap: n_boot={} ci{}=[{:.6}, {:.6}]",
        values.len(),
        ci,
        interval.0,
        interval.1
    );
    Ok(BootstrapResult { values, ci: interval, ci_level: ci })
}

/// Bootstrap `statistic` with a caller-supplied generator.
pub fn bootstrap_ci_with_rng<F, R>(
    sample: &[f64],
    statistic: F,
    n_boot: usize,
    ci: f64,
    rng: &mut R,
) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64,
    R: Rng + ?Sized,
{
    validate_inputs(sample, n_boot, ci)?;
    let mut buf = Vec::with_capacity(sample.len());
    let values = (0..n_boot)
        .map(|_| {
            resample_into(sample, &mut buf, rng);
            statistic(&buf)
        })
        .collect();
    finish(values, ci)
}

/// Bootstrap `statistic` over `n_boot` resamples drawn from one generator seeded with `seed`.
///
/// Identical inputs and seed give bit-identical results.
pub fn bootstrap_ci<F>(
    sample: &[f64],
    statistic: F,
    n_boot: usize,
    seed: u64,
    ci: f64,
) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64,
{
    let mut rng = StdRng::seed_from_u64(seed);
    bootstrap_ci_with_rng(sample, statistic, n_boot, ci, &mut rng)
}

/// Parallel bootstrap; resample `i` uses its own generator seeded with `seed + i`.
pub fn bootstrap_ci_parallel<F>(
    sample: &[f64],
    statistic: F,
    n_boot: usize,
    seed: u64,
    ci: f64,
) -> Result<BootstrapResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    validate_inputs(sample, n_boot, ci)?;
    let values: Vec<f64> = (0..n_boot)
        .into_par_iter()
        .with_min_len(16)
        .map_init(
            || Vec::with_capacity(sample.len()),
            |buf, i| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                resample_into(sample, buf, &mut rng);
                statistic(buf)
            },
        )
        .collect();
    finish(values, ci)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mu_prob::moments::{mean, std_dev};

    #[test]
    fn quantile_linear_sorted_edges() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((quantile_linear_sorted(&s, 0.0) - 1.0).abs() < 1e-12);
        assert!((quantile_linear_sorted(&s, 1.0) - 5.0).abs() < 1e-12);
        assert!((quantile_linear_sorted(&s, 0.5) - 3.0).abs() < 1e-12);
        assert!((quantile_linear_sorted(&s, 0.25) - 2.0).abs() < 1e-12);
        assert!((quantile_linear_sorted(&s, 0.1) - 1.4).abs() < 1e-12);
        assert!(quantile_linear_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn percentile_interval_matches_linear_interpolation() {
        let xs: Vec<f64> = (0..=100).rev().map(f64::from).collect();
        let (lo, hi) = percentile_interval(&xs, 95.0).unwrap();
        assert!((lo - 2.5).abs() < 1e-12);
        assert!((hi - 97.5).abs() < 1e-12);
    }

    #[test]
    fn percentile_interval_propagates_nan() {
        let (lo, hi) = percentile_interval(&[1.0, f64::NAN, 3.0], 95.0).unwrap();
        assert!(lo.is_nan() && hi.is_nan());
    }

    #[test]
    fn bootstrap_with_undefined_statistic_reports_nan_interval() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        let stat = |s: &[f64]| if s[0] == 4.0 { f64::NAN } else { mean(s) };
        let r = bootstrap_ci(&sample, stat, 200, 5, 95.0).unwrap();
        assert!(r.values.iter().any(|v| v.is_nan()));
        assert!(r.ci.0.is_nan() && r.ci.1.is_nan());

        let r = bootstrap_ci_parallel(&sample, stat, 200, 5, 95.0).unwrap();
        assert!(r.ci.0.is_nan() && r.ci.1.is_nan());
    }

    #[test]
    fn percentile_interval_rejects_bad_levels() {
        let xs = [1.0, 2.0];
        for ci in [0.0, 100.0, -5.0, 120.0, f64::NAN] {
            assert!(matches!(percentile_interval(&xs, ci), Err(Error::Validation(_))), "ci={ci}");
        }
        assert!(percentile_interval(&[], 95.0).is_err());
    }

    #[test]
    fn resample_draws_only_sample_values() {
        let sample = [1.5, -2.0, 7.25];
        let mut rng = StdRng::seed_from_u64(1);
        let mut buf = Vec::new();
        resample_into(&sample, &mut buf, &mut rng);
        assert_eq!(buf.len(), 3);
        assert!(buf.iter().all(|v| sample.contains(v)));
    }

    #[test]
    fn bootstrap_is_reproducible_for_fixed_seed() {
        let sample: Vec<f64> = (0..50).map(|i| ((i * 37) % 11) as f64 + 0.5).collect();
        let a = bootstrap_ci(&sample, mean, 300, 42, 95.0).unwrap();
        let b = bootstrap_ci(&sample, mean, 300, 42, 95.0).unwrap();
        assert_eq!(a.values, b.values);
        assert_eq!(a.ci, b.ci);
        assert_eq!(a.n_boot(), 300);

        let c = bootstrap_ci(&sample, mean, 300, 43, 95.0).unwrap();
        assert_ne!(a.values, c.values);
    }

    #[test]
    fn parallel_bootstrap_is_reproducible() {
        let sample: Vec<f64> = (0..40).map(|i| (i as f64).sin() * 3.0).collect();
        let stat = |s: &[f64]| std_dev(s, 1);
        let a = bootstrap_ci_parallel(&sample, stat, 257, 9, 90.0).unwrap();
        let b = bootstrap_ci_parallel(&sample, stat, 257, 9, 90.0).unwrap();
        assert_eq!(a.values, b.values);
        assert!(a.ci.0 <= a.ci.1);

        // Resample i depends only on seed + i.
        let mut rng = StdRng::seed_from_u64(9 + 5);
        let mut buf = Vec::new();
        resample_into(&sample, &mut buf, &mut rng);
        assert_eq!(a.values[5], std_dev(&buf, 1));
    }

    #[test]
    fn constant_statistic_gives_point_interval() {
        let r = bootstrap_ci(&[1.0, 2.0, 3.0], |_| 7.0, 10, 0, 95.0).unwrap();
        assert_eq!(r.ci, (7.0, 7.0));
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(matches!(bootstrap_ci(&[], mean, 10, 0, 95.0), Err(Error::Validation(_))));
        assert!(matches!(bootstrap_ci(&[1.0], mean, 0, 0, 95.0), Err(Error::Validation(_))));
        assert!(matches!(bootstrap_ci(&[1.0], mean, 10, 0, 100.0), Err(Error::Validation(_))));
    }
}
