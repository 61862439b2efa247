//! Toy Monte-Carlo test of a sample mean against a null value.
//!
//! The observed statistic is the standardized mean
//! `z = (mean - null_mu) / (s / sqrt(N))` with `s` the Bessel-corrected standard deviation.
//! Toys are Normal samples of the same size, centred on `null_mu` and spread by the
//! *observed* `s`, and each toy is reduced to the same statistic.
//!
//! Randomness:
//! - [`toy_mc_pvalue`] seeds one `StdRng` per call and generates toys in order from it;
//! - [`toy_mc_pvalue_parallel`] generates toy `i` from its own generator seeded with `seed + i`.

use mu_core::{Error, Result, ToyMcResult};
use mu_prob::moments::{mean, std_dev};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

/// Standardized mean `(mean - null_mu) / (s / sqrt(N))`, `s` with `ddof = 1`.
///
/// Returns `NaN` for fewer than 2 values; `±inf` or `NaN` when `s == 0`.
pub fn standardized_mean(xs: &[f64], null_mu: f64) -> f64 {
    let n = xs.len() as f64;
    (mean(xs) - null_mu) / (std_dev(xs, 1) / n.sqrt())
}

/// Fraction of `toy_z` with `|z| >= |obs_z|`. Ties count as extreme.
pub fn two_sided_pvalue(obs_z: f64, toy_z: &[f64]) -> f64 {
    if toy_z.is_empty() {
        return f64::NAN;
    }
    let obs = obs_z.abs();
    let n_extreme = toy_z.iter().filter(|z| z.abs() >= obs).count();
    n_extreme as f64 / toy_z.len() as f64
}

struct Prepared {
    obs_z: f64,
    null: Normal<f64>,
}

fn prepare(sample: &[f64], null_mu: f64, n_toys: usize) -> Result<Prepared> {
    if sample.len() < 2 {
        return Err(Error::Validation(format!(
            "toy MC requires at least 2 values, got {}",
            sample.len()
        )));
    }
    if n_toys == 0 {
        return Err(Error::Validation("n_toys must be > 0".to_string()));
    }
    if !null_mu.is_finite() {
        return Err(Error::Validation(format!("null_mu must be finite, got {null_mu}")));
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::Validation("sample contains non-finite values".to_string()));
    }

    // Two-pass rounding can leave a tiny non-zero std for all-equal samples such as [0.1; 3].
    let obs_std = std_dev(sample, 1);
    if sample.iter().all(|&x| x == sample[0]) || !(obs_std > 0.0 && obs_std.is_finite()) {
        return Err(Error::DegenerateSample(
            "observed standard deviation is zero; standardized mean is undefined".to_string(),
        ));
    }
    let obs_z = standardized_mean(sample, null_mu);
    let null = Normal::new(null_mu, obs_std)
        .map_err(|e| Error::Computation(format!("invalid null distribution: {e}")))?;
    Ok(Prepared { obs_z, null })
}

fn toy_statistic<R: Rng + ?Sized>(
    null: &Normal<f64>,
    null_mu: f64,
    buf: &mut Vec<f64>,
    n: usize,
    rng: &mut R,
) -> f64 {
    buf.clear();
    buf.extend((0..n).map(|_| null.sample(rng)));
    standardized_mean(buf, null_mu)
}

fn finish(null_mu: f64, obs_z: f64, toy_z: Vec<f64>) -> ToyMcResult {
    let pvalue = two_sided_pvalue(obs_z, &toy_z);
    log::debug!(
        "toy MC: n_toys={} null_mu={} z_obs={:.6} p={:.6}",
        toy_z.len(),
        null_mu,
        obs_z,
        pvalue
    );
    ToyMcResult { null_mu, obs_z, toy_z, pvalue }
}

/// Toy MC p-value with a caller-supplied generator.
pub fn toy_mc_pvalue_with_rng<R: Rng + ?Sized>(
    sample: &[f64],
    null_mu: f64,
    n_toys: usize,
    rng: &mut R,
) -> Result<ToyMcResult> {
    let Prepared { obs_z, null } = prepare(sample, null_mu, n_toys)?;
    let n = sample.len();
    let mut buf = Vec::with_capacity(n);
    let toy_z = (0..n_toys).map(|_| toy_statistic(&null, null_mu, &mut buf, n, rng)).collect();
    Ok(finish(null_mu, obs_z, toy_z))
}

/// Two-sided toy MC p-value; all toys come from one generator seeded with `seed`.
///
/// Fails with [`Error::DegenerateSample`] when the sample has zero spread.
pub fn toy_mc_pvalue(
    sample: &[f64],
    null_mu: f64,
    n_toys: usize,
    seed: u64,
) -> Result<ToyMcResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    toy_mc_pvalue_with_rng(sample, null_mu, n_toys, &mut rng)
}

/// Parallel toy MC p-value; toy `i` uses its own generator seeded with `seed + i`.
pub fn toy_mc_pvalue_parallel(
    sample: &[f64],
    null_mu: f64,
    n_toys: usize,
    seed: u64,
) -> Result<ToyMcResult> {
    let Prepared { obs_z, null } = prepare(sample, null_mu, n_toys)?;
    let n = sample.len();
    let toy_z: Vec<f64> = (0..n_toys)
        .into_par_iter()
        .with_min_len(16)
        .map_init(
            || Vec::with_capacity(n),
            |buf, toy_idx| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(toy_idx as u64));
                toy_statistic(&null, null_mu, buf, n, &mut rng)
            },
        )
        .collect();
    Ok(finish(null_mu, obs_z, toy_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<f64> {
        vec![0.3, -0.1, 0.8, 1.2, 0.4, 0.0, 0.9, 0.5, -0.4, 0.7]
    }

    #[test]
    fn standardized_mean_hand_computed() {
        // mean 2, s = 1, N = 3
        let xs = [1.0, 2.0, 3.0];
        assert!((standardized_mean(&xs, 1.0) - 3f64.sqrt()).abs() < 1e-12);
        assert!(standardized_mean(&[1.0], 0.0).is_nan());
    }

    #[test]
    fn pvalue_counts_ties_as_extreme() {
        assert_eq!(two_sided_pvalue(1.0, &[1.0, -1.0, 0.5, 0.0]), 0.5);
        assert_eq!(two_sided_pvalue(0.0, &[0.0, 3.0]), 1.0);
        assert!(two_sided_pvalue(1.0, &[]).is_nan());
    }

    #[test]
    fn toy_mc_reproducible_and_bounded() {
        let xs = sample();
        let a = toy_mc_pvalue(&xs, 0.0, 500, 42).unwrap();
        let b = toy_mc_pvalue(&xs, 0.0, 500, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n_toys(), 500);
        assert!((0.0..=1.0).contains(&a.pvalue));
        assert!((a.obs_z - standardized_mean(&xs, 0.0)).abs() < 1e-15);
    }

    #[test]
    fn toy_mc_null_at_sample_mean_is_not_significant() {
        let xs = sample();
        let r = toy_mc_pvalue(&xs, mean(&xs), 200, 7).unwrap();
        assert!(r.obs_z.abs() < 1e-12);
        assert_eq!(r.pvalue, 1.0);
    }

    #[test]
    fn toy_mc_far_null_is_significant() {
        let xs = sample();
        let r = toy_mc_pvalue(&xs, 100.0, 200, 7).unwrap();
        assert_eq!(r.pvalue, 0.0);
    }

    #[test]
    fn zero_spread_is_degenerate() {
        let err = toy_mc_pvalue(&[2.0, 2.0, 2.0], 0.0, 10, 1).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample(_)));
        let err = toy_mc_pvalue_parallel(&[2.0, 2.0], 0.0, 10, 1).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample(_)));
    }

    #[test]
    fn repeated_inexact_value_is_degenerate() {
        // mean of [0.1; 3] rounds to 0.10000000000000002
        let err = toy_mc_pvalue(&[0.1; 3], 0.0, 10, 1).unwrap_err();
        assert!(matches!(err, Error::DegenerateSample(_)), "got {err}");
    }

    proptest! {
        #[test]
        fn prop_all_equal_samples_are_degenerate(
            value in -1e6f64..1e6,
            n in 2usize..40,
            null_mu in -10.0f64..10.0,
        ) {
            let xs = vec![value; n];
            let seq = toy_mc_pvalue(&xs, null_mu, 5, 3);
            prop_assert!(matches!(seq, Err(Error::DegenerateSample(_))));
            let par = toy_mc_pvalue_parallel(&xs, null_mu, 5, 3);
            prop_assert!(matches!(par, Err(Error::DegenerateSample(_))));
        }
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(matches!(toy_mc_pvalue(&[1.0], 0.0, 10, 1), Err(Error::Validation(_))));
        assert!(matches!(toy_mc_pvalue(&sample(), 0.0, 0, 1), Err(Error::Validation(_))));
        assert!(matches!(toy_mc_pvalue(&sample(), f64::NAN, 10, 1), Err(Error::Validation(_))));
        let err = toy_mc_pvalue(&[1.0, f64::INFINITY], 0.0, 10, 1).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn parallel_toys_are_seeded_per_index() {
        let xs = sample();
        let a = toy_mc_pvalue_parallel(&xs, 0.2, 100, 11).unwrap();
        let b = toy_mc_pvalue_parallel(&xs, 0.2, 100, 11).unwrap();
        assert_eq!(a, b);

        let null = Normal::new(0.2, std_dev(&xs, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(11 + 3);
        let mut buf = Vec::new();
        let z3 = toy_statistic(&null, 0.2, &mut buf, xs.len(), &mut rng);
        assert_eq!(a.toy_z[3], z3);
    }
}
