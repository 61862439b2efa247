//! Normal distribution likelihood utilities.

use crate::math::exp_clamped;
use crate::moments::sum_sq_dev;

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed to keep this crate const-friendly).
const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Negative log-likelihood of an i.i.d. sample under `N(mu, exp(log_sigma))`.
///
/// `N*ln(sqrt(2π)) + N*ln σ + 0.5*Σ(x-mu)²/σ²`; any real `log_sigma` is valid.
pub fn sample_nll_log_sigma(xs: &[f64], mu: f64, log_sigma: f64) -> f64 {
    let n = xs.len() as f64;
    let var = exp_clamped(2.0 * log_sigma);
    n * (LN_SQRT_2PI + log_sigma) + 0.5 * sum_sq_dev(xs, mu) / var
}

/// Gradient of [`sample_nll_log_sigma`] with respect to `(mu, ln sigma)`.
///
/// `d/dmu = -Σ(x-mu)/σ²`, `d/dlnσ = N - Σ(x-mu)²/σ²`
pub fn sample_nll_log_sigma_grad(xs: &[f64], mu: f64, log_sigma: f64) -> [f64; 2] {
    let n = xs.len() as f64;
    let var = exp_clamped(2.0 * log_sigma);
    let sum_dev: f64 = xs.iter().map(|&x| x - mu).sum();
    [-sum_dev / var, n - sum_sq_dev(xs, mu) / var]
}
