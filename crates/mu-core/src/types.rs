//! Result value types shared by the inference routines.
//!
//! Everything here is produced once and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Maximum-likelihood estimate of a univariate Normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianFit {
    /// Mean estimate.
    pub mu: f64,
    /// Standard-deviation estimate (`> 0`).
    pub sigma: f64,
    /// Asymptotic standard error of `mu`: `sigma / sqrt(N)`.
    pub se_mu: f64,
    /// Asymptotic standard error of `sigma`: `sigma / sqrt(2N)`.
    pub se_sigma: f64,
}

impl GaussianFit {
    /// Build a fit from point estimates, deriving the asymptotic standard errors.
    pub fn from_estimates(mu: f64, sigma: f64, n: usize) -> Self {
        let n = n as f64;
        Self { mu, sigma, se_mu: sigma / n.sqrt(), se_sigma: sigma / (2.0 * n).sqrt() }
    }
}

/// Bootstrap distribution of a statistic plus its two-sided percentile interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Statistic evaluated on each resample, in resample order.
    pub values: Vec<f64>,
    /// `(lower, upper)` percentile interval.
    pub ci: (f64, f64),
    /// Confidence level in percent.
    pub ci_level: f64,
}

impl BootstrapResult {
    /// Number of resamples.
    pub fn n_boot(&self) -> usize {
        self.values.len()
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.ci.1 - self.ci.0
    }
}

/// Toy Monte-Carlo test of a mean against a null value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToyMcResult {
    /// Null-hypothesis mean.
    pub null_mu: f64,
    /// Observed standardized statistic.
    pub obs_z: f64,
    /// Standardized statistic of each toy, in toy order.
    pub toy_z: Vec<f64>,
    /// Two-sided p-value: fraction of toys with `|z_toy| >= |z_obs|`.
    pub pvalue: f64,
}

impl ToyMcResult {
    /// Number of toys.
    pub fn n_toys(&self) -> usize {
        self.toy_z.len()
    }
}
