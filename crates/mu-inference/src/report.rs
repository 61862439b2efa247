//! One-call analysis of a numeric sample and its JSON-ready report.

use std::time::Instant;

use crate::bootstrap_ci::{bootstrap_ci, bootstrap_ci_parallel};
use crate::mle::MaximumLikelihoodEstimator;
use crate::toys::{toy_mc_pvalue, toy_mc_pvalue_parallel};
use mu_core::{BootstrapResult, GaussianFit, Result, ToyMcResult};
use mu_prob::moments::{mean, std_dev};
use serde::{Deserialize, Serialize};

/// Confidence level (percent) of the intervals in [`StatsReport`].
pub const REPORT_CI_LEVEL: f64 = 95.0;

/// Settings for [`analyze_sample`]. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the analysed column; carried into the report as a label.
    pub column: String,
    /// Bootstrap resamples per statistic.
    pub n_boot: usize,
    /// Toy datasets for the p-value.
    pub n_toys: usize,
    /// Null-hypothesis mean.
    pub null_mu: f64,
    /// Base seed. Mean bootstrap uses `seed`, sigma bootstrap `seed + 1`, toys `seed + 2`.
    pub seed: u64,
    /// Use the rayon variants (per-iteration seeding).
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            column: "mean_angle_deg".to_string(),
            n_boot: 2000,
            n_toys: 2000,
            null_mu: 0.0,
            seed: 42,
            parallel: false,
        }
    }
}

/// MLE block of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MleReport {
    /// Mean estimate.
    pub mu: f64,
    /// Standard-deviation estimate.
    pub sigma: f64,
    /// Standard error of `mu`.
    pub se_mu: f64,
    /// Standard error of `sigma`.
    pub se_sigma: f64,
    /// Wall time of the fit in seconds.
    pub mle_time_s: f64,
}

/// Bootstrap block of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Resamples per statistic.
    pub n_boot: usize,
    /// 95% interval of the sample mean.
    pub mean_ci_95: (f64, f64),
    /// 95% interval of the sample standard deviation (`ddof = 1`).
    pub sigma_ci_95: (f64, f64),
}

/// Toy MC block of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToyMcReport {
    /// Null-hypothesis mean.
    pub null_mu: f64,
    /// Number of toys.
    pub n_toys: usize,
    /// Observed standardized mean.
    pub obs_z: f64,
    /// Two-sided p-value.
    pub pvalue: f64,
}

/// Summary of one analysis run, without the resampled distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Analysed column.
    pub column: String,
    /// Sample size.
    pub n: usize,
    /// Gaussian fit.
    pub mle: MleReport,
    /// Bootstrap intervals.
    pub bootstrap: BootstrapReport,
    /// Toy MC test.
    pub toy_mc: ToyMcReport,
    /// Base seed.
    pub seed: u64,
}

impl StatsReport {
    /// Report as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Full in-memory result of [`analyze_sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Gaussian fit.
    pub fit: GaussianFit,
    /// Bootstrap of the mean.
    pub mean_bootstrap: BootstrapResult,
    /// Bootstrap of the standard deviation.
    pub sigma_bootstrap: BootstrapResult,
    /// Toy MC test with the full toy distribution.
    pub toy_mc: ToyMcResult,
    /// Serializable summary.
    pub report: StatsReport,
}

fn sample_sigma(xs: &[f64]) -> f64 {
    std_dev(xs, 1)
}

/// Fit, bootstrap and test `sample` as configured.
///
/// Stops at the first failing stage and returns its error.
pub fn analyze_sample(sample: &[f64], config: &AnalysisConfig) -> Result<AnalysisOutcome> {
    let n = sample.len();
    log::debug!(
        "analyze '{}': n={} n_boot={} n_toys={} seed={} parallel={}",
        config.column,
        n,
        config.n_boot,
        config.n_toys,
        config.seed,
        config.parallel
    );

    let t0 = Instant::now();
    let fit = MaximumLikelihoodEstimator::new().fit_gaussian(sample)?;
    let mle_time_s = t0.elapsed().as_secs_f64();

    let seed_mean = config.seed;
    let seed_sigma = config.seed.wrapping_add(1);
    let seed_toys = config.seed.wrapping_add(2);

    let (mean_bootstrap, sigma_bootstrap, toy_mc) = if config.parallel {
        (
            bootstrap_ci_parallel(sample, mean, config.n_boot, seed_mean, REPORT_CI_LEVEL)?,
            bootstrap_ci_parallel(
                sample,
                sample_sigma,
                config.n_boot,
                seed_sigma,
                REPORT_CI_LEVEL,
            )?,
            toy_mc_pvalue_parallel(sample, config.null_mu, config.n_toys, seed_toys)?,
        )
    } else {
        (
            bootstrap_ci(sample, mean, config.n_boot, seed_mean, REPORT_CI_LEVEL)?,
            bootstrap_ci(sample, sample_sigma, config.n_boot, seed_sigma, REPORT_CI_LEVEL)?,
            toy_mc_pvalue(sample, config.null_mu, config.n_toys, seed_toys)?,
        )
    };

    let report = StatsReport {
        column: config.column.clone(),
        n,
        mle: MleReport {
            mu: fit.mu,
            sigma: fit.sigma,
            se_mu: fit.se_mu,
            se_sigma: fit.se_sigma,
            mle_time_s,
        },
        bootstrap: BootstrapReport {
            n_boot: config.n_boot,
            mean_ci_95: mean_bootstrap.ci,
            sigma_ci_95: sigma_bootstrap.ci,
        },
        toy_mc: ToyMcReport {
            null_mu: toy_mc.null_mu,
            n_toys: toy_mc.n_toys(),
            obs_z: toy_mc.obs_z,
            pvalue: toy_mc.pvalue,
        },
        seed: config.seed,
    };

    Ok(AnalysisOutcome { fit, mean_bootstrap, sigma_bootstrap, toy_mc, report })
}
