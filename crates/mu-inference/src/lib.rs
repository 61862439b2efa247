//! # mu-inference
//!
//! Statistical inference on a flat numeric sample.
//!
//! This crate provides:
//! - Gaussian maximum-likelihood fit via L-BFGS (argmin)
//! - bootstrap percentile confidence intervals for any scalar statistic
//! - toy Monte-Carlo two-sided p-value of the sample mean
//! - a one-call analysis producing a JSON-ready report
//!
//! ## Randomness
//!
//! Every seeded routine is a pure function of `(inputs, seed)`. Sequential variants draw
//! from one `StdRng` per call; `*_parallel` variants seed iteration `i` with `seed + i`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Bootstrap resampling and percentile intervals.
pub mod bootstrap_ci;
/// Gaussian maximum-likelihood estimation.
pub mod mle;
/// Generic numerical optimizer (L-BFGS backend).
pub mod optimizer;
/// Analysis orchestration and report.
pub mod report;
/// Toy Monte-Carlo p-value.
pub mod toys;

pub use bootstrap_ci::{
    bootstrap_ci, bootstrap_ci_parallel, bootstrap_ci_with_rng, percentile_interval,
    quantile_linear, quantile_linear_sorted,
};
pub use mle::{GaussianFitOutcome, MaximumLikelihoodEstimator, fit_gaussian};
pub use optimizer::{LbfgsOptimizer, ObjectiveFunction, OptimizationResult, OptimizerConfig};
pub use report::{AnalysisConfig, AnalysisOutcome, REPORT_CI_LEVEL, StatsReport, analyze_sample};
pub use toys::{standardized_mean, toy_mc_pvalue, toy_mc_pvalue_parallel, toy_mc_pvalue_with_rng};

pub use mu_core::{BootstrapResult, Error, GaussianFit, Result, ToyMcResult};
