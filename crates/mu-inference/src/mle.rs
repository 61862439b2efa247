//! Maximum Likelihood Estimation of a univariate Normal.
//!
//! The fit runs in `(mu, ln sigma)` so the optimizer sees an unconstrained problem.
//! Standard errors are the asymptotic ones, `sigma/sqrt(N)` and `sigma/sqrt(2N)`; they do
//! not depend on the optimizer's curvature estimate.

use crate::optimizer::{LbfgsOptimizer, ObjectiveFunction, OptimizationResult, OptimizerConfig};
use mu_core::{Error, GaussianFit, Result};
use mu_prob::moments::{mean, std_dev};
use mu_prob::normal::{sample_nll_log_sigma, sample_nll_log_sigma_grad};

/// Floor for the initial standard deviation, so an all-equal sample does not start at `ln 0`.
pub const MIN_INITIAL_SIGMA: f64 = 1e-6;

/// Gaussian NLL over `(mu, ln sigma)`, divided by the sample size.
///
/// Scaling by `1/N` leaves the minimizer unchanged and keeps the gradient tolerance
/// meaningful for any sample size.
struct GaussianNll<'a> {
    xs: &'a [f64],
}

impl ObjectiveFunction for GaussianNll<'_> {
    fn eval(&self, params: &[f64]) -> Result<f64> {
        let n = self.xs.len() as f64;
        Ok(sample_nll_log_sigma(self.xs, params[0], params[1]) / n)
    }

    fn gradient(&self, params: &[f64]) -> Result<Vec<f64>> {
        let n = self.xs.len() as f64;
        let [d_mu, d_log_sigma] = sample_nll_log_sigma_grad(self.xs, params[0], params[1]);
        Ok(vec![d_mu / n, d_log_sigma / n])
    }
}

/// Starting point `[mean, ln(max(std_pop, MIN_INITIAL_SIGMA))]`.
pub fn gaussian_initial_params(xs: &[f64]) -> [f64; 2] {
    [mean(xs), std_dev(xs, 0).max(MIN_INITIAL_SIGMA).ln()]
}

fn validate_sample(xs: &[f64]) -> Result<()> {
    if xs.is_empty() {
        return Err(Error::Validation("cannot fit an empty sample".to_string()));
    }
    if let Some(i) = xs.iter().position(|v| !v.is_finite()) {
        return Err(Error::Validation(format!("sample value {i} is not finite: {}", xs[i])));
    }
    Ok(())
}

/// A Gaussian fit together with the optimizer run that produced it.
#[derive(Debug, Clone)]
pub struct GaussianFitOutcome {
    /// Estimates and standard errors.
    pub fit: GaussianFit,
    /// Raw optimizer result, parameters in `(mu, ln sigma)`.
    pub optimization: OptimizationResult,
}

/// Maximum Likelihood Estimator
///
/// Fits a Normal by minimizing its negative log-likelihood.
#[derive(Clone, Default)]
pub struct MaximumLikelihoodEstimator {
    config: OptimizerConfig,
}

impl MaximumLikelihoodEstimator {
    /// Create a new MLE with default configuration
    pub fn new() -> Self {
        Self { config: OptimizerConfig::default() }
    }

    /// Create MLE with custom optimizer configuration
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Fit `N(mu, sigma)` to `xs`.
    pub fn fit_gaussian(&self, xs: &[f64]) -> Result<GaussianFit> {
        validate_sample(xs)?;
        Ok(self.fit_gaussian_from(xs, gaussian_initial_params(xs))?.fit)
    }

    /// Fit `N(mu, sigma)` to `xs` from an explicit `[mu, ln sigma]` starting point.
    ///
    /// Fails with [`Error::OptimizationFailure`] if the optimizer aborts or stops without
    /// converging; the starting point is never returned as a result.
    pub fn fit_gaussian_from(&self, xs: &[f64], init: [f64; 2]) -> Result<GaussianFitOutcome> {
        validate_sample(xs)?;
        let optimizer = LbfgsOptimizer::new(self.config.clone());
        let opt = optimizer.minimize(&GaussianNll { xs }, &init)?;
        if !opt.converged {
            return Err(Error::OptimizationFailure(format!(
                "Gaussian MLE did not converge after {} iterations: {}",
                opt.n_iter, opt.message
            )));
        }

        let mu = opt.parameters[0];
        let sigma = opt.parameters[1].exp();
        if !(mu.is_finite() && sigma.is_finite() && sigma > 0.0) {
            return Err(Error::OptimizationFailure(format!(
                "Gaussian MLE converged to an invalid point: mu={mu}, sigma={sigma}"
            )));
        }

        let fit = GaussianFit::from_estimates(mu, sigma, xs.len());
        log::debug!(
            "gaussian fit: n={} mu={:.6} sigma={:.6} n_iter={}",
            xs.len(),
            fit.mu,
            fit.sigma,
            opt.n_iter
        );
        Ok(GaussianFitOutcome { fit, optimization: opt })
    }
}

/// Fit `N(mu, sigma)` to `xs` with the default optimizer configuration.
pub fn fit_gaussian(xs: &[f64]) -> Result<GaussianFit> {
    MaximumLikelihoodEstimator::new().fit_gaussian(xs)
}
