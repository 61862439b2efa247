//! L-BFGS minimization of smooth unconstrained objectives.
//!
//! Parameters with a restricted domain are reparameterized by the caller, as the Gaussian
//! fit does with `ln sigma`.

use argmin::core::{CostFunction, Executor, Gradient, State, TerminationReason, TerminationStatus};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use mu_core::{Error, Result};

/// Configuration for the L-BFGS optimizer
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Maximum number of iterations
    pub max_iter: u64,
    /// Gradient-norm tolerance; the cost tolerance is `tol / 10`
    pub tol: f64,
    /// History length of the inverse-Hessian approximation
    pub m: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self { max_iter: 1000, tol: 1e-6, m: 10 }
    }
}

/// Outcome of one minimization
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters found
    pub parameters: Vec<f64>,
    /// Objective at `parameters`
    pub fval: f64,
    /// Iterations performed
    pub n_iter: u64,
    /// `true` if a tolerance was met before the iteration cap
    pub converged: bool,
    /// argmin termination reason
    pub message: String,
}

/// Objective with an analytic gradient.
pub trait ObjectiveFunction {
    /// Objective value at `params`.
    fn eval(&self, params: &[f64]) -> Result<f64>;

    /// Gradient at `params`.
    fn gradient(&self, params: &[f64]) -> Result<Vec<f64>>;
}

struct ArgminProblem<'a, O> {
    objective: &'a O,
}

impl<O: ObjectiveFunction> CostFunction for ArgminProblem<'_, O> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> std::result::Result<f64, argmin::core::Error> {
        self.objective.eval(params).map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

impl<O: ObjectiveFunction> Gradient for ArgminProblem<'_, O> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, params: &Self::Param) -> std::result::Result<Vec<f64>, argmin::core::Error> {
        self.objective.gradient(params).map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

/// Unconstrained L-BFGS with a More-Thuente line search.
#[derive(Debug, Clone, Default)]
pub struct LbfgsOptimizer {
    config: OptimizerConfig,
}

impl LbfgsOptimizer {
    /// Optimizer with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Minimize `objective` from `init_params`.
    ///
    /// Hitting the iteration cap is reported through `converged == false`. An objective
    /// error or a failed line search is [`Error::OptimizationFailure`].
    pub fn minimize<O: ObjectiveFunction>(
        &self,
        objective: &O,
        init_params: &[f64],
    ) -> Result<OptimizationResult> {
        if init_params.is_empty() {
            return Err(Error::Validation("cannot optimize over zero parameters".to_string()));
        }
        if init_params.iter().any(|v| !v.is_finite()) {
            return Err(Error::Validation(format!(
                "initial parameters must be finite, got {init_params:?}"
            )));
        }

        let tol_cost =
            if self.config.tol == 0.0 { 0.0 } else { (0.1 * self.config.tol).max(1e-12) };
        let solver = LBFGS::new(MoreThuenteLineSearch::new(), self.config.m)
            .with_tolerance_grad(self.config.tol)
            .and_then(|s| s.with_tolerance_cost(tol_cost))
            .map_err(|e| Error::Validation(format!("invalid optimizer tolerance: {e}")))?;

        let res = Executor::new(ArgminProblem { objective }, solver)
            .configure(|state| state.param(init_params.to_vec()).max_iters(self.config.max_iter))
            .run()
            .map_err(|e| Error::OptimizationFailure(e.to_string()))?;

        let state = res.state();
        let parameters = state
            .get_best_param()
            .ok_or_else(|| Error::OptimizationFailure("no best parameters found".to_string()))?
            .clone();
        let termination = state.get_termination_status();
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );

        Ok(OptimizationResult {
            parameters,
            fval: state.get_best_cost(),
            n_iter: state.get_iter(),
            converged,
            message: termination.to_string(),
        })
    }
}
