/// Outcome reported by a solver back-end.
#[derive(Clone, Debug)]
pub struct SolverResult {
    pub success: bool,
    pub cost: f64,
    pub iterations: u64,
    pub message: String,
    pub params: Vec<f64>,
    pub cost_evals: usize,
}

/// Callback interface for optimization progress.
pub trait OptimizationCallback {
    /// Called once per cost evaluation with the constrained candidate and its
    /// cost. Returning an error aborts the run.
    fn on_iteration(&mut self, iteration: u64, params: &[f64], cost: f64) -> Result<(), String>;
}

/// Core problem definition - just the essentials.
pub trait Problem {
    /// Evaluate cost for given parameters.
    fn cost(&self, params: &[f64]) -> Result<f64, String>;

    /// Number of parameters.
    fn num_params(&self) -> usize;

    /// Initial parameter values.
    fn initial_params(&self) -> &[f64];

    /// Parameter bounds (min, max) for each parameter.
    fn bounds(&self) -> &[(f64, f64)];

    /// Snap parameters onto the discrete grid they are laid out on and clamp
    /// them into bounds (modifies params in place).
    fn apply_constraints(&self, params: &mut [f64]) -> Result<(), String>;
}

/// Bounded global minimizer interface - takes problem and callback, runs one
/// budgeted search, and reports the best point seen. Any conforming
/// implementation can substitute for the bundled ones.
pub trait Solver {
    fn name(&self) -> &str;

    /// Solve the optimization problem with callback for progress tracking.
    fn solve(
        &mut self,
        problem: &dyn Problem,
        callback: &mut dyn OptimizationCallback,
    ) -> Result<SolverResult, String>;
}
