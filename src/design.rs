//! Design drivers: validate a target spec, build the cost function, run one
//! budgeted solver pass, and hand back the result.

use crate::optimization::problem::{BalunProblem, CouplerProblem, WINDING_BLOCK};
use crate::optimization::solvers::traits::{Problem, Solver};
use crate::optimization::solvers::{select_solver, AnnealingOptimizer, ParticleSwarmOptimizer};
use crate::optimization::DesignCallback;
use crate::types::{BalunSpec, CouplerSpec, DesignError, OptimizationResult, Parameter, Substrate};

/// Default iteration budget for the coupler search. A tunable default, not a
/// contract; override with `with_max_iterations`.
pub const COUPLER_ITERATION_BUDGET: u64 = 2000;

/// Default iteration budget for the balun search.
pub const BALUN_ITERATION_BUDGET: u64 = 1000;

const DEFAULT_PRECISION: f64 = 1e-6;

/// Default search box for one winding block, initial values at mid-range.
/// Lengths in meters.
pub fn default_winding_parameters(suffix: &str) -> Vec<Parameter> {
    vec![
        Parameter::new(&format!("width{suffix}"), 10e-6, 1e-6, 50e-6),
        Parameter::new(&format!("n_turn{suffix}"), 2.0, 1.0, 10.0),
        Parameter::new(&format!("inner_diam{suffix}"), 200e-6, 20e-6, 1000e-6),
        Parameter::new(&format!("gap{suffix}"), 5e-6, 1e-6, 50e-6),
    ]
}

pub fn default_coupler_parameters() -> Vec<Parameter> {
    default_winding_parameters("")
}

pub fn default_balun_parameters() -> Vec<Parameter> {
    let mut parameters = default_winding_parameters("");
    parameters.extend(default_winding_parameters("_sec"));
    parameters
}

fn validate_parameters(parameters: &[Parameter], expected: usize) -> Result<(), DesignError> {
    if parameters.len() != expected {
        return Err(DesignError::ParameterCount {
            expected,
            actual: parameters.len(),
        });
    }
    for param in parameters {
        if param.min_val > param.max_val {
            return Err(DesignError::InvalidBounds {
                name: param.name.clone(),
                lower: param.min_val,
                upper: param.max_val,
            });
        }
    }
    Ok(())
}

/// One solver pass over `problem`; the shared tail of both drivers.
fn run_design(
    problem: &dyn Problem,
    parameters: &[Parameter],
    solver_name: &str,
    max_iterations: u64,
    precision: f64,
    seed: Option<u64>,
    verbose: bool,
) -> Result<OptimizationResult, DesignError> {
    let mut solver: Box<dyn Solver> = match solver_name {
        "sa" => {
            let mut sa = AnnealingOptimizer::new(max_iterations, precision);
            if let Some(seed) = seed {
                sa = sa.with_seed(seed);
            }
            Box::new(sa)
        }
        "pso" => Box::new(ParticleSwarmOptimizer::new(max_iterations, precision)),
        _ => {
            let (solver, reason) =
                select_solver(problem.num_params(), max_iterations, precision, seed);
            if verbose {
                println!("{reason}");
            }
            solver
        }
    };

    if verbose {
        println!("Solver: {}", solver.name());
    }

    let mut callback = DesignCallback::new(verbose);
    let result = solver
        .solve(problem, &mut callback)
        .map_err(DesignError::Solver)?;

    if verbose {
        println!("Done: {} (cost = {:.6e}, {} evals)", result.message, result.cost, result.cost_evals);
    }

    let parameters = parameters
        .iter()
        .zip(result.params.iter())
        .map(|(def, &value)| Parameter {
            name: def.name.clone(),
            value,
            min_val: def.min_val,
            max_val: def.max_val,
        })
        .collect();

    Ok(OptimizationResult {
        success: result.success,
        cost: result.cost,
        iterations: result.iterations,
        message: result.message,
        parameters,
    })
}

/// Driver for hybrid coupler synthesis.
pub struct CouplerDesigner {
    spec: CouplerSpec,
    substrate: Substrate,
    parameters: Vec<Parameter>,
    solver: String,
    max_iterations: u64,
    precision: f64,
    seed: Option<u64>,
    verbose: bool,
}

impl CouplerDesigner {
    pub fn new(spec: CouplerSpec, substrate: Substrate) -> Self {
        Self {
            spec,
            substrate,
            parameters: default_coupler_parameters(),
            solver: "auto".to_string(),
            max_iterations: COUPLER_ITERATION_BUDGET,
            precision: DEFAULT_PRECISION,
            seed: None,
            verbose: false,
        }
    }

    /// Replace the search box (ordered: width, n_turn, inner_diam, gap).
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Select the solver back-end: "sa", "pso", or "auto" (default).
    pub fn with_solver(mut self, solver: &str) -> Self {
        self.solver = solver.to_string();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Fix the RNG seed for reproducible searches (annealing back-end only).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs a single bounded search. Non-convergence is not an error: the
    /// returned result carries `success = false` and the solver's message.
    pub fn design(&self) -> Result<OptimizationResult, DesignError> {
        self.spec.validate()?;
        validate_parameters(&self.parameters, WINDING_BLOCK)?;
        let problem = CouplerProblem::new(self.spec, self.substrate, &self.parameters);
        run_design(
            &problem,
            &self.parameters,
            &self.solver,
            self.max_iterations,
            self.precision,
            self.seed,
            self.verbose,
        )
    }
}

/// Driver for impedance-transforming balun synthesis.
pub struct BalunDesigner {
    spec: BalunSpec,
    parameters: Vec<Parameter>,
    solver: String,
    max_iterations: u64,
    precision: f64,
    seed: Option<u64>,
    verbose: bool,
}

impl BalunDesigner {
    pub fn new(spec: BalunSpec) -> Self {
        Self {
            spec,
            parameters: default_balun_parameters(),
            solver: "auto".to_string(),
            max_iterations: BALUN_ITERATION_BUDGET,
            precision: DEFAULT_PRECISION,
            seed: None,
            verbose: false,
        }
    }

    /// Replace the search box (ordered: width, n_turn, inner_diam, gap,
    /// then the same four `_sec` entries for the secondary winding).
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Select the solver back-end: "sa", "pso", or "auto" (default).
    pub fn with_solver(mut self, solver: &str) -> Self {
        self.solver = solver.to_string();
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Fix the RNG seed for reproducible searches (annealing back-end only).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Runs a single bounded search; see [`CouplerDesigner::design`].
    pub fn design(&self) -> Result<OptimizationResult, DesignError> {
        self.spec.validate()?;
        validate_parameters(&self.parameters, 2 * WINDING_BLOCK)?;
        let problem = BalunProblem::new(self.spec, &self.parameters);
        run_design(
            &problem,
            &self.parameters,
            &self.solver,
            self.max_iterations,
            self.precision,
            self.seed,
            self.verbose,
        )
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn unity_coupling_is_rejected_before_the_search() {
        let designer = CouplerDesigner::new(
            CouplerSpec::new(1e9, 50.0, 1.0),
            Substrate::new(4.3, 5e-6),
        );
        assert!(matches!(
            designer.design().unwrap_err(),
            DesignError::InvalidCoupling(k) if k == 1.0
        ));
    }

    #[test]
    fn reversed_bounds_are_rejected() {
        let mut parameters = default_coupler_parameters();
        parameters[2].min_val = 1e-3;
        parameters[2].max_val = 1e-6;
        let designer = CouplerDesigner::new(
            CouplerSpec::new(1e9, 50.0, 0.5),
            Substrate::new(4.3, 5e-6),
        )
        .with_parameters(parameters);
        assert!(matches!(
            designer.design().unwrap_err(),
            DesignError::InvalidBounds { .. }
        ));
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let spec = BalunSpec::new(
            2.4e9,
            0.8,
            Complex64::new(50.0, 0.0),
            Complex64::new(100.0, 0.0),
        );
        let designer = BalunDesigner::new(spec).with_parameters(default_coupler_parameters());
        assert!(matches!(
            designer.design().unwrap_err(),
            DesignError::ParameterCount { expected: 8, actual: 4 }
        ));
    }
}
