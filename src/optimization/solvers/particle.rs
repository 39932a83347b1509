use std::cell::{Cell, RefCell};
use std::rc::Rc;

use argmin::core::{CostFunction, Error, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::particleswarm::ParticleSwarm;

use super::traits::{OptimizationCallback, Problem, Solver, SolverResult};

/// Particle swarm backed by `argmin`. Picked for the higher-dimensional
/// balun search, where a single annealing chain mixes slowly.
pub struct ParticleSwarmOptimizer {
    max_iter: u64,
    precision: f64,
    num_particles: usize,
}

impl ParticleSwarmOptimizer {
    pub fn new(max_iter: u64, precision: f64) -> Self {
        Self {
            max_iter,
            precision,
            num_particles: 20,
        }
    }

    /// Configure swarm size (default: 20).
    pub fn with_num_particles(mut self, num_particles: usize) -> Self {
        self.num_particles = num_particles;
        self
    }
}

/// Bridges a [`Problem`] into argmin's `CostFunction`.
struct SwarmAdapter<'a> {
    problem: &'a dyn Problem,
    callback: RefCell<&'a mut dyn OptimizationCallback>,
    evals: Rc<Cell<usize>>,
}

impl CostFunction for SwarmAdapter<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        let mut candidate = param.clone();
        self.problem
            .apply_constraints(&mut candidate)
            .map_err(Error::msg)?;
        let cost = self.problem.cost(&candidate).map_err(Error::msg)?;

        self.evals.set(self.evals.get() + 1);
        self.callback
            .borrow_mut()
            .on_iteration(self.evals.get() as u64, &candidate, cost)
            .map_err(Error::msg)?;
        Ok(cost)
    }
}

impl Solver for ParticleSwarmOptimizer {
    fn name(&self) -> &str {
        "PSO"
    }

    fn solve(
        &mut self,
        problem: &dyn Problem,
        callback: &mut dyn OptimizationCallback,
    ) -> Result<SolverResult, String> {
        let mut fallback = problem.initial_params().to_vec();
        problem.apply_constraints(&mut fallback)?;

        let (lower, upper): (Vec<f64>, Vec<f64>) = problem.bounds().iter().copied().unzip();

        let evals = Rc::new(Cell::new(0usize));
        let adapter = SwarmAdapter {
            problem,
            callback: RefCell::new(callback),
            evals: Rc::clone(&evals),
        };

        let solver = ParticleSwarm::new((lower, upper), self.num_particles);

        let res = Executor::new(adapter, solver)
            .configure(|state| state.max_iters(self.max_iter).target_cost(self.precision))
            .run()
            .map_err(|e| e.to_string())?;

        let state = res.state();
        let mut params = state
            .get_best_param()
            .map(|particle| particle.position.clone())
            .unwrap_or(fallback);
        problem.apply_constraints(&mut params)?;

        let (success, message) = match state.get_termination_status() {
            TerminationStatus::Terminated(TerminationReason::TargetCostReached) => {
                (true, "Converged".to_string())
            }
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, "Max iterations reached".to_string())
            }
            TerminationStatus::Terminated(reason) => (false, format!("{reason:?}")),
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        };

        Ok(SolverResult {
            success,
            cost: state.get_best_cost(),
            iterations: state.get_iter(),
            message,
            params,
            cost_evals: evals.get(),
        })
    }
}
