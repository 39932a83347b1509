use std::cell::{Cell, RefCell};
use std::rc::Rc;

use argmin::core::{CostFunction, Error, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::simulatedannealing::{Anneal, SATempFunc, SimulatedAnnealing};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::traits::{OptimizationCallback, Problem, Solver, SolverResult};

/// Fraction of a parameter's bound range used as the maximum annealing move.
const MOVE_FRACTION: f64 = 0.1;

/// Simulated annealing backed by `argmin`, with moves clamped to the
/// feasible box. This is the default back-end for the low-dimensional
/// coupler search.
pub struct AnnealingOptimizer {
    max_iter: u64,
    precision: f64,
    init_temp: f64,
    seed: Option<u64>,
}

impl AnnealingOptimizer {
    pub fn new(max_iter: u64, precision: f64) -> Self {
        Self {
            max_iter,
            precision,
            init_temp: 15.0,
            seed: None,
        }
    }

    /// Configure the initial temperature (default: 15.0).
    pub fn with_initial_temperature(mut self, init_temp: f64) -> Self {
        self.init_temp = init_temp;
        self
    }

    /// Fix the RNG seed so a run becomes reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Bridges a [`Problem`] into argmin's `CostFunction` + `Anneal` pair.
struct AnnealAdapter<'a> {
    problem: &'a dyn Problem,
    callback: RefCell<&'a mut dyn OptimizationCallback>,
    evals: Rc<Cell<usize>>,
    rng: RefCell<Xoshiro256PlusPlus>,
}

impl CostFunction for AnnealAdapter<'_> {
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

impl Anneal for AnnealAdapter<'_> {
    type Param = Vec<f64>;
    type Output = Vec<f64>;
    type Float = f64;

    /// Perturbs randomly chosen coordinates, more of them while the schedule
    /// is hot, each move bounded by [`MOVE_FRACTION`] of the coordinate's
    /// range and clamped into the box.
    fn anneal(&self, param: &Self::Param, temp: f64) -> Result<Self::Output, Error> {
        let bounds = self.problem.bounds();
        let mut next = param.clone();
        let mut rng = self.rng.borrow_mut();
        let moves = temp.floor() as u64 + 1;
        for _ in 0..moves {
            let idx = rng.gen_range(0..next.len());
            let (min, max) = bounds[idx];
            let step = (max - min) * MOVE_FRACTION;
            let delta = rng.gen_range(-step..=step);
            next[idx] = (next[idx] + delta).clamp(min, max);
        }
        Ok(next)
    }
}

impl Solver for AnnealingOptimizer {
    fn name(&self) -> &str {
        "SA"
    }

    fn solve(
        &mut self,
        problem: &dyn Problem,
        callback: &mut dyn OptimizationCallback,
    ) -> Result<SolverResult, String> {
        let mut init = problem.initial_params().to_vec();
        problem.apply_constraints(&mut init)?;
        let fallback = init.clone();

        // Two independent streams: one drives the neighbor moves, one the
        // acceptance decisions inside argmin.
        let (move_seed, accept_seed) = match self.seed {
            Some(seed) => (seed, seed.wrapping_add(1)),
            None => (rand::random(), rand::random()),
        };

        let evals = Rc::new(Cell::new(0usize));
        let adapter = AnnealAdapter {
            problem,
            callback: RefCell::new(callback),
            evals: Rc::clone(&evals),
            rng: RefCell::new(Xoshiro256PlusPlus::seed_from_u64(move_seed)),
        };

        let solver =
            SimulatedAnnealing::new_with_rng(self.init_temp, Xoshiro256PlusPlus::seed_from_u64(accept_seed))
                .map_err(|e| e.to_string())?
                .with_temp_func(SATempFunc::Boltzmann);

        let res = Executor::new(adapter, solver)
            .configure(|state| {
                state
                    .param(init)
                    .max_iters(self.max_iter)
                    .target_cost(self.precision)
            })
            .run()
            .map_err(|e| e.to_string())?;

        let state = res.state();
        let mut params = state.get_best_param().cloned().unwrap_or(fallback);
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
