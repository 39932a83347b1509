mod annealing;
mod particle;
pub mod traits;

pub use annealing::AnnealingOptimizer;
pub use particle::ParticleSwarmOptimizer;
pub use traits::{OptimizationCallback, Problem, Solver, SolverResult};

/// Picks a solver back-end from the problem shape and explains the choice.
///
/// The cost functions here are closed-form and cheap, so the trade-off is
/// search-space coverage, not evaluation count: a single annealing chain is
/// plenty for the 4-parameter coupler, while the 8-parameter balun benefits
/// from a swarm.
pub fn select_solver(
    num_params: usize,
    max_iterations: u64,
    precision: f64,
    seed: Option<u64>,
) -> (Box<dyn Solver>, String) {
    if num_params <= 4 {
        let mut sa = AnnealingOptimizer::new(max_iterations, precision);
        if let Some(seed) = seed {
            sa = sa.with_seed(seed);
        }
        (
            Box::new(sa),
            format!("Auto: {num_params} params → SA (single chain, cheap cost function)"),
        )
    } else {
        // Scale population: 10-30 particles
        let num_particles = (10 + num_params * 3).min(30);
        let pso = ParticleSwarmOptimizer::new(max_iterations, precision)
            .with_num_particles(num_particles);
        (
            Box::new(pso),
            format!("Auto: {num_params} params → PSO (pop={num_particles})"),
        )
    }
}
