pub mod callback;
pub mod problem;
pub mod solvers;

pub use callback::{DesignCallback, EvaluationRecord};
pub use problem::{BalunProblem, CouplerProblem};
pub use solvers::{select_solver, AnnealingOptimizer, ParticleSwarmOptimizer};
pub use solvers::{OptimizationCallback, Problem, Solver, SolverResult};
