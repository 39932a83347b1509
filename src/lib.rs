//! Analytic design of planar spiral passives driven by bounded global
//! optimization.
//!
//! Closed-form geometry and electrical models map a spiral's trace width,
//! turn count, inner diameter, and gap to inductance, capacitance, resonant
//! frequency, and characteristic impedance. [`CouplerDesigner`] and
//! [`BalunDesigner`] search those geometric parameters with a bounded
//! stochastic solver until the component matches a target electrical spec.

pub mod constants;
mod design;
mod electrical;
mod geometry;
mod metric;
mod optimization;
mod report;
mod types;

pub use design::{
    default_balun_parameters, default_coupler_parameters, default_winding_parameters,
    BalunDesigner, CouplerDesigner, BALUN_ITERATION_BUDGET, COUPLER_ITERATION_BUDGET,
};
pub use electrical::{
    balun_reflection, characteristic_impedance, resonant_frequency, BalunReflection,
    INVALID_MEASUREMENT,
};
pub use geometry::{capacitance, inductance, round_turns};
pub use metric::{deviation, deviation_complex, LENGTH_MISMATCH_COST};
pub use optimization::{
    select_solver, AnnealingOptimizer, BalunProblem, CouplerProblem, DesignCallback,
    EvaluationRecord, OptimizationCallback, ParticleSwarmOptimizer, Problem, Solver, SolverResult,
};
pub use report::{format_report, print_report};
pub use types::{
    BalunSpec, CouplerSpec, DesignError, OptimizationResult, Parameter, Substrate,
};
