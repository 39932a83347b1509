use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ===== ERRORS =====

/// Errors surfaced by the design drivers.
///
/// Invalid physical quantities produced mid-search are NOT represented here:
/// they are folded into the cost (see [`crate::electrical::INVALID_MEASUREMENT`]
/// and [`crate::metric::LENGTH_MISMATCH_COST`]) so the optimizer steers away
/// from them instead of the run aborting.
#[derive(Debug, Error)]
pub enum DesignError {
    /// A bound pair has its lower edge above its upper edge.
    #[error("invalid bounds for '{name}': lower {lower} > upper {upper}")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    /// Coupling coefficient outside the open interval (0, 1).
    #[error("coupling coefficient k = {0} must lie in (0, 1)")]
    InvalidCoupling(f64),

    /// A driver was given the wrong number of parameters.
    #[error("expected {expected} parameters, got {actual}")]
    ParameterCount { expected: usize, actual: usize },

    /// Achieved and target vectors disagree in length.
    #[error("deviation vectors disagree in length: measured {measured}, target {target}")]
    LengthMismatch { measured: usize, target: usize },

    /// The solver back-end failed outright (distinct from non-convergence,
    /// which is reported as a normal result).
    #[error("solver failure: {0}")]
    Solver(String),
}

// ===== CORE DATA TYPES =====

/// A named geometric parameter with box bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub min_val: f64,
    pub max_val: f64,
}

impl Parameter {
    pub fn new(name: &str, value: f64, min_val: f64, max_val: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            min_val,
            max_val,
        }
    }

    pub fn clamp(&mut self) {
        self.value = self.value.clamp(self.min_val, self.max_val);
    }

    pub fn is_within_bounds(&self) -> bool {
        self.value >= self.min_val && self.value <= self.max_val
    }

    /// Relative position of the value inside its bounds: 0 at the lower
    /// edge, 1 at the upper. Degenerate bounds report 0.
    pub fn bound_position(&self) -> f64 {
        let range = self.max_val - self.min_val;
        if range <= 0.0 {
            0.0
        } else {
            (self.value - self.min_val) / range
        }
    }
}

/// Fixed substrate properties shared by every candidate of a search.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Substrate {
    /// Relative permittivity of the dielectric between the windings.
    pub eps_r: f64,
    /// Substrate distance in meters separating the windings.
    pub dist: f64,
}

impl Substrate {
    pub fn new(eps_r: f64, dist: f64) -> Self {
        Self { eps_r, dist }
    }
}

/// Electrical targets for a hybrid coupler section.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CouplerSpec {
    /// Target resonant frequency in hertz.
    pub f_target: f64,
    /// Target characteristic impedance in ohms.
    pub z_target: f64,
    /// Coupling coefficient between the two windings, in (0, 1).
    pub k: f64,
}

impl CouplerSpec {
    pub fn new(f_target: f64, z_target: f64, k: f64) -> Self {
        Self { f_target, z_target, k }
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        validate_coupling(self.k)
    }
}

/// Electrical targets for an impedance-transforming balun.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BalunSpec {
    /// Target operating frequency in hertz.
    pub f_target: f64,
    /// Coupling coefficient between primary and secondary, in (0, 1).
    pub k: f64,
    /// Source-side target impedance in ohms.
    pub zs_target: Complex64,
    /// Load-side target impedance in ohms.
    pub zl_target: Complex64,
}

impl BalunSpec {
    pub fn new(f_target: f64, k: f64, zs_target: Complex64, zl_target: Complex64) -> Self {
        Self { f_target, k, zs_target, zl_target }
    }

    pub fn validate(&self) -> Result<(), DesignError> {
        validate_coupling(self.k)
    }
}

fn validate_coupling(k: f64) -> Result<(), DesignError> {
    if k > 0.0 && k < 1.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidCoupling(k))
    }
}

/// Outcome of a single design run. Produced once per driver call and owned
/// by the caller; nothing is cached across runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub success: bool,
    pub cost: f64,
    pub iterations: u64,
    pub message: String,
    pub parameters: Vec<Parameter>,
}

impl OptimizationResult {
    pub fn get_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Serializes the result for downstream tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_value_into_bounds() {
        let mut p = Parameter::new("width", 120e-6, 1e-6, 50e-6);
        assert!(!p.is_within_bounds());
        p.clamp();
        assert!(p.is_within_bounds());
        assert_eq!(p.value, 50e-6);
    }

    #[test]
    fn bound_position_spans_zero_to_one() {
        let p = Parameter::new("gap", 25.0, 0.0, 100.0);
        assert_eq!(p.bound_position(), 0.25);
        let degenerate = Parameter::new("gap", 5.0, 5.0, 5.0);
        assert_eq!(degenerate.bound_position(), 0.0);
    }

    #[test]
    fn coupling_outside_open_interval_is_rejected() {
        assert!(CouplerSpec::new(1e9, 50.0, 0.5).validate().is_ok());
        assert!(CouplerSpec::new(1e9, 50.0, 0.0).validate().is_err());
        assert!(CouplerSpec::new(1e9, 50.0, 1.0).validate().is_err());
        let zs = Complex64::new(50.0, 0.0);
        assert!(BalunSpec::new(1e9, 1.2, zs, zs).validate().is_err());
    }

    #[test]
    fn result_lookup_and_json_export() {
        let result = OptimizationResult {
            success: true,
            cost: 1.5e-7,
            iterations: 2000,
            message: "Converged".to_string(),
            parameters: vec![Parameter::new("width", 10e-6, 1e-6, 50e-6)],
        };
        assert_eq!(result.get_parameter("width").unwrap().value, 10e-6);
        assert!(result.get_parameter("missing").is_none());
        let json = result.to_json().unwrap();
        assert!(json.contains("\"width\""));
    }
}
