use num_complex::Complex64;

use crate::electrical::{
    balun_reflection, characteristic_impedance, resonant_frequency, INVALID_MEASUREMENT,
};
use crate::geometry::{capacitance, inductance};
use crate::metric::{deviation, deviation_complex, LENGTH_MISMATCH_COST};
use crate::optimization::solvers::traits::Problem;
use crate::types::{BalunSpec, CouplerSpec, Parameter, Substrate};

/// Parameters per winding block: width, turn count, inner diameter, gap.
pub const WINDING_BLOCK: usize = 4;
/// Index of the turn-count entry within a winding block.
const TURNS_IDX: usize = 1;

/// Snaps every turn-count position to the nearest integer, then clamps the
/// whole vector into bounds. Shared by both problems so a solver always
/// reports geometry that can actually be laid out.
fn snap_and_clamp(params: &mut [f64], bounds: &[(f64, f64)]) {
    for (i, param) in params.iter_mut().enumerate() {
        if i % WINDING_BLOCK == TURNS_IDX {
            *param = param.round();
        }
        let (min, max) = bounds[i];
        *param = param.clamp(min, max);
    }
}

fn unpack(parameters: &[Parameter]) -> (Vec<f64>, Vec<(f64, f64)>) {
    let params = parameters.iter().map(|p| p.value).collect();
    let bounds = parameters.iter().map(|p| (p.min_val, p.max_val)).collect();
    (params, bounds)
}

/// Cost function for the hybrid coupler: one winding block against a target
/// resonant frequency and characteristic impedance.
pub struct CouplerProblem {
    spec: CouplerSpec,
    substrate: Substrate,
    params: Vec<f64>,
    bounds: Vec<(f64, f64)>,
}

impl CouplerProblem {
    pub fn new(spec: CouplerSpec, substrate: Substrate, parameters: &[Parameter]) -> Self {
        let (params, bounds) = unpack(parameters);
        Self {
            spec,
            substrate,
            params,
            bounds,
        }
    }
}

impl Problem for CouplerProblem {
    /// Geometry → electrical → deviation against `[f_target, z_target]`.
    ///
    /// Rejected electrical quantities become [`INVALID_MEASUREMENT`] inside
    /// the achieved vector, so non-physical candidates cost a lot instead of
    /// ending the search.
    fn cost(&self, params: &[f64]) -> Result<f64, String> {
        let (width, n_turn, inner_diam, gap) = (params[0], params[1], params[2], params[3]);

        let l = inductance(width, gap, n_turn, inner_diam);
        let c = capacitance(width, n_turn, inner_diam, self.substrate.eps_r, self.substrate.dist);

        let f_c = resonant_frequency(l, c, self.spec.k).unwrap_or(INVALID_MEASUREMENT);
        let z_c = characteristic_impedance(l, c).unwrap_or(INVALID_MEASUREMENT);

        let achieved = [f_c, z_c];
        let target = [self.spec.f_target, self.spec.z_target];
        Ok(deviation(&achieved, &target).unwrap_or(LENGTH_MISMATCH_COST))
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }

    fn initial_params(&self) -> &[f64] {
        &self.params
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    fn apply_constraints(&self, params: &mut [f64]) -> Result<(), String> {
        snap_and_clamp(params, &self.bounds);
        Ok(())
    }
}

/// Cost function for the balun: two winding blocks (primary, secondary)
/// against complex source/load target impedances.
pub struct BalunProblem {
    spec: BalunSpec,
    params: Vec<f64>,
    bounds: Vec<(f64, f64)>,
}

impl BalunProblem {
    pub fn new(spec: BalunSpec, parameters: &[Parameter]) -> Self {
        let (params, bounds) = unpack(parameters);
        Self {
            spec,
            params,
            bounds,
        }
    }
}

impl Problem for BalunProblem {
    /// Both windings' inductances feed the transformer reflection equations;
    /// the complex deviation compares the reflected pair against
    /// `[zs_target, zl_target]`.
    fn cost(&self, params: &[f64]) -> Result<f64, String> {
        let (w1, n1, di1, g1) = (params[0], params[1], params[2], params[3]);
        let (w2, n2, di2, g2) = (params[4], params[5], params[6], params[7]);

        let l_source = inductance(w1, g1, n1, di1);
        let l_load = inductance(w2, g2, n2, di2);

        let refl = balun_reflection(
            l_source,
            l_load,
            self.spec.k,
            self.spec.f_target,
            self.spec.zs_target,
            self.spec.zl_target,
        );

        let achieved = [refl.source, refl.load];
        let target: [Complex64; 2] = [self.spec.zs_target, self.spec.zl_target];
        Ok(deviation_complex(&achieved, &target).unwrap_or(LENGTH_MISMATCH_COST))
    }

    fn num_params(&self) -> usize {
        self.params.len()
    }

    fn initial_params(&self) -> &[f64] {
        &self.params
    }

    fn bounds(&self) -> &[(f64, f64)] {
        &self.bounds
    }

    fn apply_constraints(&self, params: &mut [f64]) -> Result<(), String> {
        snap_and_clamp(params, &self.bounds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::design::{default_balun_parameters, default_coupler_parameters};

    fn coupler_problem() -> CouplerProblem {
        CouplerProblem::new(
            CouplerSpec::new(1.6e10, 160.0, 0.9),
            Substrate::new(4.3, 5e-6),
            &default_coupler_parameters(),
        )
    }

    #[test]
    fn cost_is_deterministic() {
        let problem = coupler_problem();
        let point = [10e-6, 3.0, 100e-6, 10e-6];
        let a = problem.cost(&point).unwrap();
        let b = problem.cost(&point).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn turn_counts_rounding_alike_cost_alike() {
        let problem = coupler_problem();
        let a = problem.cost(&[10e-6, 2.2, 100e-6, 10e-6]).unwrap();
        let b = problem.cost(&[10e-6, 2.4, 100e-6, 10e-6]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exact_targets_cost_nothing() {
        let point = [10e-6, 3.0, 100e-6, 10e-6];
        let substrate = Substrate::new(4.3, 5e-6);
        let l = inductance(point[0], point[3], point[1], point[2]);
        let c = capacitance(point[0], point[1], point[2], substrate.eps_r, substrate.dist);
        let spec = CouplerSpec::new(
            resonant_frequency(l, c, 0.9).unwrap(),
            characteristic_impedance(l, c).unwrap(),
            0.9,
        );
        let problem = CouplerProblem::new(spec, substrate, &default_coupler_parameters());
        assert_relative_eq!(problem.cost(&point).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_turn_count_is_costed_not_fatal() {
        // n rounds to 0: inductance collapses, the electrical model rejects
        // it, and the sentinel keeps the cost finite.
        let problem = coupler_problem();
        let cost = problem.cost(&[10e-6, 0.2, 100e-6, 10e-6]).unwrap();
        assert!(cost.is_finite());
        assert!(cost > 0.0);
    }

    #[test]
    fn snapping_rounds_turns_and_clamps_into_bounds() {
        let problem = coupler_problem();
        let mut params = [200e-6, 2.6, 100e-6, 10e-6];
        problem.apply_constraints(&mut params).unwrap();
        assert_eq!(params[1], 3.0);
        let (_, max_width) = problem.bounds()[0];
        assert_eq!(params[0], max_width);
    }

    #[test]
    fn balun_cost_is_finite_over_default_box() {
        use num_complex::Complex64;

        let spec = BalunSpec::new(
            2.4e9,
            0.8,
            Complex64::new(50.0, 0.0),
            Complex64::new(100.0, -20.0),
        );
        let problem = BalunProblem::new(spec, &default_balun_parameters());
        let cost = problem.cost(problem.initial_params()).unwrap();
        assert!(cost.is_finite());
    }

    #[test]
    fn balun_snaps_both_turn_counts() {
        use num_complex::Complex64;

        let spec = BalunSpec::new(
            2.4e9,
            0.8,
            Complex64::new(50.0, 0.0),
            Complex64::new(50.0, 0.0),
        );
        let problem = BalunProblem::new(spec, &default_balun_parameters());
        let mut params = [10e-6, 2.4, 100e-6, 10e-6, 10e-6, 3.6, 100e-6, 10e-6];
        problem.apply_constraints(&mut params).unwrap();
        assert_eq!(params[1], 2.0);
        assert_eq!(params[5], 4.0);
    }
}
