//! Closed-form geometry model for square planar spirals.
//!
//! Both formulas are empirical monomial fits. They accept whatever geometry
//! they are handed: degenerate inputs (zero turns, negative widths) flow
//! through unchecked and may yield non-physical values. Feasible geometry is
//! enforced exclusively through the optimizer bounds, never here.

use crate::constants::{
    CAPACITANCE_C1, CAPACITANCE_C2, INDUCTANCE_K1, INDUCTANCE_K2, VACUUM_PERMEABILITY,
    VACUUM_PERMITTIVITY,
};

/// Rounds a continuous turn-count variable to the integer actually laid out.
///
/// Uses `f64::round` semantics: nearest integer, ties away from zero
/// (2.5 turns become 3). The rounded value, not the continuous optimizer
/// variable, determines inductance and capacitance.
#[inline]
#[must_use]
pub fn round_turns(n_turn: f64) -> f64 {
    n_turn.round()
}

/// Inductance in henries of a square planar spiral.
///
/// `width`, `gap`, and `inner_diam` are in meters; `n_turn` is rounded with
/// [`round_turns`] before use. The outer diameter is
/// `inner_diam + 2·n·width + 2·(n-1)·gap`.
#[must_use]
pub fn inductance(width: f64, gap: f64, n_turn: f64, inner_diam: f64) -> f64 {
    let n = round_turns(n_turn);
    let amplitude = INDUCTANCE_K1 * VACUUM_PERMEABILITY * n * n;
    let outer_diam = inner_diam + 2.0 * n * width + 2.0 * (n - 1.0) * gap;
    let fill_ratio = (outer_diam - inner_diam) / (outer_diam + inner_diam);
    0.5 * amplitude * (inner_diam + outer_diam) / (1.0 + INDUCTANCE_K2 * fill_ratio)
}

/// Distributed capacitance in farads between a spiral and its coupled side.
///
/// `eps_r` is the substrate relative permittivity and `dist` the substrate
/// distance in meters separating the two windings. `n_turn` is rounded with
/// [`round_turns`] before use.
#[must_use]
pub fn capacitance(width: f64, n_turn: f64, inner_diam: f64, eps_r: f64, dist: f64) -> f64 {
    let n = round_turns(n_turn);
    width * VACUUM_PERMITTIVITY * eps_r * (CAPACITANCE_C1 + CAPACITANCE_C2 * (n - 1.0)) * inner_diam
        / dist
}
