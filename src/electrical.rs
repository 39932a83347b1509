//! Electrical model: resonance, characteristic impedance, and the balun
//! transformer reflection equations.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::angular_frequency;

/// Value substituted for a rejected electrical quantity inside cost vectors.
///
/// Folding the rejection back into the deviation metric keeps a bad candidate
/// expensive without aborting the surrounding search.
pub const INVALID_MEASUREMENT: f64 = -1.0;

/// Resonant frequency in hertz of a coupled spiral section,
/// `(2-k)/(2π√(L·C))`.
///
/// Returns `None` when `l <= 0`, `c <= 0`, or `k == 1`.
#[must_use]
pub fn resonant_frequency(l: f64, c: f64, k: f64) -> Option<f64> {
    if l <= 0.0 || c <= 0.0 || k == 1.0 {
        return None;
    }
    Some((2.0 - k) / (2.0 * PI * (l * c).sqrt()))
}

/// Characteristic impedance in ohms, `√(L/C)`.
///
/// Returns `None` when `l <= 0` or `c <= 0`.
#[must_use]
pub fn characteristic_impedance(l: f64, c: f64) -> Option<f64> {
    if l <= 0.0 || c <= 0.0 {
        return None;
    }
    Some((l / c).sqrt())
}

/// Impedances reflected through a coupled-inductor transformer, each port
/// terminated by the conjugate of the opposite port's target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalunReflection {
    /// Impedance seen looking into the source (primary) port.
    pub source: Complex64,
    /// Impedance seen looking into the load (secondary) port.
    pub load: Complex64,
}

/// Evaluates the transformer reflection equations for a balun.
///
/// The coupled inductor pair (`l_source`, `l_load`, coupling `k`) is modeled
/// as an ideal transformer of ratio `n = k·√(l_source/l_load)` with
/// magnetizing reactance `z_mag = jω·k²·l_source` and series leakage
/// `alpha·z_mag`, `alpha = (1-k²)/k²`, all referred to the primary.
/// Degenerate inductances propagate as NaN rather than being rejected here.
#[must_use]
pub fn balun_reflection(
    l_source: f64,
    l_load: f64,
    k: f64,
    f_target: f64,
    zs_target: Complex64,
    zl_target: Complex64,
) -> BalunReflection {
    let alpha = (1.0 - k * k) / (k * k);
    let n_turn = k * (l_source / l_load).sqrt();
    let n2 = n_turn * n_turn;
    let z_mag = Complex64::new(0.0, l_source * k * k * angular_frequency(f_target));

    let zl_reflected = n2 * zl_target.conj();
    let source = alpha * z_mag + z_mag * zl_reflected / (z_mag + zl_reflected);

    let primary = zs_target.conj() + alpha * z_mag;
    let load = z_mag * primary / (z_mag + primary) / n2;

    BalunReflection { source, load }
}
