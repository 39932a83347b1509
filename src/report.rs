//! Human-readable reporting of a design result against its bounds.

use std::fmt::Write;

use crate::types::OptimizationResult;

/// Bound-range fraction inside which a parameter counts as pinned to an
/// edge. A pinned parameter usually means the box, not the physics, decided
/// its value.
const EDGE_FRACTION: f64 = 0.02;

/// Formats a result as a fixed-width table, one row per parameter, flagging
/// values pinned at a bound.
pub fn format_report(result: &OptimizationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(72));
    let _ = writeln!(out, "DESIGN RESULT");
    let _ = writeln!(out, "{}", "=".repeat(72));
    let _ = writeln!(
        out,
        "Status: {}",
        if result.success { "converged" } else { "not converged" }
    );
    let _ = writeln!(out, "Message: {}", result.message);
    let _ = writeln!(out, "Iterations: {}", result.iterations);
    let _ = writeln!(out, "Cost: {:.6e}", result.cost);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<16} {:>14} {:>14} {:>14}",
        "Parameter", "Value", "Lower", "Upper"
    );
    let _ = writeln!(out, "{}", "-".repeat(62));

    for param in &result.parameters {
        let position = param.bound_position();
        let flag = if param.min_val == param.max_val {
            ""
        } else if position <= EDGE_FRACTION {
            "  <- at lower bound"
        } else if position >= 1.0 - EDGE_FRACTION {
            "  <- at upper bound"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<16} {:>14.6e} {:>14.6e} {:>14.6e}{}",
            param.name, param.value, param.min_val, param.max_val, flag
        );
    }

    out
}

/// Prints [`format_report`] to stdout.
pub fn print_report(result: &OptimizationResult) {
    print!("{}", format_report(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parameter;

    #[test]
    fn report_lists_parameters_and_flags_pinned_ones() {
        let result = OptimizationResult {
            success: false,
            cost: 3.2e-2,
            iterations: 2000,
            message: "Max iterations reached".to_string(),
            parameters: vec![
                Parameter::new("width", 25e-6, 1e-6, 50e-6),
                Parameter::new("n_turn", 10.0, 1.0, 10.0),
            ],
        };
        let report = format_report(&result);
        assert!(report.contains("width"));
        assert!(report.contains("Max iterations reached"));
        let n_turn_line = report.lines().find(|l| l.starts_with("n_turn")).unwrap();
        assert!(n_turn_line.contains("at upper bound"));
        let width_line = report.lines().find(|l| l.starts_with("width")).unwrap();
        assert!(!width_line.contains("bound"));
    }
}
