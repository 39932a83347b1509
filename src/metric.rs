//! Normalized deviation between an achieved vector and its target.

use num_complex::Complex64;

use crate::types::DesignError;

/// Reserved cost reported when the achieved and target vectors disagree in
/// length. An error marker, not a measurable deviation; cost functions fold
/// [`DesignError::LengthMismatch`] into this value so the search keeps
/// running instead of aborting.
pub const LENGTH_MISMATCH_COST: f64 = 100.0;

/// Normalized quadratic deviation `√Σ((mᵢ-tᵢ)/(mᵢ+tᵢ))²`.
///
/// A zero-sum pair `mᵢ + tᵢ == 0` is not special-cased; the resulting
/// inf/NaN flows to the optimizer, which discards the candidate on cost.
pub fn deviation(measured: &[f64], target: &[f64]) -> Result<f64, DesignError> {
    if measured.len() != target.len() {
        return Err(DesignError::LengthMismatch {
            measured: measured.len(),
            target: target.len(),
        });
    }
    let sum: f64 = measured
        .iter()
        .zip(target)
        .map(|(&m, &t)| {
            let ratio = (m - t) / (m + t);
            ratio * ratio
        })
        .sum();
    Ok(sum.sqrt())
}

/// Complex counterpart of [`deviation`]: `√Σ|(mᵢ-tᵢ)/(mᵢ+tᵢ)|²`.
pub fn deviation_complex(measured: &[Complex64], target: &[Complex64]) -> Result<f64, DesignError> {
    if measured.len() != target.len() {
        return Err(DesignError::LengthMismatch {
            measured: measured.len(),
            target: target.len(),
        });
    }
    let sum: f64 = measured
        .iter()
        .zip(target)
        .map(|(&m, &t)| ((m - t) / (m + t)).norm_sqr())
        .sum();
    Ok(sum.sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn deviation_of_vector_from_itself_is_zero() {
        let v = [1.6e10, 50.0, 0.77];
        assert_eq!(deviation(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn deviation_matches_hand_evaluation() {
        // Single pair: |(3-1)/(3+1)|² = 0.25, √0.25 = 0.5
        let d = deviation(&[3.0], &[1.0]).unwrap();
        assert_relative_eq!(d, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn mismatched_lengths_are_a_configuration_error() {
        let err = deviation(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, DesignError::LengthMismatch { measured: 2, target: 1 }));
        assert_eq!(LENGTH_MISMATCH_COST, 100.0);
    }

    #[test]
    fn complex_deviation_of_vector_from_itself_is_zero() {
        let v = [Complex64::new(50.0, 5.0), Complex64::new(75.0, -3.0)];
        assert_eq!(deviation_complex(&v, &v).unwrap(), 0.0);
    }

    #[test]
    fn complex_deviation_uses_magnitude_of_normalized_difference() {
        // (j-1)/(j+1) has magnitude 1, so the deviation is 1.
        let m = [Complex64::new(0.0, 1.0)];
        let t = [Complex64::new(1.0, 0.0)];
        assert_relative_eq!(deviation_complex(&m, &t).unwrap(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_sum_pair_propagates_as_non_finite() {
        let d = deviation(&[1.0], &[-1.0]).unwrap();
        assert!(!d.is_finite());
    }
}
