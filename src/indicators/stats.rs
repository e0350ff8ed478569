// =============================================================================
// Windowed Statistics
// =============================================================================
//
// Stateless reductions over a finite slice of prices:
//
//   extrema                  (max, min) by a single linear scan
//   standard_deviation       sample σ, denominator (n - 1)
//   mean_absolute_deviation  mean |x - x̄|, denominator n
//
// Each function rejects input it cannot reduce instead of returning NaN.

use super::error::{IndicatorError, IndicatorResult};

/// Return `(max, min)` of `values`.
///
/// The scan is seeded with the first element, so the input order does not
/// matter. Fails with `PreconditionViolation` on an empty slice.
pub fn extrema(values: &[f64]) -> IndicatorResult<(f64, f64)> {
    let (&first, rest) = values
        .split_first()
        .ok_or_else(|| IndicatorError::precondition("extrema of an empty slice"))?;

    let mut max = first;
    let mut min = first;
    for &v in rest {
        if v > max {
            max = v;
        }
        if v < min {
            min = v;
        }
    }
    Ok((max, min))
}

/// Sample standard deviation of `values` (denominator `len - 1`).
///
/// Fails with `PreconditionViolation` when fewer than two values are given.
pub fn standard_deviation(values: &[f64]) -> IndicatorResult<f64> {
    if values.len() < 2 {
        return Err(IndicatorError::precondition(format!(
            "standard deviation needs at least 2 values, got {}",
            values.len()
        )));
    }

    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    Ok((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Mean absolute deviation of `values` around their arithmetic mean
/// (denominator `len`).
pub fn mean_absolute_deviation(values: &[f64]) -> IndicatorResult<f64> {
    if values.is_empty() {
        return Err(IndicatorError::precondition(
            "mean absolute deviation of an empty slice",
        ));
    }

    let m = mean(values);
    let sum_abs: f64 = values.iter().map(|x| (x - m).abs()).sum();
    Ok(sum_abs / values.len() as f64)
}

/// Arithmetic mean. Callers guarantee `values` is non-empty.
///
/// Accumulated incrementally so a run of identical values yields exactly that
/// value, keeping σ and MAD of a flat window at 0.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, &x)| m + (x - m) / (k + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrema_basic() {
        assert_eq!(extrema(&[3.0, 1.0, 4.0, 1.5, 9.0, 2.6]).unwrap(), (9.0, 1.0));
    }

    #[test]
    fn extrema_is_order_independent() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let shuffled = [4.0, 6.0, 1.0, 5.0, 3.0, 2.0];
        let reversed = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        assert_eq!(extrema(&sorted).unwrap(), (6.0, 1.0));
        assert_eq!(extrema(&shuffled).unwrap(), (6.0, 1.0));
        assert_eq!(extrema(&reversed).unwrap(), (6.0, 1.0));
    }

    #[test]
    fn extrema_single_element() {
        assert_eq!(extrema(&[42.0]).unwrap(), (42.0, 42.0));
    }

    #[test]
    fn extrema_negative_values() {
        assert_eq!(extrema(&[-3.0, -7.5, -1.0]).unwrap(), (-1.0, -7.5));
    }

    #[test]
    fn extrema_empty_fails() {
        assert!(matches!(
            extrema(&[]),
            Err(IndicatorError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn std_dev_known_value() {
        let sd = standard_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((sd - 2.5_f64.sqrt()).abs() < 1e-12, "got {sd}");
    }

    #[test]
    fn std_dev_identical_values_is_zero() {
        let sd = standard_deviation(&[7.25; 10]).unwrap();
        assert_eq!(sd, 0.0);
    }

    #[test]
    fn identical_inexact_values_have_zero_dispersion() {
        for v in [0.1, 1.1, 33.33, 2310.7, -0.3] {
            for n in [2, 3, 7, 10, 64, 250] {
                let values = vec![v; n];
                assert_eq!(standard_deviation(&values).unwrap(), 0.0, "v={v} n={n}");
                assert_eq!(mean_absolute_deviation(&values).unwrap(), 0.0, "v={v} n={n}");
                assert_eq!(mean(&values), v, "v={v} n={n}");
            }
        }
    }

    #[test]
    fn std_dev_two_values() {
        // mean 3, deviations ±1, sum of squares 2, / (2 - 1) => sqrt(2)
        let sd = standard_deviation(&[2.0, 4.0]).unwrap();
        assert!((sd - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_dev_rejects_short_input() {
        assert!(matches!(
            standard_deviation(&[]),
            Err(IndicatorError::PreconditionViolation(_))
        ));
        assert!(matches!(
            standard_deviation(&[1.0]),
            Err(IndicatorError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn mad_known_value() {
        let mad = mean_absolute_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((mad - 1.2).abs() < 1e-12, "got {mad}");
    }

    #[test]
    fn mad_single_value_is_zero() {
        assert_eq!(mean_absolute_deviation(&[3.5]).unwrap(), 0.0);
    }

    #[test]
    fn mad_empty_fails() {
        assert!(matches!(
            mean_absolute_deviation(&[]),
            Err(IndicatorError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn mad_does_not_exceed_std_dev() {
        // For any sample MAD <= population σ, and population σ < sample σ.
        let data = [10.0, 12.5, 9.0, 14.0, 11.0, 13.5, 8.5];
        let mad = mean_absolute_deviation(&data).unwrap();
        let sd = standard_deviation(&data).unwrap();
        assert!(mad <= sd, "mad={mad} sd={sd}");
    }
}
