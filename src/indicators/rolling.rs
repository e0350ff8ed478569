// =============================================================================
// Rolling Window Statistics
// =============================================================================
//
// Slides a fixed-length window over the series and reduces each window with
// the primitives in `stats`. Windows are independent of one another.

use serde::Serialize;

use super::error::{IndicatorError, IndicatorResult};
use super::stats::{extrema, mean_absolute_deviation, standard_deviation};

/// Statistics of one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    /// Index of the last price in the window.
    pub end: usize,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
    pub mean_abs_dev: f64,
}

impl WindowStats {
    /// Reduce a single window. Needs at least two values.
    pub fn from_window(end: usize, window: &[f64]) -> IndicatorResult<Self> {
        let (max, min) = extrema(window)?;
        Ok(Self {
            end,
            max,
            min,
            std_dev: standard_deviation(window)?,
            mean_abs_dev: mean_absolute_deviation(window)?,
        })
    }

    /// `max - min`.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Compute [`WindowStats`] for every window of length `window` in `data`,
/// oldest window first.
pub fn rolling_stats(data: &[f64], window: usize) -> IndicatorResult<Vec<WindowStats>> {
    if window < 2 {
        return Err(IndicatorError::precondition(format!(
            "rolling window must be at least 2, got {window}"
        )));
    }
    if window > data.len() {
        return Err(IndicatorError::precondition(format!(
            "rolling window {window} exceeds series length {}",
            data.len()
        )));
    }

    data.windows(window)
        .enumerate()
        .map(|(start, w)| WindowStats::from_window(start + window - 1, w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_count_and_indices() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = rolling_stats(&data, 5).unwrap();
        assert_eq!(stats.len(), 6);
        assert_eq!(stats[0].end, 4);
        assert_eq!(stats[5].end, 9);
    }

    #[test]
    fn rolling_matches_primitives() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = rolling_stats(&data, 5).unwrap();
        let first = &stats[0];
        assert_eq!((first.max, first.min), (5.0, 1.0));
        assert!((first.std_dev - 2.5_f64.sqrt()).abs() < 1e-12);
        assert!((first.mean_abs_dev - 1.2).abs() < 1e-12);
        assert_eq!(first.range(), 4.0);
        // A shifted ramp has the same dispersion.
        let last = &stats[5];
        assert_eq!((last.max, last.min), (10.0, 6.0));
        assert!((last.std_dev - first.std_dev).abs() < 1e-12);
    }

    #[test]
    fn rolling_rejects_bad_window() {
        let data = [1.0, 2.0, 3.0];
        assert!(matches!(
            rolling_stats(&data, 1),
            Err(IndicatorError::PreconditionViolation(_))
        ));
        assert!(matches!(
            rolling_stats(&data, 4),
            Err(IndicatorError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn rolling_full_length_window() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = rolling_stats(&data, data.len()).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].end, 7);
    }
}
