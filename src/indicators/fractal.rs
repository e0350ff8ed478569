// =============================================================================
// Fractal Adaptive Moving Average (FRAMA) — Smoothing Coefficient
// =============================================================================
//
// For a window of `n` prices (n even) split at its midpoint:
//
//   HL1 = (max - min) / (n/2)     over the later half
//   HL2 = (max - min) / (n/2)     over the earlier half
//   HL  = (max - min) / n         over the full window
//
//   D     = (ln(HL1 + HL2) - ln(HL)) / ln(2)      fractal dimension, ~[1, 2]
//   alpha = exp(W * (D - 1))                      W < 0, typically -4.6
//
// alpha is clamped to [0.01, 1]. A smooth trend (D -> 1) gives alpha -> 1 and
// the average hugs price; a rough, choppy window (D -> 2) gives alpha -> 0.01
// and the average barely moves.
//
// The FRAMA itself is the exponential filter
//   FRAMA_t = alpha_t * price_t + (1 - alpha_t) * FRAMA_{t-1}
// seeded with the mean of the first window.

use serde::Serialize;
use tracing::trace;

use super::error::{IndicatorError, IndicatorResult};
use super::stats::{extrema, mean};

/// Lower clamp for the smoothing coefficient.
pub const MIN_ALPHA: f64 = 0.01;

/// Upper clamp for the smoothing coefficient.
pub const MAX_ALPHA: f64 = 1.0;

/// Conventional decay constant `W` (alpha = 0.01 at D = 2).
pub const DEFAULT_DECAY: f64 = -4.6;

/// Compute the FRAMA smoothing coefficient over `data[i .. i + n]`.
///
/// # Arguments
/// - `n` — period, must be even and positive.
/// - `data` — price series, oldest first.
/// - `i` — offset of the first price in the window.
/// - `w` — decay constant, must be finite and negative.
///
/// # Errors
/// - `PreconditionViolation` for an odd/zero period, a window running past the
///   end of `data`, or an invalid `w`.
/// - `DomainError` when a range is zero so the logarithm is undefined (e.g. a
///   flat window, or two flat halves).
pub fn fractal_alpha(n: usize, data: &[f64], i: usize, w: f64) -> IndicatorResult<f64> {
    if n == 0 || n % 2 != 0 {
        return Err(IndicatorError::precondition(format!(
            "period must be even and positive, got {n}"
        )));
    }
    if !w.is_finite() || w >= 0.0 {
        return Err(IndicatorError::precondition(format!(
            "decay constant must be finite and negative, got {w}"
        )));
    }
    let end = i
        .checked_add(n)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            IndicatorError::precondition(format!(
                "window [{i}, {i}+{n}) exceeds series length {}",
                data.len()
            ))
        })?;

    let half = n / 2;
    let mid = i + half;

    let (later_max, later_min) = extrema(&data[mid..end])?;
    let (earlier_max, earlier_min) = extrema(&data[i..mid])?;
    let (max, min) = extrema(&data[i..end])?;

    let hl1 = (later_max - later_min) / half as f64;
    let hl2 = (earlier_max - earlier_min) / half as f64;
    let hl = (max - min) / n as f64;

    if !(hl1 + hl2 > 0.0) {
        return Err(IndicatorError::domain(format!(
            "half-window ranges sum to {} at offset {i}; ln undefined",
            hl1 + hl2
        )));
    }
    if !(hl > 0.0) {
        return Err(IndicatorError::domain(format!(
            "full-window range is {hl} at offset {i}; ln undefined"
        )));
    }

    let d = ((hl1 + hl2).ln() - hl.ln()) / std::f64::consts::LN_2;
    if !d.is_finite() {
        return Err(IndicatorError::domain(format!(
            "fractal dimension is not finite at offset {i}"
        )));
    }

    let raw = (w * (d - 1.0)).exp();
    let alpha = raw.clamp(MIN_ALPHA, MAX_ALPHA);

    trace!(
        offset = i,
        period = n,
        hl1,
        hl2,
        hl,
        dimension = format!("{:.4}", d),
        raw_alpha = format!("{:.4}", raw),
        alpha,
        "fractal alpha computed"
    );

    Ok(alpha)
}

/// One point of the FRAMA series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramaPoint {
    /// Index into the price series of the last price in the window.
    pub index: usize,
    /// Coefficient applied at this point; `None` for the seed.
    pub alpha: Option<f64>,
    /// Filtered value.
    pub value: f64,
}

/// Compute the FRAMA series for `data` with period `n` and decay `w`.
///
/// The first point sits at index `n - 1` and holds the mean of the first
/// window. Every later point `t` uses the coefficient of the window ending at
/// `t`. The first failing window aborts the series.
pub fn calculate_frama(data: &[f64], n: usize, w: f64) -> IndicatorResult<Vec<FramaPoint>> {
    if n == 0 || n % 2 != 0 {
        return Err(IndicatorError::precondition(format!(
            "period must be even and positive, got {n}"
        )));
    }
    if data.len() < n {
        return Err(IndicatorError::precondition(format!(
            "FRAMA needs at least {n} prices, got {}",
            data.len()
        )));
    }

    let mut points = Vec::with_capacity(data.len() - n + 1);
    let mut prev = mean(&data[..n]);
    points.push(FramaPoint {
        index: n - 1,
        alpha: None,
        value: prev,
    });

    for t in n..data.len() {
        let alpha = fractal_alpha(n, data, t + 1 - n, w)?;
        let value = alpha * data[t] + (1.0 - alpha) * prev;
        points.push(FramaPoint {
            index: t,
            alpha: Some(alpha),
            value,
        });
        prev = value;
    }

    trace!(period = n, points = points.len(), "FRAMA series computed");
    Ok(points)
}
