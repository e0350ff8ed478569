// =============================================================================
// Series Analysis
// =============================================================================
//
// Composes the indicator modules over one instrument's daily history:
//
//   1. Project quotes onto the configured price column (oldest first).
//   2. FRAMA series with the configured period and decay constant.
//   3. Rolling extrema / σ / MAD over `stats_window`.
//   4. Whole-series extrema / σ / MAD.
//
// The result is a serialisable snapshot; nothing is cached between runs.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::indicators::fractal::{calculate_frama, fractal_alpha, FramaPoint};
use crate::indicators::rolling::{rolling_stats, WindowStats};
use crate::market_data::{price_series, DailyQuote};
use crate::runtime_config::RuntimeConfig;
use crate::types::PriceField;

/// Snapshot of every statistic computed for one series.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub price_field: PriceField,
    pub rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub last_price: f64,

    /// Full FRAMA series, first point at index `frama_period - 1`.
    pub frama: Vec<FramaPoint>,

    /// Rolling statistics, one entry per `stats_window`-long window.
    pub rolling: Vec<WindowStats>,

    /// Statistics over the whole series.
    pub overall: WindowStats,
}

impl AnalysisReport {
    /// Most recent FRAMA point.
    pub fn latest_frama(&self) -> Option<&FramaPoint> {
        self.frama.last()
    }

    /// Most recent rolling window.
    pub fn latest_window(&self) -> Option<&WindowStats> {
        self.rolling.last()
    }
}

/// Offset of the first FRAMA window the coefficient rejects, if any.
fn failing_window(series: &[f64], n: usize, w: f64) -> Option<usize> {
    (0..=series.len().saturating_sub(n)).find(|&i| fractal_alpha(n, series, i, w).is_err())
}

/// Run every indicator over `quotes` (oldest first) using `config`.
///
/// Fails when the series is shorter than the FRAMA period or the stats
/// window, or when any indicator rejects a window.
pub fn analyse(quotes: &[DailyQuote], config: &RuntimeConfig) -> Result<AnalysisReport> {
    let (first, last) = match (quotes.first(), quotes.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => bail!("no quotes to analyse for {}", config.symbol),
    };

    let needed = config.frama_period.max(config.stats_window);
    if quotes.len() < needed {
        bail!(
            "{} has {} rows, need at least {} (frama_period={}, stats_window={})",
            config.symbol,
            quotes.len(),
            needed,
            config.frama_period,
            config.stats_window
        );
    }

    let series = price_series(quotes, config.price_field);

    let frama = match calculate_frama(&series, config.frama_period, config.decay_constant) {
        Ok(points) => points,
        Err(e) => {
            let (offset, from, to) =
                match failing_window(&series, config.frama_period, config.decay_constant) {
                    Some(offset) => (
                        offset,
                        quotes[offset].date,
                        quotes[offset + config.frama_period - 1].date,
                    ),
                    None => (0, first.date, last.date),
                };
            warn!(
                symbol = %config.symbol,
                offset,
                %from,
                %to,
                error = %e,
                "FRAMA window rejected"
            );
            return Err(anyhow::Error::new(e).context(format!(
                "FRAMA failed for {} in window at offset {} ({} to {})",
                config.symbol, offset, from, to
            )));
        }
    };

    let rolling = rolling_stats(&series, config.stats_window)
        .with_context(|| format!("rolling statistics failed for {}", config.symbol))?;

    let overall = WindowStats::from_window(series.len() - 1, &series)
        .with_context(|| format!("series statistics failed for {}", config.symbol))?;

    debug!(
        symbol = %config.symbol,
        rows = series.len(),
        frama_points = frama.len(),
        windows = rolling.len(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        symbol: config.symbol.clone(),
        price_field: config.price_field,
        rows: quotes.len(),
        first_date: first.date,
        last_date: last.date,
        last_price: last.price(config.price_field),
        frama,
        rolling,
        overall,
    })
}
