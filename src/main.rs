// =============================================================================
// FRAMA Engine — Main Entry Point
// =============================================================================
//
// Pulls daily history for one instrument (stooq.com or a local CSV), runs the
// fractal adaptive coefficient and windowed statistics over it, and logs a
// summary of the latest values.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod indicators;
mod market_data;
mod runtime_config;
mod types;

use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::market_data::{DailyQuote, StooqClient};
use crate::runtime_config::RuntimeConfig;

const DEFAULT_CONFIG_PATH: &str = "frama_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("FRAMA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_env_overrides();
    config.validate().context("invalid runtime config")?;

    info!(
        symbol = %config.symbol,
        price_field = %config.price_field,
        frama_period = config.frama_period,
        decay_constant = config.decay_constant,
        stats_window = config.stats_window,
        "FRAMA engine starting"
    );

    // ── 2. Quotes ────────────────────────────────────────────────────────
    let quotes = load_quotes(&config).await?;
    info!(symbol = %config.symbol, rows = quotes.len(), "quotes loaded");

    // ── 3. Indicators ────────────────────────────────────────────────────
    let report = analysis::analyse(&quotes, &config)?;
    debug!(
        report = %serde_json::to_string(&report).context("failed to serialise report")?,
        "full analysis report"
    );

    // ── 4. Summary ───────────────────────────────────────────────────────
    info!(
        symbol = %report.symbol,
        from = %report.first_date,
        to = %report.last_date,
        last_price = report.last_price,
        "series"
    );

    if let Some(point) = report.latest_frama() {
        info!(
            frama = format!("{:.4}", point.value),
            alpha = ?point.alpha,
            index = point.index,
            "latest FRAMA"
        );
    }

    if let Some(window) = report.latest_window() {
        info!(
            window = config.stats_window,
            max = window.max,
            min = window.min,
            range = window.range(),
            std_dev = format!("{:.4}", window.std_dev),
            mean_abs_dev = format!("{:.4}", window.mean_abs_dev),
            "latest window statistics"
        );
    }

    info!(
        max = report.overall.max,
        min = report.overall.min,
        std_dev = format!("{:.4}", report.overall.std_dev),
        mean_abs_dev = format!("{:.4}", report.overall.mean_abs_dev),
        "whole-series statistics"
    );

    Ok(())
}

/// Read quotes from the configured CSV file, or download them from stooq.
async fn load_quotes(config: &RuntimeConfig) -> anyhow::Result<Vec<DailyQuote>> {
    if let Some(path) = &config.csv_path {
        info!(path = %path, "reading quotes from CSV file");
        return market_data::load_csv_file(path);
    }

    let client = StooqClient::new(
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    client
        .fetch_history(&config.symbol, &config.interval)
        .await
        .with_context(|| format!("failed to download history for {}", config.symbol))
}
