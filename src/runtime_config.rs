// =============================================================================
// Runtime Configuration — analysis settings loaded from JSON
// =============================================================================
//
// Every tunable parameter of a run lives here: which instrument to pull, which
// price column to analyse, and the indicator periods. All fields carry
// `#[serde(default)]` so a partial (or empty) JSON file is always valid.
//
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::fractal::DEFAULT_DECAY;
use crate::market_data::stooq::{DAILY, DEFAULT_BASE_URL, INTERVALS};
use crate::types::PriceField;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "wig20".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_interval() -> String {
    DAILY.to_string()
}

fn default_frama_period() -> usize {
    16
}

fn default_decay_constant() -> f64 {
    DEFAULT_DECAY
}

fn default_stats_window() -> usize {
    20
}

fn default_request_timeout_secs() -> u64 {
    10
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Settings for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    // --- Source ---------------------------------------------------------------

    /// stooq symbol, e.g. `wig20`, `kgh`, `^spx`.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Root URL of the quote endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// stooq interval code (`d`, `w`, `m`).
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Read quotes from this CSV file instead of the network.
    #[serde(default)]
    pub csv_path: Option<String>,

    /// HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // --- Indicators -----------------------------------------------------------

    /// Price column fed to the indicators.
    #[serde(default)]
    pub price_field: PriceField,

    /// FRAMA period `n`. Must be even.
    #[serde(default = "default_frama_period")]
    pub frama_period: usize,

    /// FRAMA decay constant `W`. Must be negative.
    #[serde(default = "default_decay_constant")]
    pub decay_constant: f64,

    /// Window length for rolling extrema / deviation statistics.
    #[serde(default = "default_stats_window")]
    pub stats_window: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            base_url: default_base_url(),
            interval: default_interval(),
            csv_path: None,
            request_timeout_secs: default_request_timeout_secs(),
            price_field: PriceField::default(),
            frama_period: default_frama_period(),
            decay_constant: default_decay_constant(),
            stats_window: default_stats_window(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            frama_period = config.frama_period,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Apply `FRAMA_SYMBOL` / `FRAMA_CSV_PATH` overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var("FRAMA_SYMBOL").ok(),
            std::env::var("FRAMA_CSV_PATH").ok(),
        );
    }

    fn apply_overrides(&mut self, symbol: Option<String>, csv_path: Option<String>) {
        if let Some(sym) = symbol.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) {
            self.symbol = sym;
        }
        if let Some(path) = csv_path.filter(|p| !p.trim().is_empty()) {
            self.csv_path = Some(path);
        }
    }

    /// Reject settings the indicators cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            bail!("symbol must not be empty");
        }
        if !INTERVALS.contains(&self.interval.as_str()) {
            bail!("interval must be one of {:?}, got {:?}", INTERVALS, self.interval);
        }
        if self.frama_period == 0 || self.frama_period % 2 != 0 {
            bail!("frama_period must be even and positive, got {}", self.frama_period);
        }
        if !self.decay_constant.is_finite() || self.decay_constant >= 0.0 {
            bail!("decay_constant must be negative, got {}", self.decay_constant);
        }
        if self.stats_window < 2 {
            bail!("stats_window must be at least 2, got {}", self.stats_window);
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.symbol, "wig20");
        assert_eq!(cfg.base_url, "https://stooq.com");
        assert_eq!(cfg.interval, "d");
        assert_eq!(cfg.price_field, PriceField::Close);
        assert_eq!(cfg.frama_period, 16);
        assert!((cfg.decay_constant + 4.6).abs() < f64::EPSILON);
        assert_eq!(cfg.stats_window, 20);
        assert!(cfg.csv_path.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.symbol, "wig20");
        assert_eq!(cfg.frama_period, 16);
        assert_eq!(cfg.request_timeout_secs, 10);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "symbol": "kgh", "price_field": "Open", "frama_period": 10 }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.symbol, "kgh");
        assert_eq!(cfg.price_field, PriceField::Open);
        assert_eq!(cfg.frama_period, 10);
        assert_eq!(cfg.stats_window, 20);
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let bad = [
            RuntimeConfig { frama_period: 15, ..Default::default() },
            RuntimeConfig { frama_period: 0, ..Default::default() },
            RuntimeConfig { decay_constant: 0.5, ..Default::default() },
            RuntimeConfig { decay_constant: f64::NAN, ..Default::default() },
            RuntimeConfig { stats_window: 1, ..Default::default() },
            RuntimeConfig { symbol: "  ".into(), ..Default::default() },
            RuntimeConfig { request_timeout_secs: 0, ..Default::default() },
            RuntimeConfig { interval: "x".into(), ..Default::default() },
            RuntimeConfig { interval: "D".into(), ..Default::default() },
        ];
        for cfg in &bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
    }

    #[test]
    fn validate_accepts_stooq_intervals() {
        for iv in ["d", "w", "m"] {
            let cfg = RuntimeConfig { interval: iv.into(), ..Default::default() };
            assert!(cfg.validate().is_ok(), "interval {iv} should be accepted");
        }
    }

    #[test]
    fn overrides_replace_symbol_and_csv_path() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(Some(" PKN ".into()), Some("data/pkn.csv".into()));
        assert_eq!(cfg.symbol, "pkn");
        assert_eq!(cfg.csv_path.as_deref(), Some("data/pkn.csv"));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut cfg = RuntimeConfig::default();
        cfg.apply_overrides(Some("".into()), Some("   ".into()));
        assert_eq!(cfg.symbol, "wig20");
        assert!(cfg.csv_path.is_none());
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join(format!("frama_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "symbol": "cdr", "stats_window": 30 }"#).unwrap();
        let cfg = RuntimeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.symbol, "cdr");
        assert_eq!(cfg.stats_window, 30);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(RuntimeConfig::load("/nonexistent/frama_config.json").is_err());
    }
}
