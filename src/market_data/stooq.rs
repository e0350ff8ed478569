// =============================================================================
// stooq.com quote client — daily history as CSV over plain HTTPS GET
// =============================================================================
//
// Endpoint:  {base}/q/d/l/?s={symbol}&i={interval}
//   interval: d (daily), w (weekly), m (monthly)
// No authentication. The body is handed to `parse_daily_csv`.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, instrument, warn};

use super::csv_parser::parse_daily_csv;
use super::quote::DailyQuote;

/// Public stooq endpoint.
pub const DEFAULT_BASE_URL: &str = "https://stooq.com";

/// Daily interval code.
pub const DAILY: &str = "d";

/// Interval codes stooq accepts: daily, weekly, monthly.
pub const INTERVALS: [&str; 3] = [DAILY, "w", "m"];

/// HTTP client for stooq CSV downloads.
#[derive(Clone)]
pub struct StooqClient {
    base_url: String,
    client: reqwest::Client,
}

impl StooqClient {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        debug!(base_url = %base_url, "StooqClient initialised");
        Ok(Self { base_url, client })
    }

    /// Build the download request for `symbol` at `interval`. Query values
    /// are percent-encoded by reqwest.
    pub fn history_request(&self, symbol: &str, interval: &str) -> Result<reqwest::Request> {
        if !INTERVALS.contains(&interval) {
            anyhow::bail!("unsupported stooq interval {interval:?} (expected one of {INTERVALS:?})");
        }
        let symbol = symbol.trim().to_lowercase();
        self.client
            .get(format!("{}/q/d/l/", self.base_url))
            .query(&[("s", symbol.as_str()), ("i", interval)])
            .build()
            .context("failed to build quote request")
    }

    /// Fetch and parse the full history of `symbol` at `interval`,
    /// oldest-first.
    #[instrument(skip(self), name = "stooq::fetch_history")]
    pub async fn fetch_history(&self, symbol: &str, interval: &str) -> Result<Vec<DailyQuote>> {
        let request = self.history_request(symbol, interval)?;
        let url = request.url().clone();

        let resp = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("GET {url} request failed"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("failed to read quote response body")?;

        if !status.is_success() {
            warn!(%status, symbol, "quote source returned an error status");
            anyhow::bail!("stooq GET {} returned {}: {}", url, status, body.trim());
        }

        let quotes =
            parse_daily_csv(&body).with_context(|| format!("invalid quote data for {symbol}"))?;
        debug!(symbol, interval, rows = quotes.len(), "history fetched");
        Ok(quotes)
    }
}
