// =============================================================================
// Daily CSV normalisation
// =============================================================================
//
// stooq serves daily history as
//
//   Date,Open,High,Low,Close,Volume
//   2024-01-02,2300.5,2321.0,2290.1,2310.7,123456
//
// Volume is absent for indices. Unknown symbols yield the literal body
// "No data". Output is always sorted oldest-first.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use super::quote::DailyQuote;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a daily CSV body into typed quotes, oldest first.
///
/// The first line is treated as the header and dropped. Blank lines are
/// skipped; any other malformed line is an error naming its line number.
pub fn parse_daily_csv(text: &str) -> Result<Vec<DailyQuote>> {
    let body = text.trim();
    if body.is_empty() {
        bail!("empty CSV body");
    }
    if body.eq_ignore_ascii_case("no data") {
        bail!("quote source returned no data (unknown symbol?)");
    }

    let mut lines = body.lines().enumerate();
    let (_, header) = lines.next().context("missing CSV header")?;
    if !header.trim_start().starts_with("Date") {
        bail!("unexpected CSV header: {header}");
    }

    let mut quotes = Vec::new();
    for (idx, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let quote = parse_row(line).with_context(|| format!("bad CSV row at line {}", idx + 1))?;
        quotes.push(quote);
    }

    if quotes.is_empty() {
        bail!("CSV body has a header but no rows");
    }

    // Stable sort: rows sharing a date keep their source order.
    quotes.sort_by_key(|q| q.date);

    debug!(
        rows = quotes.len(),
        first = %quotes[0].date,
        last = %quotes[quotes.len() - 1].date,
        "daily CSV parsed"
    );
    Ok(quotes)
}

/// Read and parse a CSV file previously downloaded from the quote source.
pub fn load_csv_file(path: impl AsRef<Path>) -> Result<Vec<DailyQuote>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quotes from {}", path.display()))?;
    parse_daily_csv(&text).with_context(|| format!("failed to parse quotes from {}", path.display()))
}

fn parse_row(line: &str) -> Result<DailyQuote> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        bail!("expected at least 5 columns, got {}", fields.len());
    }

    let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
        .with_context(|| format!("invalid date {:?}", fields[0]))?;
    let volume = match fields.get(5) {
        Some(v) if !v.is_empty() => Some(parse_f64(v, "Volume")?),
        _ => None,
    };

    Ok(DailyQuote {
        date,
        open: parse_f64(fields[1], "Open")?,
        high: parse_f64(fields[2], "High")?,
        low: parse_f64(fields[3], "Low")?,
        close: parse_f64(fields[4], "Close")?,
        volume,
    })
}

fn parse_f64(raw: &str, name: &str) -> Result<f64> {
    let v = raw
        .parse::<f64>()
        .with_context(|| format!("failed to parse {name} as f64: {raw}"))?;
    if !v.is_finite() {
        bail!("{name} is not finite: {raw}");
    }
    Ok(v)
}
