use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PriceField;

/// One row of daily OHLC(V) data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Indices and some FX symbols are published without volume.
    pub volume: Option<f64>,
}

impl DailyQuote {
    /// Value of the requested price column.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

/// Project oldest-first quotes onto a single price column.
pub fn price_series(quotes: &[DailyQuote], field: PriceField) -> Vec<f64> {
    quotes.iter().map(|q| q.price(field)).collect()
}
