pub mod csv_parser;
pub mod quote;
pub mod stooq;

// Re-export the quote type for convenient access (e.g. `use crate::market_data::DailyQuote`).
pub use csv_parser::load_csv_file;
pub use quote::{price_series, DailyQuote};
pub use stooq::StooqClient;
