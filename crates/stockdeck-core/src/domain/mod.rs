//! # Domain Models
//!
//! Types shared by the gateway, the statistics engine and the views.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockListing`] | One row of the stock directory |
//! | [`PriceRecord`] | OHLCV observation with a timestamp |
//! | [`PriceHistory`] | Ordered records of one instrument |
//! | [`PerformanceReport`] | Backend strategy output (moving average, best buy/sell) |
//! | [`Symbol`] | Validated instrument identifier for user input |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Unlike [`Symbol`], records are not validated: a record whose `low`
//! exceeds its `high` is kept as delivered.

mod models;
mod symbol;
mod timestamp;

pub use models::{BestBuySell, PerformanceReport, PriceHistory, PriceRecord, StockListing};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
