use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime};

/// One row of the stock directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockListing {
    pub id: i64,
    pub instrument: String,
}

/// One OHLCV observation of an instrument.
///
/// Fields are stored exactly as delivered. `low <= open/close <= high` is
/// expected of clean data but never checked, so statistics can still be
/// computed over upstream data of unknown quality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub instrument: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub datetime: UtcDateTime,
}

impl PriceRecord {
    pub fn new(
        instrument: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        datetime: UtcDateTime,
    ) -> Self {
        Self {
            id: None,
            instrument: instrument.into(),
            open,
            high,
            low,
            close,
            volume,
            datetime,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Price records of one instrument, in the order the backend delivered them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub instrument: Symbol,
    pub records: Vec<PriceRecord>,
}

impl PriceHistory {
    pub fn new(instrument: Symbol, records: Vec<PriceRecord>) -> Self {
        Self {
            instrument,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Best single buy/sell pair reported by the backend strategy endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestBuySell {
    #[serde(rename = "BuyIndex")]
    pub buy_index: usize,
    #[serde(rename = "SellIndex")]
    pub sell_index: usize,
    #[serde(rename = "Profit")]
    pub profit: f64,
}

/// Strategy performance as computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    #[serde(rename = "MovingAverage", default)]
    pub moving_average: Vec<f64>,
    #[serde(rename = "BestBuySell")]
    pub best_buy_sell: BestBuySell,
}
