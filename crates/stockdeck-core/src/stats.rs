//! Summary statistics over a price history.
//!
//! [`compute_summary`] is pure: it borrows the records, never reorders them,
//! and performs no I/O. Records are not validated; inverted ranges, zero
//! closes and non-finite values flow through IEEE-754 arithmetic.
//!
//! | Figure | Definition |
//! |--------|------------|
//! | highest price | max `high`, first record wins ties |
//! | lowest price | min `low`, first record wins ties |
//! | average volume | mean `volume`, rounded half away from zero |
//! | percent change | `(first.close - last.close) / last.close * 100` by position |

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::{PriceHistory, PriceRecord, UtcDateTime};

/// The only condition the engine reports.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("no price records to summarize")]
    EmptyInput,
}

/// An extreme price and the time of the record that set it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceExtreme {
    pub value: f64,
    pub occurred_at: UtcDateTime,
}

/// Derived figures shown above the price table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub highest_price: PriceExtreme,
    pub lowest_price: PriceExtreme,
    pub average_volume: u64,
    /// `None` when the history holds a single record.
    pub percent_change_first_to_last: Option<f64>,
    pub record_count: usize,
}

/// Direction of the first-to-last close comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceChange {
    Up,
    Down,
    Flat,
}

impl PriceChange {
    /// Compares the first and last record by position. `None` below two records.
    pub fn between_ends(history: &[PriceRecord]) -> Option<Self> {
        let [first, .., last] = history else {
            return None;
        };

        Some(if first.close > last.close {
            Self::Up
        } else if first.close < last.close {
            Self::Down
        } else {
            Self::Flat
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

/// Computes the summary of `history` as delivered.
///
/// "First" and "last" are index 0 and the final index. Callers wanting an
/// oldest-to-newest comparison must sort the sequence before calling.
pub fn compute_summary(history: &[PriceRecord]) -> Result<StatisticsSummary, StatsError> {
    let (first, rest) = history.split_first().ok_or(StatsError::EmptyInput)?;

    let mut highest = PriceExtreme {
        value: first.high,
        occurred_at: first.datetime,
    };
    let mut lowest = PriceExtreme {
        value: first.low,
        occurred_at: first.datetime,
    };

    // Strict comparisons keep the earliest record on ties.
    for record in rest {
        if record.high > highest.value {
            highest = PriceExtreme {
                value: record.high,
                occurred_at: record.datetime,
            };
        }
        if record.low < lowest.value {
            lowest = PriceExtreme {
                value: record.low,
                occurred_at: record.datetime,
            };
        }
    }

    Ok(StatisticsSummary {
        highest_price: highest,
        lowest_price: lowest,
        average_volume: average_volume(history),
        percent_change_first_to_last: percent_change_first_to_last(history),
        record_count: history.len(),
    })
}

/// Mean volume rounded half away from zero. Zero for an empty slice.
pub fn average_volume(history: &[PriceRecord]) -> u64 {
    if history.is_empty() {
        return 0;
    }

    let total: u128 = history.iter().map(|record| u128::from(record.volume)).sum();
    let count = history.len() as u128;
    let rounded = (total * 2 + count) / (count * 2);

    u64::try_from(rounded).unwrap_or(u64::MAX)
}

/// Positional percent change, `None` below two records.
pub fn percent_change_first_to_last(history: &[PriceRecord]) -> Option<f64> {
    let [first, .., last] = history else {
        return None;
    };

    Some((first.close - last.close) / last.close * 100.0)
}

/// Caches the summary of the last history it saw, keyed by allocation identity.
///
/// Holding the `Arc` keeps the allocation alive, so a pointer match always
/// means the same, unmodified history.
#[derive(Debug, Default)]
pub struct SummaryMemo {
    entry: Option<(Arc<PriceHistory>, Result<StatisticsSummary, StatsError>)>,
    computations: usize,
}

impl SummaryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        history: &Arc<PriceHistory>,
    ) -> Result<StatisticsSummary, StatsError> {
        if let Some((source, summary)) = &self.entry {
            if Arc::ptr_eq(source, history) {
                return *summary;
            }
        }

        let summary = compute_summary(&history.records);
        self.computations += 1;
        self.entry = Some((Arc::clone(history), summary));
        summary
    }

    /// Number of times the engine actually ran.
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
