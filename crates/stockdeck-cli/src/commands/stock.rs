//! Price history page: summary cards above the record table.

use std::borrow::Cow;

use serde::Serialize;
use stockdeck_core::{
    compute_summary, BackendGateway, PriceChange, PriceHistoryView, PriceRecord,
    StatisticsSummary, StatsError, Symbol, ViewState,
};

use tracing::debug;

use crate::cli::RecordOrder;
use crate::error::CliError;
use crate::format;
use crate::output::{Align, TextTable};
use crate::routes::Route;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct StockPageData<'a> {
    instrument: &'a str,
    records: &'a [PriceRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<StatisticsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_change: Option<PriceChange>,
}

pub async fn run<G>(
    gateway: &G,
    instrument: Symbol,
    order: RecordOrder,
) -> Result<CommandResult, CliError>
where
    G: BackendGateway + ?Sized,
{
    let route = Route::StockData(instrument.clone()).path();
    let mut view = PriceHistoryView::new(instrument);
    let state = view.load(gateway).await.label();
    debug!(instrument = %view.instrument(), state, "price history settled");

    let history = match view.state() {
        ViewState::Ready(history) => history.clone(),
        ViewState::Failed(error) => {
            let data = serde_json::to_value(empty_data(view.instrument()))?;
            let lines = vec![
                format!("{} Stock Data", view.instrument()),
                String::new(),
                String::from("Error loading stock data"),
                error.message().to_owned(),
            ];
            return Ok(CommandResult::ok(route, data, lines).with_error(error));
        }
        ViewState::Idle | ViewState::Loading => {
            let data = serde_json::to_value(empty_data(view.instrument()))?;
            let lines = vec![String::from("Loading stock data...")];
            return Ok(CommandResult::ok(route, data, lines));
        }
    };

    // Backend order goes through the view's memoized summary; any other order
    // is a different series with its own first and last record.
    let (records, summary) = match order {
        RecordOrder::Backend => (
            Cow::Borrowed(history.records.as_slice()),
            view.summary().unwrap_or(Err(StatsError::EmptyInput)),
        ),
        RecordOrder::OldestFirst | RecordOrder::NewestFirst => {
            let sorted = sort_records(&history.records, order);
            let summary = compute_summary(&sorted);
            (Cow::Owned(sorted), summary)
        }
    };

    let summary = summary.ok();
    let price_change = PriceChange::between_ends(&records);

    let mut lines = vec![format!("{} Stock Data", history.instrument), String::new()];
    match &summary {
        Some(summary) => {
            lines.extend(summary_cards(summary, price_change));
            lines.push(String::new());
            lines.extend(record_table(&records));
        }
        None => lines.push(String::from("No historical data available")),
    }

    let data = StockPageData {
        instrument: history.instrument.as_str(),
        records: &records,
        summary,
        price_change,
    };
    let data = serde_json::to_value(data)?;

    let mut result = CommandResult::ok(route, data, lines);
    if order != RecordOrder::Backend && summary.is_some() {
        result = result.with_warning(format!(
            "records re-ordered {}; price change compares the re-ordered ends",
            order_label(order)
        ));
    }
    Ok(result)
}

fn empty_data(instrument: &Symbol) -> StockPageData<'_> {
    StockPageData {
        instrument: instrument.as_str(),
        records: &[],
        summary: None,
        price_change: None,
    }
}

/// Stable sort by timestamp; records sharing a timestamp keep backend order.
fn sort_records(records: &[PriceRecord], order: RecordOrder) -> Vec<PriceRecord> {
    let mut sorted = records.to_vec();
    match order {
        RecordOrder::Backend => {}
        RecordOrder::OldestFirst => sorted.sort_by_key(|record| record.datetime),
        RecordOrder::NewestFirst => {
            sorted.sort_by_key(|record| std::cmp::Reverse(record.datetime));
        }
    }
    sorted
}

const fn order_label(order: RecordOrder) -> &'static str {
    match order {
        RecordOrder::Backend => "as delivered",
        RecordOrder::OldestFirst => "oldest first",
        RecordOrder::NewestFirst => "newest first",
    }
}

fn summary_cards(summary: &StatisticsSummary, change: Option<PriceChange>) -> Vec<String> {
    let mut cards = vec![
        format!(
            "Highest Price   {}  {}",
            format::currency(summary.highest_price.value),
            format::datetime(summary.highest_price.occurred_at)
        ),
        format!(
            "Lowest Price    {}  {}",
            format::currency(summary.lowest_price.value),
            format::datetime(summary.lowest_price.occurred_at)
        ),
        format!(
            "Average Volume  {}  Across {} data points",
            format::volume(summary.average_volume),
            summary.record_count
        ),
    ];

    if let (Some(percent), Some(change)) = (summary.percent_change_first_to_last, change) {
        cards.push(format!(
            "Price Change    {} ({})  First to last entry",
            format::percent(percent),
            change.as_str()
        ));
    }

    cards
}

fn record_table(records: &[PriceRecord]) -> Vec<String> {
    let mut table = TextTable::new(&[
        ("#", Align::Right),
        ("Instrument", Align::Left),
        ("Open", Align::Right),
        ("High", Align::Right),
        ("Low", Align::Right),
        ("Close", Align::Right),
        ("Volume", Align::Right),
        ("Date-Time", Align::Left),
    ]);

    for (index, record) in records.iter().enumerate() {
        table.push_row(vec![
            (index + 1).to_string(),
            record.instrument.clone(),
            format::currency(record.open),
            format::currency(record.high),
            format::currency(record.low),
            format::currency(record.close),
            format::volume(record.volume),
            format::datetime(record.datetime),
        ]);
    }

    table.lines()
}
