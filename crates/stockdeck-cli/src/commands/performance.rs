use serde::Serialize;
use stockdeck_core::{BackendGateway, PerformanceReport, Symbol};
use tracing::warn;

use crate::error::CliError;
use crate::format;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PerformanceData<'a> {
    instrument: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<PerformanceReport>,
}

pub async fn run<G>(gateway: &G, instrument: &Symbol) -> Result<CommandResult, CliError>
where
    G: BackendGateway + ?Sized,
{
    let route = format!("/strategy/performance?instrument={instrument}");
    let title = format!("{instrument} Strategy Performance");

    match gateway.strategy_performance(instrument).await {
        Ok(report) => {
            let lines = report_lines(title, &report);
            let data = serde_json::to_value(PerformanceData {
                instrument: instrument.as_str(),
                report: Some(report),
            })?;
            Ok(CommandResult::ok(route, data, lines))
        }
        Err(error) => {
            warn!(%instrument, code = error.code(), "strategy report unavailable");
            let data = serde_json::to_value(PerformanceData {
                instrument: instrument.as_str(),
                report: None,
            })?;
            let lines = vec![
                title,
                String::new(),
                String::from("Error loading strategy performance"),
                error.message().to_owned(),
            ];
            Ok(CommandResult::ok(route, data, lines).with_error(&error))
        }
    }
}

fn report_lines(title: String, report: &PerformanceReport) -> Vec<String> {
    let best = report.best_buy_sell;
    let mut lines = vec![
        title,
        String::new(),
        format!(
            "Best Buy/Sell   buy at #{}, sell at #{}, profit {}",
            best.buy_index,
            best.sell_index,
            format::currency(best.profit)
        ),
    ];

    if report.moving_average.is_empty() {
        lines.push(String::from("Moving Average  no values"));
    } else {
        let values = report
            .moving_average
            .iter()
            .map(|value| format::currency(*value))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Moving Average  {values}"));
    }

    lines
}
