use serde::Serialize;
use stockdeck_core::{BackendGateway, StockDirectoryView, StockListing, ViewState};
use tracing::debug;

use crate::error::CliError;
use crate::output::{Align, TextTable};
use crate::routes::Route;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct StocksData<'a> {
    stocks: &'a [StockListing],
}

pub async fn run<G>(gateway: &G) -> Result<CommandResult, CliError>
where
    G: BackendGateway + ?Sized,
{
    let route = Route::Stocks.path();
    let mut view = StockDirectoryView::new();

    let state = view.load(gateway).await;
    debug!(state = state.label(), "stock directory settled");

    match state {
        ViewState::Ready(stocks) => {
            let data = serde_json::to_value(StocksData { stocks })?;
            Ok(CommandResult::ok(route, data, directory_lines(stocks)))
        }
        ViewState::Failed(error) => {
            let data = serde_json::to_value(StocksData { stocks: &[] })?;
            let lines = vec![
                String::from("Error loading stocks"),
                error.message().to_owned(),
            ];
            Ok(CommandResult::ok(route, data, lines).with_error(error))
        }
        ViewState::Idle | ViewState::Loading => {
            let data = serde_json::to_value(StocksData { stocks: &[] })?;
            Ok(CommandResult::ok(route, data, vec![String::from("Loading stocks...")]))
        }
    }
}

fn directory_lines(stocks: &[StockListing]) -> Vec<String> {
    let mut lines = vec![String::from("Available Stocks"), String::new()];

    if stocks.is_empty() {
        lines.push(String::from("No stocks available"));
        return lines;
    }

    let mut table = TextTable::new(&[
        ("#", Align::Right),
        ("Instrument", Align::Left),
        ("ID", Align::Right),
        ("Open", Align::Left),
    ]);
    for (index, stock) in stocks.iter().enumerate() {
        let path = format!("/stocks-data/{}", stock.instrument);
        let open = if path.contains(char::is_whitespace) {
            format!("stockdeck open '{path}'")
        } else {
            format!("stockdeck open {path}")
        };
        table.push_row(vec![
            (index + 1).to_string(),
            stock.instrument.clone(),
            stock.id.to_string(),
            open,
        ]);
    }

    lines.extend(table.lines());
    lines.push(String::new());
    lines.push(format!("{} stocks listed", stocks.len()));
    lines
}

#[cfg(test)]
mod tests {
    use stockdeck_core::{FixtureHttpClient, HttpError};

    use super::*;
    use crate::commands::test_support::{gateway, BASE};

    #[tokio::test]
    async fn numbers_each_listed_instrument() {
        // Given: two stocks
        let gateway = gateway(FixtureHttpClient::new().with_json(
            format!("{BASE}/get-all-stocks"),
            r#"[{"id":7,"instrument":"HINDALCO"},{"id":9,"instrument":"TATASTEEL"}]"#,
        ));

        // When: the page renders
        let page = run(&gateway).await.expect("page renders");

        // Then: rows are numbered in backend order with their ids
        assert_eq!(page.route, "/stocks");
        assert!(page.errors.is_empty());
        let rows = page
            .lines
            .iter()
            .map(|line| line.split_whitespace().take(3).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert!(rows.contains(&vec!["1", "HINDALCO", "7"]));
        assert!(rows.contains(&vec!["2", "TATASTEEL", "9"]));
        assert_eq!(page.data["stocks"][1]["instrument"], "TATASTEEL");
    }

    #[tokio::test]
    async fn open_hint_quotes_instruments_with_spaces() {
        let gateway = gateway(FixtureHttpClient::new().with_json(
            format!("{BASE}/get-all-stocks"),
            r#"[{"id":1,"instrument":"3MINDIA"},{"id":2,"instrument":"NIFTY 50"}]"#,
        ));

        let page = run(&gateway).await.expect("page renders");

        assert!(page
            .lines
            .iter()
            .any(|line| line.ends_with("stockdeck open /stocks-data/3MINDIA")));
        assert!(page
            .lines
            .iter()
            .any(|line| line.ends_with("stockdeck open '/stocks-data/NIFTY 50'")));
    }

    #[tokio::test]
    async fn empty_directory_says_so() {
        let gateway = gateway(FixtureHttpClient::new().with_json(
            format!("{BASE}/get-all-stocks"),
            "[]",
        ));

        let page = run(&gateway).await.expect("page renders");

        assert!(page.lines.iter().any(|line| line == "No stocks available"));
        assert!(page.errors.is_empty());
    }

    #[tokio::test]
    async fn failed_listing_renders_error_state() {
        let gateway = gateway(FixtureHttpClient::new().with_error(
            format!("{BASE}/get-all-stocks"),
            HttpError::new("connection refused"),
        ));

        let page = run(&gateway).await.expect("page renders");

        assert_eq!(page.lines[0], "Error loading stocks");
        assert_eq!(page.errors.len(), 1);
        assert_eq!(page.errors[0].code, "gateway.transport");
        assert_eq!(page.errors[0].retryable, Some(true));
    }
}
