//! Behavior tests for the backend gateway.
//!
//! The backend is replaced by a fixture transport answering with the exact
//! payload shapes the real service produces.

use std::sync::Arc;

use stockdeck_core::{
    BackendGateway, FixtureHttpClient, GatewayErrorKind, HttpBackendGateway, HttpError,
    HttpResponse,
};
use stockdeck_tests::{fixture_gateway, symbol, BASE};

fn gateway(client: FixtureHttpClient) -> (HttpBackendGateway, Arc<FixtureHttpClient>) {
    fixture_gateway(client, 1_500)
}

// =============================================================================
// Stock directory
// =============================================================================

#[tokio::test]
async fn listing_decodes_ids_and_instruments() {
    // Given: a backend with two stocks
    let (gateway, _) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/get-all-stocks"),
        r#"[{"id":1,"instrument":"HINDALCO"},{"id":2,"instrument":"TATASTEEL"}]"#,
    ));

    // When: the directory is requested
    let stocks = gateway.list_stocks().await.expect("listing should decode");

    // Then: both rows arrive in backend order
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].id, 1);
    assert_eq!(stocks[0].instrument, "HINDALCO");
    assert_eq!(stocks[1].instrument, "TATASTEEL");
}

#[tokio::test]
async fn empty_stock_table_is_an_empty_listing_not_an_error() {
    // Given: the backend's "No stocks found" 404
    let (gateway, _) = gateway(FixtureHttpClient::new().with_response(
        format!("{BASE}/get-all-stocks"),
        HttpResponse::new(404, r#"{"detail":"No stocks found"}"#),
    ));

    // When / Then: the page gets an empty list to render
    let stocks = gateway.list_stocks().await.expect("404 means empty");
    assert!(stocks.is_empty());
}

#[tokio::test]
async fn listing_server_error_is_retryable_status_failure() {
    let (gateway, _) = gateway(FixtureHttpClient::new().with_response(
        format!("{BASE}/get-all-stocks"),
        HttpResponse::new(500, "Internal Server Error"),
    ));

    let error = gateway.list_stocks().await.expect_err("500 must fail");

    assert_eq!(error.kind(), GatewayErrorKind::Status);
    assert_eq!(error.http_status(), Some(500));
    assert!(error.retryable());
}

// =============================================================================
// Price history
// =============================================================================

#[tokio::test]
async fn price_history_stamps_instrument_and_keeps_backend_order() {
    // Given: two rows, newest first, with naive isoformat timestamps
    let (gateway, client) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/get-stock-data?instrument=HINDALCO"),
        r#"{"data":[
            {"id":1,"stockId":1,"datetime":"2024-03-02T00:00:00","close":114.0,"high":115.35,"low":113.0,"open":113.15,"volume":5737135},
            {"id":2,"stockId":1,"datetime":"2024-03-01T00:00:00","close":111.1,"high":112.7,"low":109.3,"open":112.0,"volume":8724577}
        ]}"#,
    ));

    // When: the history is requested
    let history = gateway
        .price_history(&symbol("HINDALCO"))
        .await
        .expect("history should decode");

    // Then: records carry the requested instrument and arrive unsorted
    assert_eq!(history.instrument.as_str(), "HINDALCO");
    assert_eq!(history.len(), 2);
    assert_eq!(history.records[0].close, 114.0);
    assert_eq!(history.records[0].instrument, "HINDALCO");
    assert_eq!(history.records[0].id, Some(1));
    assert_eq!(history.records[1].volume, 8_724_577);
    assert!(history.records[0].datetime > history.records[1].datetime);

    // And: the request carried the configured timeout
    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].timeout_ms, 1_500);
}

#[tokio::test]
async fn instrument_is_url_encoded_in_the_query() {
    // Given: an instrument containing a reserved character
    let (gateway, client) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/get-stock-data?instrument=M%26M"),
        r#"{"data":[]}"#,
    ));

    // When: the history is requested
    let history = gateway.price_history(&symbol("M&M")).await.expect("empty history");

    // Then: the ampersand did not split the query
    assert!(history.is_empty());
    assert_eq!(
        client.requests()[0].url,
        "http://backend.test/get-stock-data?instrument=M%26M"
    );
}

#[tokio::test]
async fn instrument_case_and_spaces_reach_the_backend_verbatim() {
    // Given: an index name with a space and mixed case
    let (gateway, client) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/get-stock-data?instrument=Nifty%2050"),
        r#"{"data":[]}"#,
    ));

    // When: the history is requested
    let history = gateway
        .price_history(&symbol("Nifty 50"))
        .await
        .expect("empty history");

    // Then: nothing was upper-cased and the space was encoded
    assert_eq!(history.instrument.as_str(), "Nifty 50");
    assert_eq!(
        client.requests()[0].url,
        "http://backend.test/get-stock-data?instrument=Nifty%2050"
    );
}

#[tokio::test]
async fn unknown_instrument_surfaces_backend_detail() {
    let (gateway, _) = gateway(FixtureHttpClient::new().with_response(
        format!("{BASE}/get-stock-data?instrument=NOPE"),
        HttpResponse::new(404, r#"{"detail":"Stock not found"}"#),
    ));

    let error = gateway
        .price_history(&symbol("NOPE"))
        .await
        .expect_err("404 must fail");

    assert_eq!(error.kind(), GatewayErrorKind::NotFound);
    assert_eq!(error.message(), "Stock not found");
    assert_eq!(error.code(), "gateway.not_found");
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let (gateway, _) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/get-stock-data?instrument=HINDALCO"),
        r#"{"data":[{"datetime":"not-a-date","close":1.0,"high":1.0,"low":1.0,"open":1.0,"volume":1}]}"#,
    ));

    let error = gateway
        .price_history(&symbol("HINDALCO"))
        .await
        .expect_err("bad timestamp must fail");

    assert_eq!(error.kind(), GatewayErrorKind::Decode);
    assert!(!error.retryable());
}

#[tokio::test]
async fn transport_failure_keeps_retryability() {
    let (gateway, _) = gateway(FixtureHttpClient::new().with_error(
        format!("{BASE}/get-stock-data?instrument=HINDALCO"),
        HttpError::new("connection refused"),
    ));

    let error = gateway
        .price_history(&symbol("HINDALCO"))
        .await
        .expect_err("transport must fail");

    assert_eq!(error.kind(), GatewayErrorKind::Transport);
    assert!(error.retryable());
    assert!(error.message().contains("connection refused"));
}

// =============================================================================
// Strategy performance and health
// =============================================================================

#[tokio::test]
async fn performance_report_decodes_backend_field_names() {
    let (gateway, _) = gateway(FixtureHttpClient::new().with_json(
        format!("{BASE}/strategy/performance?instrument=HINDALCO"),
        r#"{"MovingAverage":[95.0,98.33,103.33],"BestBuySell":{"BuyIndex":1,"SellIndex":3,"Profit":20.0}}"#,
    ));

    let report = gateway
        .strategy_performance(&symbol("HINDALCO"))
        .await
        .expect("report should decode");

    assert_eq!(report.moving_average.len(), 3);
    assert_eq!(report.best_buy_sell.buy_index, 1);
    assert_eq!(report.best_buy_sell.sell_index, 3);
    assert_eq!(report.best_buy_sell.profit, 20.0);
}

#[tokio::test]
async fn health_reports_reachability_without_failing() {
    // Given: one healthy backend and one that refuses connections
    let (healthy, _) = gateway(
        FixtureHttpClient::new().with_json(format!("{BASE}/"), r#""Server is running healthy""#),
    );
    let (down, _) = gateway(
        FixtureHttpClient::new().with_error(format!("{BASE}/"), HttpError::new("connection refused")),
    );

    // When: both are checked
    let up = healthy.health().await;
    let unreachable = down.health().await;

    // Then: the status explains each outcome
    assert!(up.reachable);
    assert_eq!(up.status, Some(200));
    assert_eq!(up.message, "Server is running healthy");

    assert!(!unreachable.reachable);
    assert_eq!(unreachable.status, None);
    assert!(unreachable.message.contains("connection refused"));
}
