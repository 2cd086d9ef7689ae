//! Backend gateway: the HTTP endpoints the pages read from.
//!
//! | Operation | Endpoint | Result |
//! |-----------|----------|--------|
//! | [`list_stocks`](BackendGateway::list_stocks) | `GET /get-all-stocks` | `Vec<StockListing>` |
//! | [`price_history`](BackendGateway::price_history) | `GET /get-stock-data?instrument=` | [`PriceHistory`] |
//! | [`strategy_performance`](BackendGateway::strategy_performance) | `GET /strategy/performance?instrument=` | [`PerformanceReport`] |
//! | [`health`](BackendGateway::health) | `GET /` | [`HealthStatus`] |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::{PerformanceReport, PriceHistory, PriceRecord, StockListing, Symbol, UtcDateTime};

/// Gateway error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// The request never produced a response.
    Transport,
    /// The backend answered 404.
    NotFound,
    /// The backend answered another non-success status.
    Status,
    /// The body did not match the expected shape.
    Decode,
}

/// Structured gateway error surfaced by the views as their failed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    kind: GatewayErrorKind,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl GatewayError {
    pub fn transport(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind: GatewayErrorKind::Transport,
            message: message.into(),
            status: None,
            retryable,
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let kind = if status == 404 {
            GatewayErrorKind::NotFound
        } else {
            GatewayErrorKind::Status
        };

        Self {
            kind,
            message: message.into(),
            status: Some(status),
            retryable: status == 408 || status == 429 || status >= 500,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Decode,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub const fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            GatewayErrorKind::Transport => "gateway.transport",
            GatewayErrorKind::NotFound => "gateway.not_found",
            GatewayErrorKind::Status => "gateway.status",
            GatewayErrorKind::Decode => "gateway.decode",
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for GatewayError {}

/// Reachability of the backend root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub reachable: bool,
    pub status: Option<u16>,
    pub message: String,
    pub latency_ms: u64,
}

/// Read-only access to the stock backend.
pub trait BackendGateway: Send + Sync {
    /// Lists every instrument the backend knows about.
    fn list_stocks<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockListing>, GatewayError>> + Send + 'a>>;

    /// Fetches the price records of one instrument, in backend order.
    fn price_history<'a>(
        &'a self,
        instrument: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, GatewayError>> + Send + 'a>>;

    /// Fetches the backend's strategy report for one instrument.
    fn strategy_performance<'a>(
        &'a self,
        instrument: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PerformanceReport, GatewayError>> + Send + 'a>>;

    /// Probes the backend root. Never fails; unreachability is part of the status.
    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>>;
}

#[derive(Debug, Deserialize)]
struct StockDataPayload {
    #[serde(default)]
    data: Option<Vec<WirePriceRow>>,
}

#[derive(Debug, Deserialize)]
struct WirePriceRow {
    #[serde(default)]
    id: Option<i64>,
    datetime: UtcDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: serde_json::Value,
}

/// Gateway speaking to the backend over HTTP.
#[derive(Clone)]
pub struct HttpBackendGateway {
    config: GatewayConfig,
    http_client: Arc<dyn HttpClient>,
}

impl HttpBackendGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: GatewayConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn fetch(&self, path: &str) -> Result<HttpResponse, GatewayError> {
        let url = self.config.endpoint(path);
        let request = HttpRequest::get(url.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        let started = Instant::now();
        debug!(%url, "requesting backend");

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(%url, error = error.message(), "backend request failed");
            GatewayError::transport(
                format!("backend request failed: {}", error.message()),
                error.retryable(),
            )
        })?;

        debug!(
            %url,
            status = response.status,
            latency_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.fetch(path).await?;
        if !response.is_success() {
            let error = status_error(&response);
            warn!(status = response.status, detail = error.message(), "backend rejected request");
            return Err(error);
        }
        decode_body(&response.body)
    }
}

impl BackendGateway for HttpBackendGateway {
    fn list_stocks<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StockListing>, GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self.fetch("get-all-stocks").await?;

            // The backend reports an empty table as 404 "No stocks found".
            if response.status == 404 {
                debug!("backend has no stocks listed");
                return Ok(Vec::new());
            }
            if !response.is_success() {
                return Err(status_error(&response));
            }

            decode_body(&response.body)
        })
    }

    fn price_history<'a>(
        &'a self,
        instrument: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let path = format!(
                "get-stock-data?instrument={}",
                urlencoding::encode(instrument.as_str())
            );
            let payload: StockDataPayload = self.fetch_json(&path).await?;

            let records = payload
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|row| normalize_row(instrument, row))
                .collect::<Vec<_>>();

            debug!(%instrument, records = records.len(), "price history loaded");
            Ok(PriceHistory::new(instrument.clone(), records))
        })
    }

    fn strategy_performance<'a>(
        &'a self,
        instrument: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<PerformanceReport, GatewayError>> + Send + 'a>> {
        Box::pin(async move {
            let path = format!(
                "strategy/performance?instrument={}",
                urlencoding::encode(instrument.as_str())
            );
            self.fetch_json(&path).await
        })
    }

    fn health<'a>(&'a self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + 'a>> {
        Box::pin(async move {
            let started = Instant::now();
            let outcome = self.fetch("").await;
            let latency_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(response) => HealthStatus {
                    reachable: response.is_success(),
                    status: Some(response.status),
                    message: health_message(&response.body),
                    latency_ms,
                },
                Err(error) => HealthStatus {
                    reachable: false,
                    status: None,
                    message: error.message().to_owned(),
                    latency_ms,
                },
            }
        })
    }
}

fn normalize_row(instrument: &Symbol, row: WirePriceRow) -> PriceRecord {
    let record = PriceRecord::new(
        instrument.as_str(),
        row.open,
        row.high,
        row.low,
        row.close,
        row.volume,
        row.datetime,
    );

    match row.id {
        Some(id) => record.with_id(id),
        None => record,
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body)
        .map_err(|error| GatewayError::decode(format!("unexpected backend payload: {error}")))
}

fn status_error(response: &HttpResponse) -> GatewayError {
    let detail = serde_json::from_str::<ErrorPayload>(&response.body)
        .ok()
        .map(|payload| match payload.detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });

    GatewayError::status(
        response.status,
        detail.unwrap_or_else(|| format!("backend returned status {}", response.status)),
    )
}

/// Root answers either a bare JSON string or `{"message": ...}`.
fn health_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => text,
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| body.trim().to_owned()),
        _ => body.trim().to_owned(),
    }
}
