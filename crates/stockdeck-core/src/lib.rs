//! # Stockdeck Core
//!
//! Library side of the stockdeck client: the backend gateway, the domain
//! types it decodes into, per-view fetch state, and the statistics shown on
//! the price history page.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Gateway configuration from the environment |
//! | [`domain`] | Listings, price records, histories, timestamps |
//! | [`envelope`] | JSON output envelope with metadata |
//! | [`error`] | Input and contract validation errors |
//! | [`gateway`] | Backend gateway trait and HTTP implementation |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`stats`] | Highest/lowest price, average volume, percent change |
//! | [`view`] | `Idle / Loading / Ready / Failed` state per page |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockdeck_core::{GatewayConfig, HttpBackendGateway, PriceHistoryView, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpBackendGateway::new(GatewayConfig::from_env()?);
//!     let mut view = PriceHistoryView::new(Symbol::parse("HINDALCO")?);
//!     view.load(&gateway).await;
//!
//!     if let Some(Ok(summary)) = view.summary() {
//!         println!("high {:.2} at {}", summary.highest_price.value, summary.highest_price.occurred_at);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI pages      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Views          │────▶│ Statistics       │
//! │  (ViewState)    │     │ (pure, memoized) │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ BackendGateway  │────▶│ HTTP Client      │
//! │                 │     │ (reqwest/fixture)│
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http_client;
pub mod stats;
pub mod view;

pub use config::GatewayConfig;

pub use domain::{
    BestBuySell, PerformanceReport, PriceHistory, PriceRecord, StockListing, Symbol, UtcDateTime,
};

pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};

pub use error::ValidationError;

pub use gateway::{BackendGateway, GatewayError, GatewayErrorKind, HealthStatus, HttpBackendGateway};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

#[cfg(any(test, feature = "test-support"))]
pub use http_client::FixtureHttpClient;

pub use stats::{
    compute_summary, PriceChange, PriceExtreme, StatisticsSummary, StatsError, SummaryMemo,
};

pub use view::{PriceHistoryView, StockDirectoryView, ViewState};
