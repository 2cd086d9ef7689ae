//! Per-view fetch state.
//!
//! Every page owns its own [`ViewState`]; nothing is shared between views.
//!
//! ```text
//!   Idle ──begin_load──▶ Loading ──resolve(Ok)──▶ Ready(T)
//!                          ▲   └──resolve(Err)──▶ Failed(GatewayError)
//!                          └──────── refresh ◀──────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::gateway::{BackendGateway, GatewayError};
use crate::stats::{StatisticsSummary, StatsError, SummaryMemo};
use crate::{PriceHistory, StockListing, Symbol};

/// Fetch lifecycle of one view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(GatewayError),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ViewState<T> {
    /// Enters `Loading` from any state, dropping previous data or error.
    pub fn begin_load(&mut self) {
        *self = Self::Loading;
    }

    /// Settles a pending load. Returns `false` and leaves the state untouched
    /// when no load is pending.
    pub fn resolve(&mut self, outcome: Result<T, GatewayError>) -> bool {
        if !self.is_loading() {
            return false;
        }

        *self = match outcome {
            Ok(data) => Self::Ready(data),
            Err(error) => Self::Failed(error),
        };
        true
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&GatewayError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// The stock list page.
#[derive(Debug, Default)]
pub struct StockDirectoryView {
    state: ViewState<Vec<StockListing>>,
}

impl StockDirectoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<StockListing>> {
        &self.state
    }

    /// Fetch-on-mount. Also used by the refresh action.
    pub async fn load<G>(&mut self, gateway: &G) -> &ViewState<Vec<StockListing>>
    where
        G: BackendGateway + ?Sized,
    {
        self.state.begin_load();
        let outcome = gateway.list_stocks().await;
        if let Err(error) = &outcome {
            warn!(code = error.code(), "stock directory failed to load");
        }
        self.state.resolve(outcome);
        &self.state
    }

    pub async fn refresh<G>(&mut self, gateway: &G) -> &ViewState<Vec<StockListing>>
    where
        G: BackendGateway + ?Sized,
    {
        self.load(gateway).await
    }
}

/// The per-instrument price history page.
///
/// The summary is memoized per fetched history, so rendering never reruns
/// the statistics engine.
#[derive(Debug)]
pub struct PriceHistoryView {
    instrument: Symbol,
    state: ViewState<Arc<PriceHistory>>,
    memo: SummaryMemo,
}

impl PriceHistoryView {
    pub fn new(instrument: Symbol) -> Self {
        Self {
            instrument,
            state: ViewState::Idle,
            memo: SummaryMemo::new(),
        }
    }

    pub fn instrument(&self) -> &Symbol {
        &self.instrument
    }

    pub fn state(&self) -> &ViewState<Arc<PriceHistory>> {
        &self.state
    }

    pub async fn load<G>(&mut self, gateway: &G) -> &ViewState<Arc<PriceHistory>>
    where
        G: BackendGateway + ?Sized,
    {
        self.state.begin_load();
        self.memo.clear();

        let outcome = gateway.price_history(&self.instrument).await.map(Arc::new);
        match &outcome {
            Ok(history) => {
                debug!(instrument = %self.instrument, records = history.len(), "price history ready");
            }
            Err(error) => {
                warn!(instrument = %self.instrument, code = error.code(), "price history failed to load");
            }
        }

        self.state.resolve(outcome);
        &self.state
    }

    pub async fn refresh<G>(&mut self, gateway: &G) -> &ViewState<Arc<PriceHistory>>
    where
        G: BackendGateway + ?Sized,
    {
        self.load(gateway).await
    }

    /// Summary of the loaded history; `None` unless the view is ready.
    ///
    /// The first call after a fetch runs the engine; later calls reuse it.
    pub fn summary(&mut self) -> Option<Result<StatisticsSummary, StatsError>> {
        let history = self.state.data()?;
        Some(self.memo.get_or_compute(history))
    }

    /// How many times the statistics engine ran for this view.
    pub fn summary_computations(&self) -> usize {
        self.memo.computations()
    }
}
