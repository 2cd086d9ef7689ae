//! CLI argument definitions for stockdeck.
//!
//! Each page of the client is a command; `open` takes a client path instead.
//!
//! | Command | Route | Description |
//! |---------|-------|-------------|
//! | `home` | `/` | Landing page |
//! | `stocks` | `/stocks` | Stock list |
//! | `stock <INSTRUMENT>` | `/stocks-data/<INSTRUMENT>` | Price history with statistics |
//! | `performance <INSTRUMENT>` | | Backend strategy report |
//! | `open <PATH>` | any | Render the page routed at `PATH` |
//! | `health` | | Probe the backend |
//!
//! # Examples
//!
//! ```bash
//! stockdeck stocks
//! stockdeck stock HINDALCO --format json --pretty
//! stockdeck open /stocks-data/TATASTEEL
//! STOCKDECK_BACKEND_URL=https://api.example.com stockdeck health
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use stockdeck_core::config::{BACKEND_URL_ENV, TIMEOUT_MS_ENV};

/// Stock listings and price history from the stockdeck backend.
#[derive(Debug, Parser)]
#[command(
    name = "stockdeck",
    author,
    version,
    about = "Stock listings and price history in the terminal",
    long_about = "stockdeck reads the stock directory and per-instrument price history \
from the backend and renders them as pages, with highest/lowest price, average volume \
and first-to-last price change for each instrument.\n\
\n\
Use 'stockdeck <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for pages.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Backend base URL (overrides the environment).
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    pub backend_url: Option<String>,

    /// Request timeout in milliseconds (overrides the environment).
    #[arg(long, global = true, env = TIMEOUT_MS_ENV)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable page.
    Table,
    /// JSON envelope with metadata.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Landing page.
    Home,

    /// List every instrument the backend knows about.
    Stocks,

    /// Price history and statistics for one instrument.
    ///
    ///   stockdeck stock HINDALCO
    ///   stockdeck stock tatasteel --sort oldest-first
    #[command(alias = "stock-data")]
    Stock(StockArgs),

    /// Strategy report (moving average, best buy/sell) for one instrument.
    Performance(InstrumentArgs),

    /// Render the page routed at a client path.
    ///
    ///   stockdeck open /
    ///   stockdeck open /stocks-data/HINDALCO
    Open(OpenArgs),

    /// Check that the backend is reachable.
    Health,
}

/// Arguments naming one instrument.
#[derive(Debug, Args)]
pub struct InstrumentArgs {
    /// Instrument identifier (e.g., HINDALCO, TATASTEEL).
    pub instrument: String,
}

/// Arguments for the `stock` command.
#[derive(Debug, Args)]
pub struct StockArgs {
    /// Instrument identifier (e.g., HINDALCO, TATASTEEL).
    pub instrument: String,

    /// Record order used for the table and for "first"/"last" in the price change.
    #[arg(long, value_enum, default_value_t = RecordOrder::Backend)]
    pub sort: RecordOrder,
}

/// Ordering applied to a fetched history before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordOrder {
    /// Keep the order the backend returned.
    Backend,
    /// Oldest record first.
    OldestFirst,
    /// Newest record first.
    NewestFirst,
}

/// Arguments for the `open` command.
#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Client path, e.g. `/stocks` or `/stocks-data/HINDALCO`.
    pub path: String,
}
