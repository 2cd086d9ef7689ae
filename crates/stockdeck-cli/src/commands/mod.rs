mod health;
mod home;
mod performance;
mod stock;
mod stocks;

use std::time::Instant;

use serde_json::Value;
use stockdeck_core::{
    Envelope, EnvelopeError, EnvelopeMeta, GatewayConfig, GatewayError, HttpBackendGateway, Symbol,
};
use tracing::debug;
use uuid::Uuid;

use crate::cli::{Cli, Command, RecordOrder};
use crate::error::CliError;
use crate::output::PageOutput;
use crate::routes::Route;

const SCHEMA_VERSION: &str = "v1.0.0";

/// What a command produced, before envelope metadata is attached.
pub struct CommandResult {
    pub route: String,
    pub data: Value,
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(route: impl Into<String>, data: Value, lines: Vec<String>) -> Self {
        Self {
            route: route.into(),
            data,
            lines,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_error(mut self, error: &GatewayError) -> Self {
        self.errors.push(EnvelopeError::from(error));
        self
    }
}

pub async fn run(cli: &Cli) -> Result<PageOutput, CliError> {
    let gateway = HttpBackendGateway::new(gateway_config(cli)?);
    debug!(backend = gateway.config().base_url(), "gateway configured");

    let started = Instant::now();
    let result = match &cli.command {
        Command::Home => home::run()?,
        Command::Stocks => stocks::run(&gateway).await?,
        Command::Stock(args) => {
            let instrument = Symbol::parse(&args.instrument)?;
            stock::run(&gateway, instrument, args.sort).await?
        }
        Command::Performance(args) => {
            let instrument = Symbol::parse(&args.instrument)?;
            performance::run(&gateway, &instrument).await?
        }
        Command::Open(args) => match args.path.parse::<Route>()? {
            Route::Home => home::run()?,
            Route::Stocks => stocks::run(&gateway).await?,
            Route::StockData(instrument) => {
                stock::run(&gateway, instrument, RecordOrder::Backend).await?
            }
        },
        Command::Health => health::run(&gateway).await?,
    };
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let CommandResult {
        route,
        data,
        lines,
        warnings,
        errors,
    } = result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        route,
        latency_ms,
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(PageOutput { envelope, lines })
}

/// Environment first, then explicit flags.
fn gateway_config(cli: &Cli) -> Result<GatewayConfig, CliError> {
    let mut config = GatewayConfig::from_env()?;

    if let Some(base_url) = &cli.backend_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }

    Ok(config)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use stockdeck_core::{FixtureHttpClient, GatewayConfig, HttpBackendGateway};

    pub const BASE: &str = "http://backend.test";

    pub fn gateway(client: FixtureHttpClient) -> HttpBackendGateway {
        let config = GatewayConfig::new(BASE, 1_000).expect("valid config");
        HttpBackendGateway::with_http_client(config, Arc::new(client))
    }
}
