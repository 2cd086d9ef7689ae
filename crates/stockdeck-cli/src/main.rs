mod cli;
mod commands;
mod error;
mod format;
mod output;
mod routes;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{CliError, GATEWAY_FAILURE_EXIT_CODE};

const LOG_FILTER_ENV: &str = "STOCKDECK_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

/// Logs go to stderr so stdout stays parseable in `--format json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let page = commands::run(&cli).await?;
    output::render(&page, cli.format, cli.pretty)?;

    if !page.envelope.errors.is_empty() {
        return Ok(ExitCode::from(GATEWAY_FAILURE_EXIT_CODE));
    }

    Ok(ExitCode::SUCCESS)
}
