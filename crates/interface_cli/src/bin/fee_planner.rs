//! Fee Planner - command-line binary
//!
//! Plans the installments for one enrollment request.
//!
//! # Usage
//!
//! ```bash
//! # Plan a request stored in a file
//! cargo run --bin fee-planner -- request.json
//!
//! # Or pipe it in
//! cat request.json | FEES_DUE_DAY=5 cargo run --bin fee-planner
//! ```
//!
//! # Environment Variables
//!
//! * `FEES_CURRENCY` - Billing currency code (default: PKR)
//! * `FEES_DUE_DAY` - Day of the month installments fall due, 1-28 (default: 10)
//! * `FEES_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use interface_cli::{config::PlannerConfig, error::CliError, plan_document};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_code(&CliError::Config(e));
        }
    };

    init_tracing(&config.log_level);

    match run(&config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Planning failed");
            eprintln!("error: {e:#}");
            match e.downcast_ref::<CliError>() {
                Some(cli) => exit_code(cli),
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Reads the request from the first argument or stdin and plans it
fn run(config: &PlannerConfig) -> anyhow::Result<String> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading request from {path}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading request from stdin")?;
            buffer
        }
    };

    tracing::info!(
        currency = %config.currency,
        due_day = config.due_day,
        "Planning enrollment request"
    );

    Ok(plan_document(&input, config)?)
}

/// Initializes the tracing subscriber, writing to stderr so stdout stays JSON.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn exit_code(error: &CliError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}
