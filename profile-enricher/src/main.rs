//! check-profiles - enrich a batch of identity profiles
//!
//! Usage:
//!   check-profiles < profiles.json > batch-0001.json
//!
//! Environment variables:
//!   NAMING_SERVICE_URL - naming service base URL (default: http://localhost:6270)
//!   REQUEST_TIMEOUT_MS - per-request timeout in milliseconds (default: 30000)
//!   PROOF_SERVICES - comma-separated social services to verify
//!   LOG_LEVEL - log level when RUST_LOG is unset (default: info)
//!
//! Logs go to stderr; stdout carries only the JSON array of records.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profile_enricher::{Args, BatchDriver, Enricher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let document = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch from {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read batch from stdin")?,
    };

    let config = args.enricher_config();
    info!(naming_service = %config.naming_service_url, "Starting profile checks");

    let driver = BatchDriver::new(Enricher::from_config(&config));
    let report = driver
        .run_document(&document)
        .await
        .context("Refusing to enrich batch")?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, &report.records).context("Failed to write records")?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
