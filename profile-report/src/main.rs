//! profile-report - summarize a directory of enrichment batches
//!
//! Usage:
//!   profile-report /path/to/analysis/data
//!
//! Prints the summary, then one line with the JSON array of public app
//! identifiers.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use profile_report::{load_batches, render_report, Aggregation, Args};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("profile_report={}", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let records = load_batches(&args.dir)
        .with_context(|| format!("Failed to load batches from {}", args.dir.display()))?;

    let summary = Aggregation::from_records(records).summarize();

    println!("{}", render_report(&summary, args.top));
    println!(
        "{}",
        serde_json::to_string(&summary.public_apps).context("Failed to encode public apps")?
    );

    Ok(())
}
