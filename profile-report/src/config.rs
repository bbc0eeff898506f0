//! CLI arguments for the report binary.

use clap::Parser;
use std::path::PathBuf;

/// Summarize enrichment batches
#[derive(Parser, Debug, Clone)]
#[command(name = "profile-report")]
#[command(about = "Summarize enrichment batches into user and app usage statistics")]
#[command(version)]
pub struct Args {
    /// Directory holding enrichment batch files (read non-recursively)
    pub dir: PathBuf,

    /// Number of ranked apps to print
    #[arg(long, env = "REPORT_TOP", default_value = "10")]
    pub top: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}
