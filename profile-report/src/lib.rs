//! Profile Report - statistics over enrichment batches
//!
//! Loads every batch file from a directory, keeps the latest record per name,
//! and summarizes proof coverage, app installs and public app popularity.

pub mod aggregate;
pub mod config;
pub mod loader;
pub mod render;

pub use aggregate::{is_loopback_app, Aggregation, AppUsage, Summary};
pub use config::Args;
pub use loader::{load_batches, ReportError};
pub use render::render_report;
