//! Batch driver - runs the enricher over a whole batch.
//!
//! The batch document must parse completely before any enrichment starts.
//! Every triple is then enriched concurrently, and the records come back in
//! input order once all of them have completed.

use futures::future::join_all;
use std::time::Instant;
use tracing::{info, warn};

use crate::enricher::{Enricher, Enrichment};
use crate::types::{EnrichmentRecord, IdentityTriple};

/// Errors that abort a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Malformed batch document: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// Parse a batch document: a JSON array of `{name, address, profile}`.
pub fn parse_batch(document: &str) -> Result<Vec<IdentityTriple>, BatchError> {
    Ok(serde_json::from_str(document)?)
}

/// Output of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// One record per input triple, in input order
    pub records: Vec<EnrichmentRecord>,
    /// Number of records where a check fell back to its default
    pub degraded: usize,
}

impl BatchReport {
    fn from_enrichments(enrichments: Vec<Enrichment>) -> Self {
        let degraded = enrichments
            .iter()
            .filter(|e| e.diagnostics.is_degraded())
            .count();

        Self {
            records: enrichments.into_iter().map(|e| e.record).collect(),
            degraded,
        }
    }
}

/// Applies an `Enricher` to every triple of a batch.
pub struct BatchDriver {
    enricher: Enricher,
}

impl BatchDriver {
    pub fn new(enricher: Enricher) -> Self {
        Self { enricher }
    }

    /// Enrich every triple concurrently.
    pub async fn run(&self, triples: &[IdentityTriple]) -> BatchReport {
        info!(count = triples.len(), "Enriching batch");
        let started = Instant::now();

        let enrichments = join_all(triples.iter().map(|triple| {
            self.enricher
                .enrich_with_diagnostics(&triple.name, &triple.address, triple.profile.as_ref())
        }))
        .await;

        let report = BatchReport::from_enrichments(enrichments);
        if report.degraded > 0 {
            warn!(
                degraded = report.degraded,
                total = report.records.len(),
                "Some records used default values for failed checks"
            );
        }
        info!(
            count = report.records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch enriched"
        );

        report
    }

    /// Parse a batch document and enrich it.
    pub async fn run_document(&self, document: &str) -> Result<BatchReport, BatchError> {
        let triples = parse_batch(document)?;
        Ok(self.run(&triples).await)
    }
}
