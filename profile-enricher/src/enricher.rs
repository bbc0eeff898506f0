//! Enricher - five independent checks per identity, joined into one record.
//!
//! The checks run concurrently and the record is assembled only after all of
//! them settle. Only the liveness and valid-proof checks touch the network, and
//! both degrade to a default instead of failing the record:
//!
//! | Check        | On adapter failure            |
//! |--------------|-------------------------------|
//! | liveness     | `expired = false` (optimistic) |
//! | valid proofs | `validProofs = 0` (pessimistic) |
//!
//! Degraded checks are reported through `CheckDiagnostics`, never through the
//! record itself, so the output schema stays fixed.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{EnricherConfig, ProofServices};
use crate::oracle::{LivenessOracle, NamingServiceOracle};
use crate::types::{EnrichmentRecord, Profile};
use crate::verifier::{HttpProofVerifier, ProofVerifier};

/// How a networked check concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    /// Adapter answered and its answer was used
    Ok,
    /// Check did not need the adapter (no eligible claims)
    Skipped,
    /// Adapter failed; the default value was used
    Defaulted { reason: String },
}

impl CheckStatus {
    fn defaulted(reason: impl ToString) -> Self {
        Self::Defaulted {
            reason: reason.to_string(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted { .. })
    }
}

/// Per-check outcome for the two networked checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDiagnostics {
    pub liveness: CheckStatus,
    pub valid_proofs: CheckStatus,
}

impl CheckDiagnostics {
    /// Whether any check fell back to its default
    pub fn is_degraded(&self) -> bool {
        self.liveness.is_defaulted() || self.valid_proofs.is_defaulted()
    }
}

/// A record together with how its networked checks went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub record: EnrichmentRecord,
    pub diagnostics: CheckDiagnostics,
}

/// Produces one enrichment record per identity.
///
/// Adapters are shared read-only, so one `Enricher` serves any number of
/// concurrent `enrich` calls.
pub struct Enricher {
    oracle: Arc<dyn LivenessOracle>,
    verifier: Arc<dyn ProofVerifier>,
    services: ProofServices,
}

impl Enricher {
    /// Create an enricher over the given adapters with the default
    /// recognized service set.
    pub fn new(oracle: Arc<dyn LivenessOracle>, verifier: Arc<dyn ProofVerifier>) -> Self {
        Self {
            oracle,
            verifier,
            services: ProofServices::default(),
        }
    }

    /// Create an enricher backed by the HTTP naming service and proof pages.
    pub fn from_config(config: &EnricherConfig) -> Self {
        Self::new(
            Arc::new(NamingServiceOracle::from_config(config)),
            Arc::new(HttpProofVerifier::from_config(config)),
        )
        .with_services(config.proof_services.clone())
    }

    /// Set the recognized social services.
    pub fn with_services(mut self, services: ProofServices) -> Self {
        self.services = services;
        self
    }

    /// Enrich one identity.
    pub async fn enrich(
        &self,
        name: &str,
        address: &str,
        profile: Option<&Profile>,
    ) -> EnrichmentRecord {
        self.enrich_with_diagnostics(name, address, profile)
            .await
            .record
    }

    /// Enrich one identity, keeping the per-check diagnostics.
    pub async fn enrich_with_diagnostics(
        &self,
        name: &str,
        address: &str,
        profile: Option<&Profile>,
    ) -> Enrichment {
        let (liveness, num_proofs, valid_proofs, apps, app_list) = tokio::join!(
            self.check_expired(name),
            async { profile.map_or(0, |p| p.accounts().len()) },
            self.check_valid_proofs(name, address, profile),
            async { profile.map_or(0, Profile::app_count) },
            async { profile.map(Profile::app_ids).unwrap_or_default() },
        );

        let (expired, liveness) = liveness;
        let (valid_proofs, valid_proofs_status) = valid_proofs;

        let record = EnrichmentRecord {
            name: name.to_string(),
            address: address.to_string(),
            expired,
            num_proofs,
            // A verifier may report more results than declared claims
            valid_proofs: valid_proofs.min(num_proofs),
            apps,
            app_list,
        };

        debug!(
            name = %record.name,
            expired = record.expired,
            num_proofs = record.num_proofs,
            valid_proofs = record.valid_proofs,
            apps = record.apps,
            "Profile enriched"
        );

        Enrichment {
            record,
            diagnostics: CheckDiagnostics {
                liveness,
                valid_proofs: valid_proofs_status,
            },
        }
    }

    async fn check_expired(&self, name: &str) -> (bool, CheckStatus) {
        match self.oracle.lookup(name).await {
            Ok(status) => (status.is_expired(), CheckStatus::Ok),
            Err(e) => {
                warn!(name = %name, error = %e, "Liveness lookup failed, treating name as live");
                (false, CheckStatus::defaulted(e))
            }
        }
    }

    async fn check_valid_proofs(
        &self,
        name: &str,
        address: &str,
        profile: Option<&Profile>,
    ) -> (usize, CheckStatus) {
        let Some(profile) = profile.filter(|p| self.services.any_claimed(p)) else {
            return (0, CheckStatus::Skipped);
        };

        match self.verifier.validate_proofs(profile, address, name).await {
            Ok(results) => (results.iter().filter(|r| r.valid).count(), CheckStatus::Ok),
            Err(e) => {
                warn!(
                    name = %name,
                    error = %e,
                    "Proof verification failed, counting no valid proofs"
                );
                (0, CheckStatus::defaulted(e))
            }
        }
    }
}
