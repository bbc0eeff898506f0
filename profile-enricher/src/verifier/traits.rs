//! Core trait for social proof verification.

use async_trait::async_trait;

use crate::types::{Profile, ProofResult};

/// Error types for proof verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    /// Profile document cannot be verified at all
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Transport failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Verifier is switched off or unreachable
    #[error("Verifier unavailable: {0}")]
    Unavailable(String),
}

/// Core trait for proof verifiers.
///
/// Returns one result per declared claim the verifier attempted; a result's
/// `valid` flag says whether the claim checked out for `name` / `address`.
#[async_trait]
pub trait ProofVerifier: Send + Sync {
    async fn validate_proofs(
        &self,
        profile: &Profile,
        address: &str,
        name: &str,
    ) -> Result<Vec<ProofResult>, VerifierError>;
}
