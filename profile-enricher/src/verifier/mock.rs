//! Mock proof verifier for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::traits::*;
use crate::types::{Profile, ProofResult};

/// Mock verifier for testing.
///
/// Returns the same canned results for every profile.
pub struct MockVerifier {
    results: Vec<ProofResult>,
    available: AtomicBool,
    call_count: AtomicU32,
}

impl MockVerifier {
    /// Create a mock that returns no proof results.
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            available: AtomicBool::new(true),
            call_count: AtomicU32::new(0),
        }
    }

    /// Add a canned result for `service`.
    pub fn with_result(mut self, service: impl Into<String>, valid: bool) -> Self {
        self.results.push(ProofResult {
            service: service.into(),
            identifier: None,
            proof_url: None,
            valid,
        });
        self
    }

    /// Set availability. An unavailable verifier fails every call.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Get the number of times validate_proofs was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProofVerifier for MockVerifier {
    async fn validate_proofs(
        &self,
        _profile: &Profile,
        _address: &str,
        _name: &str,
    ) -> Result<Vec<ProofResult>, VerifierError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.available.load(Ordering::SeqCst) {
            return Err(VerifierError::Unavailable(
                "Mock verifier disabled".to_string(),
            ));
        }

        Ok(self.results.clone())
    }
}
