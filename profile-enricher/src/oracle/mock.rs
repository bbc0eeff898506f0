//! Mock liveness oracle for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use super::traits::*;

/// Mock oracle for testing.
///
/// Every name is registered unless marked not-found or failing.
#[derive(Default)]
pub struct MockOracle {
    not_found: HashSet<String>,
    failing: HashSet<String>,
    call_count: AtomicU32,
}

impl MockOracle {
    /// Create a mock where every name is registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `name` as not found.
    pub fn with_not_found(mut self, name: impl Into<String>) -> Self {
        self.not_found.insert(name.into());
        self
    }

    /// Fail lookups of `name` with a network error.
    pub fn with_failure(mut self, name: impl Into<String>) -> Self {
        self.failing.insert(name.into());
        self
    }

    /// Get the number of times lookup was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LivenessOracle for MockOracle {
    async fn lookup(&self, name: &str) -> Result<NameStatus, OracleError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(name) {
            return Err(OracleError::NetworkError(format!(
                "mock lookup of {name} failed"
            )));
        }

        if self.not_found.contains(name) {
            Ok(NameStatus::NotFound)
        } else {
            Ok(NameStatus::Registered)
        }
    }
}
