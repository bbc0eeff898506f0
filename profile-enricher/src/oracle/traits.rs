//! Core trait for liveness lookups.

use async_trait::async_trait;

/// Error types for liveness lookups.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Name cannot be looked up at all
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Naming service URL is unusable
    #[error("Invalid naming service URL: {0}")]
    InvalidUrl(String),

    /// Transport failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Naming service answered with something other than found / not found
    #[error("Unexpected naming service status: {0}")]
    UnexpectedStatus(u16),
}

/// Registration state of a name at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStatus {
    /// Name resolves in the naming service
    Registered,
    /// Naming service reports the name as not found (lapsed)
    NotFound,
}

impl NameStatus {
    pub fn is_expired(self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Core trait for liveness oracles.
///
/// Implementations must be safe to call concurrently; the batch driver fans
/// out one lookup per name without any cap.
#[async_trait]
pub trait LivenessOracle: Send + Sync {
    /// Look up the registration state of a fully-qualified name.
    async fn lookup(&self, name: &str) -> Result<NameStatus, OracleError>;
}
