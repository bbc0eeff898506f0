//! Profile Enricher - liveness and social-proof annotation of identity profiles
//!
//! Takes a batch of `(name, address, profile)` triples and produces one
//! enrichment record per triple:
//! - Whether the name has lapsed in the naming service
//! - How many social proofs the profile declares, and how many validate
//! - Which applications the profile has installed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              BatchDriver                │
//! │   (one enrich per triple, join_all)     │
//! └────────────────┬────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │               Enricher                  │
//! │  (five checks, tokio::join! barrier)    │
//! └────────┬───────────────────────┬────────┘
//!          ▼                       ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ LivenessOracle  │     │  ProofVerifier  │
//! │ (naming service)│     │ (proof pages)   │
//! └─────────────────┘     └─────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod enricher;
pub mod oracle;
pub mod types;
pub mod verifier;

// Re-export main types for convenience
pub use config::{Args, EnricherConfig, ProofServices};
pub use driver::{parse_batch, BatchDriver, BatchError, BatchReport};
pub use enricher::{CheckDiagnostics, CheckStatus, Enricher, Enrichment};
pub use oracle::{LivenessOracle, NameStatus, NamingServiceOracle, OracleError};
pub use types::{EnrichmentRecord, IdentityTriple, Profile, ProofResult};
pub use verifier::{HttpProofVerifier, ProofVerifier, VerifierError};
