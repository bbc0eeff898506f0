//! Social proof verifiers.
//!
//! - `HttpProofVerifier`: fetches each claim's proof page and looks for a
//!   proof statement naming the identity or its address
//! - `MockVerifier`: canned results for tests

pub mod http;
pub mod mock;
pub mod traits;

pub use http::HttpProofVerifier;
pub use mock::MockVerifier;
pub use traits::{ProofVerifier, VerifierError};
