//! Liveness oracles.
//!
//! Answers "is this name still registered?" for the enricher.
//!
//! - `NamingServiceOracle`: HTTP lookup against a naming service node
//! - `MockOracle`: configurable in-memory oracle for tests

pub mod mock;
pub mod naming;
pub mod traits;

pub use mock::MockOracle;
pub use naming::NamingServiceOracle;
pub use traits::{LivenessOracle, NameStatus, OracleError};
