//! Configuration for the enrichment stage
//!
//! CLI arguments and environment variable handling using clap, plus the
//! library-side `EnricherConfig` the HTTP adapters are built from.

use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::Profile;

/// Default naming service endpoint (local node API)
pub const DEFAULT_NAMING_SERVICE_URL: &str = "http://localhost:6270";

/// Social services whose proofs the verifier knows how to check
pub const DEFAULT_PROOF_SERVICES: [&str; 5] =
    ["twitter", "facebook", "hackernews", "instagram", "github"];

/// Check identity profiles for liveness, social proofs and installed apps
///
/// Reads a JSON array of `{name, address, profile}` objects and writes a JSON
/// array of enrichment records to stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "check-profiles")]
#[command(about = "Enrich identity profiles with liveness and social-proof checks")]
#[command(version)]
pub struct Args {
    /// Naming service base URL (names are looked up at /v1/names/<name>)
    #[arg(long, env = "NAMING_SERVICE_URL", default_value = DEFAULT_NAMING_SERVICE_URL)]
    pub naming_url: String,

    /// Timeout for each naming service or proof page request, in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Comma-separated list of social services to verify proofs for
    /// (defaults to twitter,facebook,hackernews,instagram,github)
    #[arg(long, env = "PROOF_SERVICES")]
    pub proof_services: Option<String>,

    /// Read the batch from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Build the library configuration from parsed arguments
    pub fn enricher_config(&self) -> EnricherConfig {
        let proof_services = self
            .proof_services
            .as_deref()
            .map(ProofServices::parse_list)
            .unwrap_or_default();

        EnricherConfig {
            naming_service_url: self.naming_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            proof_services,
            ..EnricherConfig::default()
        }
    }

    /// Log filter used when RUST_LOG is unset. Covers the library and the
    /// `check-profiles` binary itself.
    pub fn default_log_filter(&self) -> String {
        format!(
            "profile_enricher={level},check_profiles={level},warn",
            level = self.log_level
        )
    }
}

/// Settings for the default HTTP-backed adapters
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    /// Naming service base URL
    pub naming_service_url: String,
    /// Timeout for HTTP requests (default: 30 seconds)
    pub request_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
    /// Services eligible for proof verification
    pub proof_services: ProofServices,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self {
            naming_service_url: DEFAULT_NAMING_SERVICE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("check-profiles/{}", env!("CARGO_PKG_VERSION")),
            proof_services: ProofServices::default(),
        }
    }
}

impl EnricherConfig {
    /// Shared HTTP client for both adapters
    pub fn http_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .unwrap_or_default()
    }
}

/// Immutable set of recognized social services, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofServices(BTreeSet<String>);

impl ProofServices {
    pub fn new<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            services
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list such as `twitter, GitHub`
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Case-insensitive membership test
    pub fn recognizes(&self, service: &str) -> bool {
        self.0.contains(&service.to_lowercase())
    }

    /// Whether any claim in the profile names a recognized service
    pub fn any_claimed(&self, profile: &Profile) -> bool {
        profile.claimed_services().any(|s| self.recognizes(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ProofServices {
    fn default() -> Self {
        Self::new(DEFAULT_PROOF_SERVICES)
    }
}
