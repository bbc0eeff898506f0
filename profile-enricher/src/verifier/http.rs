//! HTTP proof page verifier.
//!
//! Each recognized claim carries a `proofUrl` pointing at a public post
//! (tweet, gist, profile page). The claim is valid when that page contains a
//! proof statement for the identity name or for the owning address:
//!
//! - `Verifying that "bob.id" is my Blockstack ID.`
//! - `Verifying my Blockstack ID is secured with the address 1Addr`
//! - `Verifying myself: My Bitcoin username is +bob` (legacy `.id` names)
//!
//! Claims are fetched concurrently. A claim whose page cannot be fetched is
//! reported invalid rather than failing the whole profile.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use super::traits::*;
use crate::config::{EnricherConfig, ProofServices};
use crate::types::{Profile, ProofResult};

/// Verifies proofs by fetching their proof pages.
pub struct HttpProofVerifier {
    client: Client,
    services: ProofServices,
}

/// A declared claim the verifier will check.
struct Claim {
    service: String,
    identifier: Option<String>,
    proof_url: Option<String>,
}

impl Claim {
    fn from_value(value: &Value) -> Option<Self> {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            service: field("service")?,
            identifier: field("identifier"),
            proof_url: field("proofUrl"),
        })
    }
}

impl HttpProofVerifier {
    pub fn new(client: Client, services: ProofServices) -> Self {
        Self { client, services }
    }

    /// Create a verifier from enricher configuration.
    pub fn from_config(config: &EnricherConfig) -> Self {
        Self::new(config.http_client(), config.proof_services.clone())
    }

    async fn check_claim(&self, claim: Claim, address: &str, name: &str) -> ProofResult {
        let valid = match claim.proof_url.as_deref() {
            Some(url) => match self.fetch_proof(url).await {
                Ok(text) => contains_proof_statement(&text, name, address),
                Err(e) => {
                    debug!(
                        name = %name,
                        service = %claim.service,
                        error = %e,
                        "Proof page fetch failed"
                    );
                    false
                }
            },
            None => false,
        };

        ProofResult {
            service: claim.service,
            identifier: claim.identifier,
            proof_url: claim.proof_url,
            valid,
        }
    }

    async fn fetch_proof(&self, url: &str) -> Result<String, VerifierError> {
        let url = Url::parse(url).map_err(|e| VerifierError::InvalidProfile(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VerifierError::InvalidProfile(format!(
                "unsupported proof URL scheme: {}",
                url.scheme()
            )));
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| VerifierError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VerifierError::NetworkError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| VerifierError::NetworkError(e.to_string()))
    }
}

#[async_trait]
impl ProofVerifier for HttpProofVerifier {
    async fn validate_proofs(
        &self,
        profile: &Profile,
        address: &str,
        name: &str,
    ) -> Result<Vec<ProofResult>, VerifierError> {
        if !profile.as_value().is_object() {
            return Err(VerifierError::InvalidProfile(
                "profile is not a JSON object".to_string(),
            ));
        }

        let claims = profile
            .accounts()
            .iter()
            .filter_map(Claim::from_value)
            .filter(|claim| self.services.recognizes(&claim.service));

        Ok(join_all(claims.map(|claim| self.check_claim(claim, address, name))).await)
    }
}

/// Whether `text` contains a proof statement binding it to `name` or `address`.
pub fn contains_proof_statement(text: &str, name: &str, address: &str) -> bool {
    let text = text.to_lowercase();
    let name = name.to_lowercase();

    let mut statements = vec![
        format!("verifying that \"{name}\" is my blockstack id"),
        format!("verifying that &quot;{name}&quot; is my blockstack id"),
        format!("verifying that {name} is my blockstack id"),
    ];
    if !address.is_empty() {
        statements.push(format!(
            "verifying my blockstack id is secured with the address {}",
            address.to_lowercase()
        ));
    }
    if let Some(username) = name.strip_suffix(".id") {
        statements.push(format!("verifying myself: my bitcoin username is +{username}"));
    }

    statements.iter().any(|statement| text.contains(statement.as_str()))
}
