//! Naming service liveness oracle.
//!
//! Looks names up at `GET {base_url}/v1/names/{name}`. A 404 means the name
//! has lapsed; a success means it is registered. Anything else is reported as
//! an error and the enricher decides how to degrade.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::traits::*;
use crate::config::EnricherConfig;

/// HTTP-backed liveness oracle.
pub struct NamingServiceOracle {
    client: Client,
    base_url: String,
}

impl NamingServiceOracle {
    /// Create an oracle for the given naming service base URL.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create an oracle from enricher configuration.
    pub fn from_config(config: &EnricherConfig) -> Self {
        Self::new(config.http_client(), config.naming_service_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the lookup URL, percent-encoding the name as one path segment.
    fn name_url(&self, name: &str) -> Result<Url, OracleError> {
        if name.is_empty() {
            return Err(OracleError::InvalidName("empty name".to_string()));
        }

        let mut url =
            Url::parse(&self.base_url).map_err(|e| OracleError::InvalidUrl(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| OracleError::InvalidUrl(self.base_url.clone()))?;
            segments.pop_if_empty().extend(["v1", "names", name]);
        }

        Ok(url)
    }
}

#[async_trait]
impl LivenessOracle for NamingServiceOracle {
    async fn lookup(&self, name: &str) -> Result<NameStatus, OracleError> {
        let url = self.name_url(name)?;
        debug!(name = %name, url = %url, "Looking up name");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OracleError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            Ok(NameStatus::NotFound)
        } else if status.is_success() {
            Ok(NameStatus::Registered)
        } else {
            Err(OracleError::UnexpectedStatus(status.as_u16()))
        }
    }
}
