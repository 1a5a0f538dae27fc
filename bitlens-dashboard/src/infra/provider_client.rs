use crate::domains::fetch::query::GraphQlRequest;
use crate::infra::services::provider::{
    ProviderReply, ProviderTransport, TransportFault, TransportResult,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bitlens_model::Credential;
use log::{debug, info};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Default Bitquery GraphQL endpoint.
pub const DEFAULT_PROVIDER_URL: &str = "https://graphql.bitquery.io";

/// reqwest-backed provider transport
#[derive(Clone)]
pub struct HttpProviderClient {
    client: Client,
    endpoint: String,
}

impl std::fmt::Debug for HttpProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProviderClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpProviderClient {
    /// Create a client for `endpoint`.
    ///
    /// No request timeout is applied unless one is given; a hung call stays
    /// in flight until it resolves or its handle is invalidated.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        // Users paste "graphql.bitquery.io" without a scheme, which reqwest rejects.
        fn normalize(raw: String) -> String {
            let trimmed = raw.trim().trim_end_matches('/').to_string();
            let with_scheme = if trimmed.starts_with("http://")
                || trimmed.starts_with("https://")
            {
                trimmed
            } else {
                format!("https://{}", trimmed)
            };
            if with_scheme != raw {
                log::warn!(
                    "[ProviderClient] Normalized endpoint from '{}' to '{}'",
                    raw,
                    with_scheme
                );
            }
            with_scheme
        }

        let endpoint = normalize(endpoint.into());
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to create HTTP client")?;

        info!(
            "[ProviderClient] Creating provider client for endpoint: {}",
            endpoint
        );

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ProviderTransport for HttpProviderClient {
    async fn post(
        &self,
        credential: &Credential,
        request: &GraphQlRequest,
    ) -> TransportResult<ProviderReply> {
        debug!(
            "[ProviderClient] POST {} ({} variables)",
            self.endpoint,
            request.variables.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, credential.bearer())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportFault::Connect(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportFault::Body(e.to_string()))?;

        Ok(ProviderReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_without_scheme_gets_https() {
        let client =
            HttpProviderClient::new("graphql.bitquery.io/", None).unwrap();
        assert_eq!(client.endpoint(), "https://graphql.bitquery.io");
    }

    #[test]
    fn explicit_http_scheme_is_kept() {
        let client =
            HttpProviderClient::new("http://127.0.0.1:8080", None).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080");
    }
}
