//! Provider transport trait
//!
//! Abstracts the single HTTP round-trip to the GraphQL provider so the
//! orchestrator can be driven by the reqwest client in production and by
//! scripted fakes in tests.

use crate::domains::fetch::query::GraphQlRequest;
use async_trait::async_trait;
use bitlens_model::Credential;
use std::fmt::Debug;
use thiserror::Error;

/// Raw HTTP reply from the provider, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    pub status: u16,
    /// Canonical reason phrase for `status`, empty when unknown.
    pub status_text: String,
    pub body: String,
}

impl ProviderReply {
    /// A `200 OK` reply carrying `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any reply at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFault {
    #[error("{0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

pub type TransportResult<T> = Result<T, TransportFault>;

/// One POST of a GraphQL document to the provider endpoint.
#[async_trait]
pub trait ProviderTransport: Send + Sync + Debug {
    /// Send `request` authenticated with `credential` as a bearer token.
    ///
    /// Non-2xx statuses are returned as replies, not faults.
    async fn post(
        &self,
        credential: &Credential,
        request: &GraphQlRequest,
    ) -> TransportResult<ProviderReply>;

    /// Endpoint URL, for diagnostics.
    fn endpoint(&self) -> &str;
}
