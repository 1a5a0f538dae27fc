use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bitlens_model::{Credential, Payload, ViewSelection};
use parking_lot::Mutex;
use serde::Deserialize;

use super::errors::{FetchError, LoadOutcome, ProtocolError};
use super::handle::RequestHandle;
use super::query::{GraphQlRequest, build_request};
use crate::domains::session::SessionStore;
use crate::infra::services::provider::{ProviderReply, ProviderTransport};

/// A load that has been registered as the current request and is ready to
/// hit the network.
#[derive(Debug)]
pub struct PreparedLoad {
    handle: RequestHandle,
    credential: Credential,
    request: GraphQlRequest,
}

impl PreparedLoad {
    pub fn handle(&self) -> &RequestHandle {
        &self.handle
    }

    pub fn request(&self) -> &GraphQlRequest {
        &self.request
    }
}

#[derive(Deserialize)]
struct ProviderEnvelope {
    data: Option<Payload>,
    errors: Option<Vec<ProviderErrorEntry>>,
}

#[derive(Deserialize)]
struct ProviderErrorEntry {
    #[serde(default)]
    message: String,
}

/// Issues provider queries for the session and writes outcomes back to it.
///
/// At most one request per orchestrator is current. Issuing a new one, or
/// calling [`cancel`](Self::cancel), invalidates the previous handle and its
/// completion is dropped without touching the session.
#[derive(Debug)]
pub struct FetchOrchestrator {
    store: SessionStore,
    transport: Arc<dyn ProviderTransport>,
    live: Mutex<Option<RequestHandle>>,
    next_sequence: AtomicU64,
}

impl FetchOrchestrator {
    pub fn new(store: SessionStore, transport: Arc<dyn ProviderTransport>) -> Self {
        Self {
            store,
            transport,
            live: Mutex::new(None),
            next_sequence: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Whether a request is currently in flight.
    pub fn has_live_request(&self) -> bool {
        self.live.lock().as_ref().is_some_and(RequestHandle::is_valid)
    }

    /// Load `selection` and record the outcome in the session.
    ///
    /// Never fails: every error path ends in a single `fail` transition,
    /// which is also reported back as [`LoadOutcome::Failed`].
    pub async fn load(&self, selection: &ViewSelection) -> LoadOutcome {
        match self.prepare(selection) {
            Ok(prepared) => self.execute(prepared).await,
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Synchronous half of [`load`](Self::load).
    ///
    /// Checks the credential, supersedes the previous request, marks the
    /// session as loading and builds the query. Calling this in issue order
    /// is what decides which request is current, independent of when the
    /// returned load is actually driven.
    pub fn prepare(
        &self,
        selection: &ViewSelection,
    ) -> Result<PreparedLoad, FetchError> {
        let Some(credential) = self.store.credential() else {
            log::warn!(
                "[Orchestrator] Refusing to load {} view: no credential",
                selection.active_view()
            );
            let err = FetchError::Configuration;
            // A rejected load still supersedes whatever is in flight.
            let mut live = self.live.lock();
            if let Some(previous) = live.take() {
                previous.invalidate();
            }
            self.store.fail(err.to_string());
            return Err(err);
        };

        let handle = RequestHandle::new(
            self.next_sequence.fetch_add(1, Ordering::Relaxed),
        );
        {
            let mut live = self.live.lock();
            if let Some(previous) = live.replace(handle.clone()) {
                if previous.is_valid() {
                    log::debug!(
                        "[Orchestrator] Superseding request #{} with #{}",
                        previous.sequence(),
                        handle.sequence()
                    );
                }
                previous.invalidate();
            }
            self.store.begin_load();
        }

        let request = build_request(selection);
        log::info!(
            "[Orchestrator] Request #{} for {} view",
            handle.sequence(),
            selection.active_view()
        );

        Ok(PreparedLoad {
            handle,
            credential,
            request,
        })
    }

    /// Network half of [`load`](Self::load).
    pub async fn execute(&self, prepared: PreparedLoad) -> LoadOutcome {
        let PreparedLoad {
            handle,
            credential,
            request,
        } = prepared;

        let reply = tokio::select! {
            biased;
            _ = handle.invalidated() => {
                log::debug!(
                    "[Orchestrator] Request #{} cancelled before completion",
                    handle.sequence()
                );
                return LoadOutcome::Superseded;
            }
            reply = self.transport.post(&credential, &request) => reply,
        };

        let result = match reply {
            Ok(reply) => classify_reply(reply),
            Err(fault) => Err(FetchError::Network(fault.to_string())),
        };

        self.commit(&handle, result)
    }

    /// Invalidate the in-flight request, if any. The session is not touched.
    pub fn cancel(&self) {
        if let Some(handle) = self.live.lock().take() {
            log::debug!(
                "[Orchestrator] Cancelling request #{}",
                handle.sequence()
            );
            handle.invalidate();
        }
    }

    fn commit(
        &self,
        handle: &RequestHandle,
        result: Result<Payload, FetchError>,
    ) -> LoadOutcome {
        let mut live = self.live.lock();
        let is_current = handle.is_valid()
            && live.as_ref().is_some_and(|current| current.is_same(handle));
        if !is_current {
            log::debug!(
                "[Orchestrator] Dropping stale completion of request #{}",
                handle.sequence()
            );
            return LoadOutcome::Superseded;
        }

        let outcome = match result {
            Ok(payload) => {
                log::info!(
                    "[Orchestrator] Request #{} loaded",
                    handle.sequence()
                );
                self.store.succeed(payload);
                LoadOutcome::Loaded
            }
            Err(err) => {
                log::warn!(
                    "[Orchestrator] Request #{} failed: {}",
                    handle.sequence(),
                    err
                );
                self.store.fail(err.to_string());
                LoadOutcome::Failed(err)
            }
        };

        *live = None;
        outcome
    }
}

/// Turn a raw provider reply into a payload or a classified error.
pub fn classify_reply(reply: ProviderReply) -> Result<Payload, FetchError> {
    if !reply.is_success() {
        let body = reply.body.trim();
        let detail = if !body.is_empty() {
            body.to_string()
        } else if !reply.status_text.is_empty() {
            reply.status_text
        } else {
            "Unknown error".to_string()
        };
        return Err(FetchError::Transport {
            status: reply.status,
            detail,
        });
    }

    let envelope: ProviderEnvelope = serde_json::from_str(&reply.body)
        .map_err(|e| ProtocolError::Malformed(e.to_string()))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors.into_iter().map(|entry| entry.message).collect();
        return Err(ProtocolError::ProviderErrors(messages).into());
    }

    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(ProtocolError::EmptyResponse.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(status: u16, status_text: &str, body: &str) -> ProviderReply {
        ProviderReply {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn data_payload_is_returned() {
        let payload =
            classify_reply(ProviderReply::ok(r#"{"data":{"bitcoin":{}}}"#))
                .unwrap();
        assert_eq!(payload, json!({ "bitcoin": {} }));
    }

    #[test]
    fn provider_errors_are_joined() {
        let err = classify_reply(ProviderReply::ok(
            r#"{"errors":[{"message":"bad address"},{"message":"try later"}],"data":null}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "bad address, try later");
    }

    #[test]
    fn errors_take_precedence_over_data() {
        let err = classify_reply(ProviderReply::ok(
            r#"{"errors":[{"message":"partial"}],"data":{"bitcoin":{}}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "partial");
    }

    #[test]
    fn empty_error_list_is_ignored() {
        let payload =
            classify_reply(ProviderReply::ok(r#"{"errors":[],"data":{"x":1}}"#))
                .unwrap();
        assert_eq!(payload, json!({ "x": 1 }));
    }

    #[test]
    fn missing_or_null_data_is_empty_response() {
        for body in [r#"{}"#, r#"{"data":null}"#] {
            let err = classify_reply(ProviderReply::ok(body)).unwrap_err();
            assert_eq!(err, FetchError::Protocol(ProtocolError::EmptyResponse));
        }
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = classify_reply(ProviderReply::ok("<html>")).unwrap_err();
        assert!(err.to_string().starts_with("malformed response:"));
    }

    #[test]
    fn http_failure_prefers_body_then_reason() {
        let err = classify_reply(reply(403, "Forbidden", "token expired"))
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 403: token expired");

        let err = classify_reply(reply(502, "Bad Gateway", "  ")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = classify_reply(reply(599, "", "")).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 599: Unknown error");
    }
}
