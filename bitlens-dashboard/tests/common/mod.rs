//! Shared test harness for dashboard integration tests
//!
//! Provides a scripted provider transport whose replies are released
//! explicitly by the test, so completion order can be controlled.

#![allow(dead_code)]

use async_trait::async_trait;
use bitlens_dashboard::domains::fetch::GraphQlRequest;
use bitlens_dashboard::infra::services::{
    ProviderReply, ProviderTransport, TransportFault, TransportResult,
};
use bitlens_model::Credential;
use serde_json::Value;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub type ReplySender = oneshot::Sender<TransportResult<ProviderReply>>;

/// A call the orchestrator made against the transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: String,
    pub request: GraphQlRequest,
}

impl RecordedCall {
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.request.variable(name)
    }
}

/// Transport whose replies are keyed by the request's `date` or `address`
/// variable and released by the test.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<RecordedCall>>,
    slots: Mutex<HashMap<String, oneshot::Receiver<TransportResult<ProviderReply>>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a reply slot for requests whose key variable equals `key`.
    pub fn slot(&self, key: &str) -> ReplySender {
        let (tx, rx) = oneshot::channel();
        self.slots.lock().insert(key.to_string(), rx);
        tx
    }

    /// Register an already-resolved reply for `key`.
    pub fn reply(&self, key: &str, reply: ProviderReply) {
        let _ = self.slot(key).send(Ok(reply));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Wait until at least `count` calls have reached the transport.
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.call_count() < count {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("transport never saw the expected number of calls");
    }

    fn key_of(request: &GraphQlRequest) -> Option<String> {
        ["date", "address"].iter().find_map(|name| {
            request
                .variable(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl ProviderTransport for ScriptedTransport {
    async fn post(
        &self,
        credential: &Credential,
        request: &GraphQlRequest,
    ) -> TransportResult<ProviderReply> {
        let slot = Self::key_of(request)
            .and_then(|key| self.slots.lock().remove(&key));
        self.calls.lock().push(RecordedCall {
            authorization: credential.bearer(),
            request: request.clone(),
        });

        match slot {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(TransportFault::Connect("reply slot dropped".into()))
            }),
            None => Err(TransportFault::Connect("no scripted reply".into())),
        }
    }

    fn endpoint(&self) -> &str {
        "scripted://provider"
    }
}

/// `200 OK` with `{"data": data}`.
pub fn data_reply(data: Value) -> ProviderReply {
    ProviderReply::ok(serde_json::json!({ "data": data }).to_string())
}

/// `200 OK` with an arbitrary JSON body.
pub fn json_reply(body: Value) -> ProviderReply {
    ProviderReply::ok(body.to_string())
}

/// `200 OK` with a GraphQL error list.
pub fn errors_reply(messages: &[&str]) -> ProviderReply {
    let errors: Vec<Value> = messages
        .iter()
        .map(|message| serde_json::json!({ "message": message }))
        .collect();
    ProviderReply::ok(serde_json::json!({ "errors": errors }).to_string())
}

pub fn status_reply(status: u16, status_text: &str, body: &str) -> ProviderReply {
    ProviderReply {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    }
}
