//! Dashboard composition root
//!
//! [`Dashboard`] is the only surface presentation code talks to. It is built
//! once at startup from an explicit store and transport and passed down to
//! whatever renders views; there is no global instance.

use std::sync::Arc;

use anyhow::Result;
use bitlens_model::{Credential, ViewSelection};
use tokio::task::JoinHandle;

use crate::domains::fetch::{FetchOrchestrator, LoadOutcome};
use crate::domains::session::{SessionState, SessionStore};
use crate::infra::config::Config;
use crate::infra::provider_client::HttpProviderClient;
use crate::infra::services::provider::ProviderTransport;

/// Network half of a load, running on the tokio runtime.
///
/// Dropping it does not cancel the request; use [`Dashboard::teardown`].
pub type LoadTask = JoinHandle<LoadOutcome>;

#[derive(Debug, Clone)]
pub struct Dashboard {
    store: SessionStore,
    orchestrator: Arc<FetchOrchestrator>,
}

impl Dashboard {
    pub fn new(store: SessionStore, transport: Arc<dyn ProviderTransport>) -> Self {
        let orchestrator =
            Arc::new(FetchOrchestrator::new(store.clone(), transport));
        Self {
            store,
            orchestrator,
        }
    }

    /// Compose a dashboard talking to the configured provider over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpProviderClient::new(
            config.provider_url.clone(),
            config.request_timeout(),
        )?;
        let dashboard = Self::new(SessionStore::new(), Arc::new(transport));
        if let Some(token) = config.credential.as_deref() {
            dashboard.set_credential(token);
        }
        Ok(dashboard)
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Replace the credential. Blank input clears it.
    ///
    /// Any request issued under the previous credential is cancelled so its
    /// response cannot land after the switch.
    pub fn set_credential(&self, token: impl Into<String>) {
        let credential = Credential::new(token);
        let credential = (!credential.is_blank()).then_some(credential);
        log::info!(
            "[Dashboard] Credential {}",
            if credential.is_some() { "configured" } else { "cleared" }
        );
        self.orchestrator.cancel();
        self.store.set_credential(credential);
    }

    /// Switch to `selection` and start loading it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select_view(&self, selection: ViewSelection) -> LoadTask {
        log::info!("[Dashboard] Selecting {} view", selection.active_view());
        // The previous view's request must not commit after the switch.
        self.orchestrator.cancel();
        self.store.set_view(Some(selection.clone()));
        self.spawn_load(&selection)
    }

    /// Reload the current view. `None` when no view is selected.
    pub fn refresh(&self) -> Option<LoadTask> {
        let Some(selection) = self.store.view() else {
            log::warn!("[Dashboard] Refresh requested with no view selected");
            return None;
        };
        Some(self.spawn_load(&selection))
    }

    /// Stop caring about the in-flight request, if any.
    pub fn teardown(&self) {
        self.orchestrator.cancel();
    }

    fn spawn_load(&self, selection: &ViewSelection) -> LoadTask {
        match self.orchestrator.prepare(selection) {
            Ok(prepared) => {
                let orchestrator = Arc::clone(&self.orchestrator);
                tokio::spawn(async move { orchestrator.execute(prepared).await })
            }
            Err(err) => tokio::spawn(async move { LoadOutcome::Failed(err) }),
        }
    }
}
