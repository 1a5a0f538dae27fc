//! Session state domain
//!
//! Owns the single authoritative [`SessionState`] for a dashboard session.
//! Every mutation goes through one of the six [`SessionMessage`] transitions;
//! nothing here knows about networking, dates or the provider schema.

pub mod messages;
pub mod state;
pub mod update;

pub use self::messages::SessionMessage;
pub use self::state::{LoadState, LoadStatus, SessionState};
pub use self::update::update_session;

use bitlens_model::{Credential, Payload, ViewSelection};
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to the session state.
///
/// Cloning yields another handle to the same state. The store is created
/// once at startup and handed explicitly to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state.read().credential.clone()
    }

    pub fn view(&self) -> Option<ViewSelection> {
        self.state.read().view.clone()
    }

    pub fn dispatch(&self, message: SessionMessage) {
        log::trace!("[Session] {}", message.name());
        update_session(&mut self.state.write(), message);
    }

    pub fn set_credential(&self, credential: Option<Credential>) {
        self.dispatch(SessionMessage::SetCredential(credential));
    }

    pub fn set_view(&self, view: Option<ViewSelection>) {
        self.dispatch(SessionMessage::SetView(view));
    }

    pub fn begin_load(&self) {
        self.dispatch(SessionMessage::BeginLoad);
    }

    pub fn succeed(&self, payload: Payload) {
        self.dispatch(SessionMessage::Succeed {
            payload,
            at: chrono::Utc::now(),
        });
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.dispatch(SessionMessage::Fail(message.into()));
    }

    pub fn reset(&self) {
        self.dispatch(SessionMessage::Reset);
    }
}
