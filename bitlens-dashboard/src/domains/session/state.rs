use bitlens_model::{ActiveView, Credential, Payload, ViewSelection};
use chrono::{DateTime, Utc};

/// Coarse load status exposed to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Load lifecycle for the active view.
///
/// The result and the error message live inside the variants, so a payload
/// can only exist while `Loaded` and a message only while `Errored`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded { payload: Payload },
    Errored { message: String },
}

impl LoadState {
    pub fn status(&self) -> LoadStatus {
        match self {
            Self::Idle => LoadStatus::Idle,
            Self::Loading => LoadStatus::Loading,
            Self::Loaded { .. } => LoadStatus::Loaded,
            Self::Errored { .. } => LoadStatus::Errored,
        }
    }
}

/// Snapshot of everything the dashboard knows about the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub(crate) credential: Option<Credential>,
    pub(crate) view: Option<ViewSelection>,
    pub(crate) load: LoadState,
    pub(crate) last_updated: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn active_view(&self) -> ActiveView {
        self.view
            .as_ref()
            .map(ViewSelection::active_view)
            .unwrap_or_default()
    }

    pub fn view(&self) -> Option<&ViewSelection> {
        self.view.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn status(&self) -> LoadStatus {
        self.load.status()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading)
    }

    pub fn result(&self) -> Option<&Payload> {
        match &self.load {
            LoadState::Loaded { payload } => Some(payload),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.load {
            LoadState::Errored { message } => Some(message),
            _ => None,
        }
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}
