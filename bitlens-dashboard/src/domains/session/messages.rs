use bitlens_model::{Credential, Payload, ViewSelection};
use chrono::{DateTime, Utc};

/// The six session transitions.
#[derive(Debug, Clone)]
pub enum Message {
    SetCredential(Option<Credential>),
    SetView(Option<ViewSelection>),
    BeginLoad,
    Succeed {
        payload: Payload,
        at: DateTime<Utc>,
    },
    Fail(String),
    Reset,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCredential(_) => "Session::SetCredential",
            Self::SetView(_) => "Session::SetView",
            Self::BeginLoad => "Session::BeginLoad",
            Self::Succeed { .. } => "Session::Succeed",
            Self::Fail(_) => "Session::Fail",
            Self::Reset => "Session::Reset",
        }
    }
}

pub use Message as SessionMessage;
