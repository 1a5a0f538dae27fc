use std::fmt::{self, Display};

/// Errors produced by model constructors and payload decoding.
#[derive(Debug)]
pub enum ModelError {
    InvalidConfig(String),
    Payload(serde_json::Error),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidConfig(msg) => {
                write!(f, "invalid view config: {msg}")
            }
            ModelError::Payload(err) => write!(f, "unexpected payload: {err}"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::InvalidConfig(_) => None,
            ModelError::Payload(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Payload(err)
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
