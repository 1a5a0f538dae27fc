//! Fetch error types
//!
//! The `Display` form of each error is exactly the message that ends up in
//! the session's `error_message`.

use thiserror::Error;

/// Why a load did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No credential configured; no request was sent
    #[error("credential not configured")]
    Configuration,

    /// Provider answered with a non-success HTTP status
    #[error("HTTP {status}: {detail}")]
    Transport { status: u16, detail: String },

    /// Connection-level failure before any response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Well-formed HTTP response whose body reports a problem
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Provider-level failures carried in a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("{}", .0.join(", "))]
    ProviderErrors(Vec<String>),

    #[error("empty response")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// How a single `load` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Payload stored in the session
    Loaded,
    /// Failure recorded in the session
    Failed(FetchError),
    /// A newer load or an explicit cancel took over; the session was not touched
    Superseded,
}

impl LoadOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_session_format() {
        assert_eq!(
            FetchError::Configuration.to_string(),
            "credential not configured"
        );
        assert_eq!(
            FetchError::Transport {
                status: 401,
                detail: "Unauthorized".into()
            }
            .to_string(),
            "HTTP 401: Unauthorized"
        );
        assert_eq!(
            FetchError::from(ProtocolError::ProviderErrors(vec![
                "bad address".into(),
                "limit exceeded".into()
            ]))
            .to_string(),
            "bad address, limit exceeded"
        );
        assert_eq!(
            FetchError::from(ProtocolError::EmptyResponse).to_string(),
            "empty response"
        );
    }
}
