//! Fetch orchestration domain
//!
//! Builds provider queries from the selected view, keeps at most one request
//! in flight per orchestrator, and reports every outcome through the session
//! store's transitions.

pub mod errors;
pub mod handle;
pub mod orchestrator;
pub mod query;

pub use self::errors::{FetchError, LoadOutcome, ProtocolError};
pub use self::handle::RequestHandle;
pub use self::orchestrator::{FetchOrchestrator, PreparedLoad, classify_reply};
pub use self::query::{GraphQlRequest, build_request, normalize_datetime};
