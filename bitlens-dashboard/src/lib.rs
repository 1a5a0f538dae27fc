//! bitlens dashboard library
//!
//! Session state and fetch orchestration for a Bitcoin price/balance
//! dashboard backed by the Bitquery GraphQL API, plus the thin terminal
//! rendering used by the `bitlens` binary.
//!
//! Notes
//! - [`app::Dashboard`] is the entry point for presentation code.
//! - The library is exposed mainly to enable testing and alternative
//!   front-ends; the binary only composes it.

pub mod app;
pub mod domains;
pub mod infra;
pub mod view;

pub use app::{Dashboard, LoadTask};
pub use domains::fetch::{FetchError, FetchOrchestrator, LoadOutcome};
pub use domains::session::{LoadStatus, SessionState, SessionStore};
