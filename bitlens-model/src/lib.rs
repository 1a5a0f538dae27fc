//! Data model definitions shared across bitlens crates.
#![allow(missing_docs)]

pub mod balance;
pub mod credential;
pub mod error;
pub mod format;
pub mod price;
pub mod view;

// Intentionally curated re-exports for downstream consumers.
pub use balance::{BalanceSummary, FlowAggregate};
pub use credential::Credential;
pub use error::{ModelError, Result as ModelResult};
pub use format::{format_btc, format_usd};
pub use price::PriceSummary;
pub use view::{
    ActiveView, BalanceConfig, DEFAULT_BALANCE_LIMIT, DEFAULT_NETWORK,
    PriceConfig, ViewSelection,
};

/// Opaque `data` object returned by the provider for a successful query.
pub type Payload = serde_json::Value;
