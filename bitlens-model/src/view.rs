use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

pub const DEFAULT_NETWORK: &str = "bitcoin";

pub const DEFAULT_BALANCE_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Which query view is currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveView {
    #[default]
    None,
    Price,
    Balance,
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Price => write!(f, "price"),
            Self::Balance => write!(f, "balance"),
        }
    }
}

/// A view together with its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewSelection {
    Price(PriceConfig),
    Balance(BalanceConfig),
}

impl ViewSelection {
    pub fn active_view(&self) -> ActiveView {
        match self {
            Self::Price(_) => ActiveView::Price,
            Self::Balance(_) => ActiveView::Balance,
        }
    }
}

impl From<PriceConfig> for ViewSelection {
    fn from(config: PriceConfig) -> Self {
        Self::Price(config)
    }
}

impl From<BalanceConfig> for ViewSelection {
    fn from(config: BalanceConfig) -> Self {
        Self::Balance(config)
    }
}

/// Price view: USD output aggregation for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// `YYYY-MM-DD`, or a full ISO-8601 datetime.
    pub date: String,
}

impl PriceConfig {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    /// Price for the current UTC day.
    pub fn today() -> Self {
        Self::new(chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string())
    }
}

/// Balance view: input/output totals for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceConfig {
    pub network: String,
    pub address: String,
    pub limit: NonZeroU32,
    pub offset: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub till: Option<String>,
}

impl BalanceConfig {
    /// Build a config for `address` on `network`, first page, unbounded range.
    ///
    /// A blank network falls back to [`DEFAULT_NETWORK`]. A blank address is
    /// rejected since the provider would answer with an empty aggregate.
    pub fn new(
        network: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self> {
        let address = address.into().trim().to_string();
        if address.is_empty() {
            return Err(ModelError::InvalidConfig(
                "address must not be empty".to_string(),
            ));
        }

        let network = network.into().trim().to_string();
        let network = if network.is_empty() {
            DEFAULT_NETWORK.to_string()
        } else {
            network
        };

        Ok(Self {
            network,
            address,
            limit: DEFAULT_BALANCE_LIMIT,
            offset: 0,
            from: None,
            till: None,
        })
    }

    pub fn with_page(mut self, limit: NonZeroU32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    pub fn with_range(
        mut self,
        from: Option<String>,
        till: Option<String>,
    ) -> Self {
        self.from = from;
        self.till = till;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_network_falls_back_to_bitcoin() {
        let config = BalanceConfig::new("  ", "bc1qexample").unwrap();
        assert_eq!(config.network, "bitcoin");
        assert_eq!(config.limit.get(), 10);
        assert_eq!(config.offset, 0);
    }

    #[test]
    fn blank_address_is_rejected() {
        let err = BalanceConfig::new("bitcoin", " ").unwrap_err();
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn selection_reports_active_view() {
        let price: ViewSelection = PriceConfig::new("2024-03-01").into();
        assert_eq!(price.active_view(), ActiveView::Price);

        let balance: ViewSelection =
            BalanceConfig::new("bitcoin", "bc1q").unwrap().into();
        assert_eq!(balance.active_view(), ActiveView::Balance);
    }

    #[test]
    fn selection_serializes_with_view_tag() {
        let selection = ViewSelection::Price(PriceConfig::new("2024-03-01"));
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["view"], "price");
        assert_eq!(json["date"], "2024-03-01");
    }
}
