use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::Result;

/// Aggregate over one side (inputs or outputs) of an address's history.
///
/// Values are taken as already expressed in BTC.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlowAggregate {
    pub count: u64,
    pub value: f64,
    pub value_usd: f64,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Received/spent totals for an address, decoded from a balance query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSummary {
    /// Output side: funds received by the address.
    pub received: FlowAggregate,
    /// Input side: funds spent from the address.
    pub spent: FlowAggregate,
}

#[derive(Deserialize)]
struct BalancePayload {
    bitcoin: Option<BalanceBitcoin>,
}

#[derive(Deserialize)]
struct BalanceBitcoin {
    #[serde(default)]
    inputs: Vec<FlowAggregate>,
    #[serde(default)]
    outputs: Vec<FlowAggregate>,
}

impl BalanceSummary {
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self> {
        let decoded = BalancePayload::deserialize(payload)?;
        let Some(bitcoin) = decoded.bitcoin else {
            return Ok(Self::default());
        };

        Ok(Self {
            received: bitcoin.outputs.into_iter().next().unwrap_or_default(),
            spent: bitcoin.inputs.into_iter().next().unwrap_or_default(),
        })
    }

    pub fn balance_btc(&self) -> f64 {
        self.received.value - self.spent.value
    }

    pub fn balance_usd(&self) -> f64 {
        self.received.value_usd - self.spent.value_usd
    }

    pub fn transaction_count(&self) -> u64 {
        self.received.count + self.spent.count
    }

    pub fn first_activity(&self) -> Option<NaiveDate> {
        match (self.received.min_date, self.spent.min_date) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn last_activity(&self) -> Option<NaiveDate> {
        match (self.received.max_date, self.spent.max_date) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}
