//! Provider query construction
//!
//! Translates a [`ViewSelection`] into the GraphQL document and variables the
//! Bitquery endpoint expects, including the conversion of calendar dates to
//! its `ISO8601DateTime` scalar.

use bitlens_model::{BalanceConfig, DEFAULT_NETWORK, PriceConfig, ViewSelection};
use serde::Serialize;
use serde_json::{Map, Value, json};

pub const PRICE_QUERY: &str = r#"
query GetBitcoinPrice($date: ISO8601DateTime!) {
  bitcoin {
    outputs(date: {is: $date}) {
      value
      usd: value(in: USD)
      expression(get: "usd/value")
    }
  }
}
"#;

pub const BALANCE_QUERY: &str = r#"
query GetBitcoinBalance($network: BitcoinNetwork!, $address: String!, $from: ISO8601DateTime, $till: ISO8601DateTime) {
  bitcoin(network: $network) {
    inputs(date: {since: $from, till: $till}, inputAddress: {is: $address}) {
      count
      value
      value_usd: value(in: USD)
      min_date: minimum(of: date)
      max_date: maximum(of: date)
    }
    outputs(date: {since: $from, till: $till}, outputAddress: {is: $address}) {
      count
      value
      value_usd: value(in: USD)
      min_date: minimum(of: date)
      max_date: maximum(of: date)
    }
  }
}
"#;

/// JSON body POSTed to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}

/// Build the provider request for a view.
pub fn build_request(selection: &ViewSelection) -> GraphQlRequest {
    match selection {
        ViewSelection::Price(config) => price_request(config),
        ViewSelection::Balance(config) => balance_request(config),
    }
}

fn price_request(config: &PriceConfig) -> GraphQlRequest {
    let mut variables = Map::new();
    variables.insert("date".into(), datetime_value(Some(&config.date)));

    GraphQlRequest {
        query: PRICE_QUERY,
        variables,
    }
}

fn balance_request(config: &BalanceConfig) -> GraphQlRequest {
    let network = match config.network.trim() {
        "" => DEFAULT_NETWORK,
        network => network,
    };

    let mut variables = Map::new();
    variables.insert("network".into(), json!(network));
    variables.insert("address".into(), json!(config.address));
    variables.insert("from".into(), datetime_value(config.from.as_deref()));
    variables.insert("till".into(), datetime_value(config.till.as_deref()));

    GraphQlRequest {
        query: BALANCE_QUERY,
        variables,
    }
}

fn datetime_value(raw: Option<&str>) -> Value {
    normalize_datetime(raw).map(Value::String).unwrap_or(Value::Null)
}

/// Convert a date input to the provider's datetime scalar.
///
/// `YYYY-MM-DD` becomes midnight UTC; anything already carrying a time
/// component (`T`) is passed through. Missing or blank input yields `None`,
/// which the provider reads as an unbounded range end.
pub fn normalize_datetime(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains('T') {
        return Some(raw.to_string());
    }
    Some(format!("{raw}T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    #[test]
    fn date_only_becomes_midnight_utc() {
        assert_eq!(
            normalize_datetime(Some("2024-01-15")).as_deref(),
            Some("2024-01-15T00:00:00Z")
        );
    }

    #[test]
    fn datetime_passes_through() {
        assert_eq!(
            normalize_datetime(Some("2024-01-15T12:00:00Z")).as_deref(),
            Some("2024-01-15T12:00:00Z")
        );
    }

    #[test]
    fn missing_or_blank_is_unbounded() {
        assert_eq!(normalize_datetime(None), None);
        assert_eq!(normalize_datetime(Some("")), None);
        assert_eq!(normalize_datetime(Some("   ")), None);
    }

    #[test]
    fn price_request_carries_normalized_date() {
        let request =
            build_request(&ViewSelection::Price(PriceConfig::new("2024-03-01")));
        assert_eq!(request.query, PRICE_QUERY);
        assert_eq!(
            request.variable("date"),
            Some(&json!("2024-03-01T00:00:00Z"))
        );
    }

    #[test]
    fn balance_request_passes_null_for_open_range() {
        let config = BalanceConfig::new("bitcoin", "bc1qexample")
            .unwrap()
            .with_page(NonZeroU32::new(25).unwrap(), 50)
            .with_range(Some("2023-01-01".into()), None);

        let request = build_request(&ViewSelection::Balance(config));
        assert_eq!(request.query, BALANCE_QUERY);
        assert_eq!(request.variable("network"), Some(&json!("bitcoin")));
        assert_eq!(request.variable("address"), Some(&json!("bc1qexample")));
        assert_eq!(
            request.variable("from"),
            Some(&json!("2023-01-01T00:00:00Z"))
        );
        assert_eq!(request.variable("till"), Some(&Value::Null));
        assert!(request.variable("limit").is_none());
    }

    #[test]
    fn request_serializes_as_query_and_variables() {
        let request =
            build_request(&ViewSelection::Price(PriceConfig::new("2024-03-01")));
        let body = serde_json::to_value(&request).unwrap();
        assert!(body["query"].as_str().unwrap().contains("GetBitcoinPrice"));
        assert_eq!(body["variables"]["date"], "2024-03-01T00:00:00Z");
    }
}
