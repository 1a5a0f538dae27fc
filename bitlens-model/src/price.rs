use serde::Deserialize;

use crate::error::Result;

/// USD output aggregation for one day, as returned by the price query.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    /// Total BTC moved through outputs that day.
    pub value_btc: f64,
    /// The same total valued in USD.
    pub value_usd: f64,
    /// USD per BTC, from the provider's `usd/value` expression when present.
    pub usd_per_btc: Option<f64>,
}

#[derive(Deserialize)]
struct PricePayload {
    bitcoin: Option<PriceBitcoin>,
}

#[derive(Deserialize)]
struct PriceBitcoin {
    #[serde(default)]
    outputs: Vec<PriceOutput>,
}

#[derive(Deserialize)]
struct PriceOutput {
    value: Option<f64>,
    usd: Option<f64>,
    expression: Option<f64>,
}

impl PriceSummary {
    /// Decode the `data` object of a price query.
    ///
    /// Returns `Ok(None)` when the provider had no outputs for the day.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Option<Self>> {
        let decoded = PricePayload::deserialize(payload)?;
        let Some(output) = decoded
            .bitcoin
            .and_then(|bitcoin| bitcoin.outputs.into_iter().next())
        else {
            return Ok(None);
        };

        let value_btc = output.value.unwrap_or_default();
        let value_usd = output.usd.unwrap_or_default();
        let usd_per_btc = output.expression.or_else(|| {
            (value_btc > 0.0).then(|| value_usd / value_btc)
        });

        Ok(Some(Self {
            value_btc,
            value_usd,
            usd_per_btc,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_first_output_row() {
        let payload = json!({
            "bitcoin": {
                "outputs": [
                    { "value": 2.0, "usd": 130000.0, "expression": 65000.0 }
                ]
            }
        });

        let summary = PriceSummary::from_payload(&payload).unwrap().unwrap();
        assert_eq!(summary.value_btc, 2.0);
        assert_eq!(summary.value_usd, 130000.0);
        assert_eq!(summary.usd_per_btc, Some(65000.0));
    }

    #[test]
    fn derives_price_when_expression_missing() {
        let payload = json!({
            "bitcoin": { "outputs": [ { "value": 4.0, "usd": 100.0 } ] }
        });

        let summary = PriceSummary::from_payload(&payload).unwrap().unwrap();
        assert_eq!(summary.usd_per_btc, Some(25.0));
    }

    #[test]
    fn empty_outputs_yield_none() {
        let payload = json!({ "bitcoin": { "outputs": [] } });
        assert!(PriceSummary::from_payload(&payload).unwrap().is_none());

        let payload = json!({ "bitcoin": null });
        assert!(PriceSummary::from_payload(&payload).unwrap().is_none());
    }
}
