//! Plain-text rendering of the session for the terminal front-end.

use bitlens_model::{
    BalanceSummary, PriceSummary, ViewSelection, format_btc, format_usd,
};
use std::fmt::Write;

use crate::domains::session::{LoadState, SessionState};

/// Render whatever the session currently shows.
pub fn render(state: &SessionState) -> String {
    match state.load_state() {
        LoadState::Idle => "Nothing loaded yet.".to_string(),
        LoadState::Loading => "Loading...".to_string(),
        LoadState::Errored { message } => {
            format!("Failed to load data: {message}")
        }
        LoadState::Loaded { payload } => {
            let mut out = match state.view() {
                Some(ViewSelection::Price(config)) => {
                    render_price(&config.date, payload)
                }
                Some(ViewSelection::Balance(config)) => {
                    render_balance(&config.network, &config.address, payload)
                }
                None => serde_json::to_string_pretty(payload)
                    .unwrap_or_else(|_| payload.to_string()),
            };
            if let Some(updated) = state.last_updated() {
                let _ = write!(
                    out,
                    "\nUpdated {}",
                    updated.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            out
        }
    }
}

fn render_price(date: &str, payload: &serde_json::Value) -> String {
    match PriceSummary::from_payload(payload) {
        Ok(Some(summary)) => {
            let mut out = format!("Bitcoin price for {date}\n");
            let price = summary
                .usd_per_btc
                .map(format_usd)
                .unwrap_or_else(|| "N/A".to_string());
            let _ = writeln!(out, "  USD per BTC:   {price}");
            let _ = writeln!(
                out,
                "  Output volume: {} ({})",
                format_btc(summary.value_btc),
                format_usd(summary.value_usd)
            );
            out.trim_end().to_string()
        }
        Ok(None) => format!("No price data found for {date}."),
        Err(err) => format!("Could not read price data: {err}"),
    }
}

fn render_balance(
    network: &str,
    address: &str,
    payload: &serde_json::Value,
) -> String {
    let summary = match BalanceSummary::from_payload(payload) {
        Ok(summary) => summary,
        Err(err) => return format!("Could not read balance data: {err}"),
    };

    let mut out = format!("Address {address} ({network})\n");
    let _ = writeln!(
        out,
        "  Balance:  {} ({})",
        format_btc(summary.balance_btc()),
        format_usd(summary.balance_usd())
    );
    let _ = writeln!(
        out,
        "  Received: {} in {} outputs",
        format_btc(summary.received.value),
        summary.received.count
    );
    let _ = writeln!(
        out,
        "  Spent:    {} in {} inputs",
        format_btc(summary.spent.value),
        summary.spent.count
    );
    if let (Some(first), Some(last)) =
        (summary.first_activity(), summary.last_activity())
    {
        let _ = writeln!(out, "  Active:   {first} .. {last}");
    }
    out.trim_end().to_string()
}
