//! Display helpers for currency amounts.

/// `$1,234.56`; negative amounts render as `-$1,234.56`.
pub fn format_usd(amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (whole, fraction) =
        rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let sign = if amount < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// `0.12345678 BTC`
pub fn format_btc(amount: f64) -> String {
    format!("{amount:.8} BTC")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
