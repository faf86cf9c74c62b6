//! Display formatting for money, sale timestamps and sold counts.

use std::collections::BTreeMap;

use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

/// Formats `amount` as e.g. `1,234.50`.
pub fn format_decimal(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{whole}.{:02}", cents % 100)
}

/// Formats `amount` with a leading currency symbol, e.g. `$1,234.50` or `-$3.00`.
pub fn format_currency(symbol: &str, amount: f64) -> String {
    let formatted = format_decimal(amount);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-{symbol}{rest}"),
        None => format!("{symbol}{formatted}"),
    }
}

/// Renders an RFC 3339 ledger stamp as `2026-10-19 09:05 UTC`. Unparsable stamps are shown as is.
pub fn format_timestamp(stamp: &str) -> String {
    let display = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    OffsetDateTime::parse(stamp, &Rfc3339)
        .ok()
        .and_then(|at| at.to_offset(time::UtcOffset::UTC).format(&display).ok())
        .unwrap_or_else(|| stamp.to_string())
}

/// `Potato × 10, Tomato × 6`, or `No produce` for an empty sale.
pub fn format_counts(counts: &BTreeMap<String, u32>) -> String {
    if counts.is_empty() {
        return "No produce".to_string();
    }
    counts
        .iter()
        .map(|(name, count)| format!("{name} × {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_and_groups() {
        assert_eq!(format_decimal(0.0), "0.00");
        assert_eq!(format_decimal(15.0), "15.00");
        assert_eq!(format_decimal(2.5), "2.50");
        assert_eq!(format_decimal(1234.5), "1,234.50");
        assert_eq!(format_decimal(1_000_000.0), "1,000,000.00");
    }

    #[test]
    fn currency_sign_goes_before_symbol() {
        assert_eq!(format_currency("$", 15.0), "$15.00");
        assert_eq!(format_currency("$", -3.0), "-$3.00");
        assert_eq!(format_currency("€", 0.004), "€0.00");
    }

    #[test]
    fn non_finite_is_zero() {
        assert_eq!(format_decimal(f64::NAN), "0.00");
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_timestamp("2026-10-19T09:05:30Z"), "2026-10-19 09:05 UTC");
        assert_eq!(format_timestamp("2026-10-19T11:05:30+02:00"), "2026-10-19 09:05 UTC");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn counts_are_listed_by_name() {
        let counts = BTreeMap::from([("Tomato".to_string(), 6), ("Potato".to_string(), 10)]);
        assert_eq!(format_counts(&counts), "Potato × 10, Tomato × 6");
        assert_eq!(format_counts(&BTreeMap::new()), "No produce");
    }
}
