//! Display formatting for amounts and dates (en-US conventions).

use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Rendered for dates that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Symbol prefix for an ISO 4217 code; unknown codes render as `"CODE "`.
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{other} "),
    }
}

/// `₹4,015.00`, `-$1,234.50`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{sign}{}{}.{frac_part}",
        currency_symbol(currency),
        group_thousands(int_part)
    )
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Jan 15, 2024`.
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format an ISO date (`2024-01-15`) or an RFC 3339 timestamp for display.
///
/// Timestamps are shown in their own offset's calendar date.
pub fn format_date(text: &str) -> String {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return format_naive_date(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return format_naive_date(ts.date_naive());
    }
    INVALID_DATE.to_string()
}
