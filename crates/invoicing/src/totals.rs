//! Line-item amounts and invoice totals.
//!
//! Amounts are exact decimals. Input coming from forms is parsed permissively:
//! whatever cannot be read as a number counts as zero, so totals never fail.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::LineItem;

/// Derived totals of an invoice. Tax is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace and an optional sign are accepted, followed by digits, an
/// optional fraction and an optional exponent (`2.5E2` is 250). Parsing stops
/// at the first character that cannot continue the number (`"12.5kg"` is 12.5,
/// `"1e"` is 1). Text without a leading number yields zero; magnitudes beyond
/// the decimal range saturate at `Decimal::MAX` / `Decimal::MIN`.
pub fn parse_amount(text: &str) -> Decimal {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = digit_run(rest);
    let int_part = &rest[..int_len];
    let mut tail = &rest[int_len..];
    let frac_part = match tail.strip_prefix('.') {
        Some(after_dot) => {
            let frac_len = digit_run(after_dot);
            tail = &after_dot[frac_len..];
            &after_dot[..frac_len]
        }
        None => "",
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Decimal::ZERO;
    }

    let saturated = if negative { Decimal::MIN } else { Decimal::MAX };
    let Some(mantissa) = parse_mantissa(int_part, frac_part) else {
        return saturated;
    };
    let mantissa = if negative { -mantissa } else { mantissa };

    match parse_exponent(tail) {
        Some(exponent) => scale_by_power_of_ten(mantissa, exponent).unwrap_or(saturated),
        None => mantissa,
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// `None` when the integer part alone exceeds the decimal range. Fraction
/// digits beyond the available precision are dropped.
fn parse_mantissa(int_part: &str, frac_part: &str) -> Option<Decimal> {
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = &frac_part[..frac_part.len().min(MAX_DIGITS)];

    let mut keep = frac_part.len();
    loop {
        let candidate = if keep == 0 {
            Decimal::from_str(int_part)
        } else {
            Decimal::from_str(&format!("{int_part}.{}", &frac_part[..keep]))
        };
        match candidate {
            Ok(value) => return Some(value),
            Err(_) if keep > 0 => keep -= 1,
            Err(_) => return None,
        }
    }
}

/// Digits a `Decimal` can hold.
const MAX_DIGITS: usize = 28;

/// `e`/`E`, optional sign, at least one digit. Anything else is not an exponent.
fn parse_exponent(tail: &str) -> Option<i64> {
    let after_e = tail.strip_prefix(['e', 'E'])?;
    let (negative, digits) = match after_e.as_bytes().first() {
        Some(b'-') => (true, &after_e[1..]),
        Some(b'+') => (false, &after_e[1..]),
        _ => (false, after_e),
    };
    let len = digit_run(digits);
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    Some(if negative { -magnitude } else { magnitude })
}

/// `None` on overflow. Tiny results underflow to zero.
fn scale_by_power_of_ten(mut value: Decimal, exponent: i64) -> Option<Decimal> {
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    for _ in 0..exponent.unsigned_abs() {
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN).unwrap_or(Decimal::ZERO)
        };
        if value.is_zero() {
            break;
        }
    }
    Some(value)
}

/// `quantity × rate`; negative inputs count as zero.
pub fn line_item_amount(quantity: Decimal, rate: Decimal) -> Decimal {
    let quantity = quantity.max(Decimal::ZERO);
    let rate = rate.max(Decimal::ZERO);
    quantity.saturating_mul(rate)
}

/// [`line_item_amount`] over raw form text.
pub fn line_item_amount_from_text(quantity: &str, rate: &str) -> Decimal {
    line_item_amount(parse_amount(quantity), parse_amount(rate))
}

pub fn invoice_totals(line_items: &[LineItem]) -> InvoiceTotals {
    let subtotal = line_items
        .iter()
        .map(LineItem::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    InvoiceTotals {
        subtotal,
        tax: Decimal::ZERO,
        total: subtotal,
    }
}
