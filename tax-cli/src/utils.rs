use rust_decimal::Decimal;
use tax_core::{InputRangeError, check_amount, check_rate};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`] in range.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid amount '{input}': {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: InputRangeError,
    },
}

/// Strips whitespace, a leading `$`, and `,` thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    unsigned.replace(',', "")
}

fn parse_bounded(
    s: &str,
    check: fn(Decimal) -> Result<Decimal, InputRangeError>,
) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value: Decimal = normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })?;
    check(value).map_err(|source| ParseDecimalError::OutOfRange {
        input: s.to_string(),
        source,
    })
}

/// Parses an amount typed by a person, e.g. `"200,000"` or `"$1,234.56"`.
///
/// Empty or whitespace-only input is treated as 0. Amounts beyond
/// [`tax_core::MAX_AMOUNT`] are rejected.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    parse_bounded(s, check_amount)
}

/// Parses a rate given as a fraction, e.g. `"0.30"`, bounded by
/// [`tax_core::MAX_RATE`].
pub fn parse_rate(s: &str) -> Result<Decimal, ParseDecimalError> {
    parse_bounded(s, check_rate)
}

/// Formats an amount as dollars with thousands separators, e.g. `$1,234.56`.
///
/// Negative amounts render as `-$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let cents = value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", cents.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{fraction}", group_thousands(whole))
}

/// Formats a fraction as a whole-ish percentage, e.g. `0.25` as `25%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
