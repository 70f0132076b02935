use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Digits with at most one decimal point and at most two fractional digits.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d{0,2}$").expect("amount pattern is a valid regex"));

/// Largest amount accepted from the user (one trillion BGN).
///
/// Keeps every later step of the payroll calculation well inside the
/// `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Error returned when user input is not a usable BGN amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}': expected digits with up to two decimals")]
    InvalidFormat(String),

    #[error("amount must be greater than zero, got {0}")]
    NotPositive(Decimal),

    #[error("amount {0} is larger than the maximum of {MAX_AMOUNT}")]
    TooLarge(Decimal),
}

/// Parses a strictly positive amount such as a salary or a price. Usable as
/// a clap `value_parser`.
///
/// Input is trimmed and comma thousands separators are removed before it is
/// checked against the amount pattern.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let value = parse_unsigned(s)?;
    if value <= Decimal::ZERO {
        tracing::warn!(input = %s, "rejected non-positive amount");
        return Err(ParseAmountError::NotPositive(value));
    }
    Ok(value)
}

/// Parses an amount that may carry a leading minus sign, such as an annual
/// salary difference. Zero is accepted. Usable as a clap `value_parser`.
pub fn parse_signed_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    match s.trim().strip_prefix('-') {
        Some(magnitude) => Ok(-parse_unsigned(magnitude)?),
        None => parse_unsigned(s),
    }
}

fn parse_unsigned(input: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(input);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    if !AMOUNT_PATTERN.is_match(&normalized) {
        return Err(ParseAmountError::InvalidFormat(input.to_string()));
    }
    // The pattern admits "100." and ".5"; give the decimal parser whole digits.
    let trimmed = normalized.strip_suffix('.').unwrap_or(&normalized);
    let digits = match trimmed.strip_prefix('.') {
        Some(fraction) => format!("0.{fraction}"),
        None => trimmed.to_string(),
    };
    let value = Decimal::from_str(&digits).map_err(|e| {
        tracing::error!(input = %input, "invalid amount: {}", e);
        ParseAmountError::InvalidFormat(input.to_string())
    })?;
    if value > MAX_AMOUNT {
        return Err(ParseAmountError::TooLarge(value));
    }
    Ok(value)
}

/// Normalizes input for amount parsing: trims whitespace and removes commas
/// (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}
