use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::errors::MoneyError;

/// Parses a monetary field from the raw export.
///
/// Upstream formatting occasionally prefixes amounts with currency symbols or
/// similar non-numeric noise. Everything before the first ASCII digit is
/// discarded, then the remainder must parse as a decimal with at most one
/// decimal point.
pub fn parse_money(value: &str) -> Result<Decimal, MoneyError> {
    let value = value.trim();

    let start = value
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| MoneyError::NoDigits(value.to_string()))?;

    Decimal::from_str(&value[start..]).map_err(|error| MoneyError::InvalidFormat {
        value: value.to_string(),
        detail: error.to_string()
    })
}
