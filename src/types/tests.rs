use super::{parse_money, MoneyError};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

#[test]
fn test_parse_money_accepts_plain_decimals() -> Result<()> {
    let test_cases = vec![
        ("123.45", "123.45"),
        ("0.00", "0.00"),
        ("100", "100"),
        ("  42.5  ", "42.5"),
        ("9839.64", "9839.64"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(parse_money(input_string)?, Decimal::from_str(expected_output)?);
    }

    Ok(())
}

#[test]
fn test_parse_money_strips_leading_non_numeric_noise() -> Result<()> {
    assert_eq!(parse_money("$1234.56")?, Decimal::from_str("1234.56")?);
    assert_eq!(parse_money("USD 99.10")?, Decimal::from_str("99.10")?);
    assert_eq!(parse_money("~~181.00")?, Decimal::from_str("181.00")?);

    Ok(())
}

#[test]
fn test_parse_money_rejects_values_without_digits() {
    let result = parse_money("no money here");

    assert!(matches!(result, Err(MoneyError::NoDigits(_))));
}

#[test]
fn test_parse_money_rejects_multiple_decimal_points() {
    let result = parse_money("1.2.3");

    assert!(matches!(result, Err(MoneyError::InvalidFormat { .. })));
}

#[test]
fn test_parse_money_rejects_empty_strings() {
    assert!(parse_money("").is_err());
    assert!(parse_money("   ").is_err());
}
