use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::MAX_AMOUNT_UNITS;
use crate::errors::ValidationError;

/// Parses raw text into a decimal, accepting `,` or `.` as decimal separator.
///
/// Only an optional sign, digits and a single separator are accepted; thousands
/// grouping and trailing characters are rejected.
fn parse_decimal(raw: &str, field: &str) -> Result<Option<Decimal>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
    };

    let unsigned = trimmed
        .strip_prefix(['-', '+'])
        .unwrap_or(trimmed);
    let separators = unsigned.chars().filter(|c| *c == ',' || *c == '.').count();
    let digits = unsigned.chars().filter(char::is_ascii_digit).count();
    if separators > 1 || digits == 0 || digits + separators != unsigned.len() {
        return Err(not_a_number());
    }

    let canonical = trimmed.replace(',', ".");
    let value = Decimal::from_str(&canonical).map_err(|_| not_a_number())?;
    if value.abs() > Decimal::from(MAX_AMOUNT_UNITS) {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
        });
    }
    Ok(Some(value))
}

/// Normalizes a raw monetary input into a positive decimal.
///
/// Rejects empty input, non-numeric input, values less than or equal to zero
/// and values above `MAX_AMOUNT_UNITS`.
pub fn normalize_amount(raw: &str, field: &str) -> Result<Decimal, ValidationError> {
    let value =
        parse_decimal(raw, field)?.ok_or_else(|| ValidationError::MissingField(field.to_string()))?;
    validate_amount(value, field)
}

/// Normalizes an optional raw amount that may be zero. Empty input yields zero.
pub fn normalize_non_negative_amount(raw: &str, field: &str) -> Result<Decimal, ValidationError> {
    match parse_decimal(raw, field)? {
        None => Ok(Decimal::ZERO),
        Some(value) if value.is_sign_negative() && !value.is_zero() => {
            Err(ValidationError::Negative {
                field: field.to_string(),
            })
        }
        Some(value) => Ok(value),
    }
}

/// Checks that an already-decoded amount is strictly positive.
pub fn validate_amount(value: Decimal, field: &str) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
        });
    }
    Ok(value)
}
