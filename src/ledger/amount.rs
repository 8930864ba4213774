//! Amount validation applied before records reach the aggregator.

use rust_decimal::Decimal;

use crate::errors::LedgerError;

/// Accepts a decimal amount only when it is non-negative.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(amount)
}

/// Converts a float coming from a form or loosely typed payload into a decimal.
///
/// NaN, infinities and negative values are rejected.
pub fn amount_from_f64(value: f64) -> Result<Decimal, LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be finite, got {value}"
        )));
    }
    let amount = Decimal::try_from(value)
        .map_err(|err| LedgerError::InvalidAmount(format!("{value}: {err}")))?;
    validate_amount(amount)
}

/// Parses a textual amount such as `"1250.50"`.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let amount = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidAmount(format!("`{raw}` is not a number")))?;
    validate_amount(amount)
}
