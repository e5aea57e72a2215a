//! Lot field rules shared by create and edit.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::CoreError;

/// Largest hourly price accepted (fits `NUMERIC(10, 2)`).
pub const MAX_PRICE_PER_HOUR: Decimal = dec!(100000000);

/// Prices are non-negative and at most two decimal places.
pub fn validate_price_per_hour(price: Decimal) -> Result<(), CoreError> {
    if price < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "price_per_hour must not be negative, got {price}"
        )));
    }
    if price >= MAX_PRICE_PER_HOUR {
        return Err(CoreError::Validation(format!(
            "price_per_hour must be below {MAX_PRICE_PER_HOUR}, got {price}"
        )));
    }
    if price.normalize().scale() > 2 {
        return Err(CoreError::Validation(format!(
            "price_per_hour has more than two decimal places: {price}"
        )));
    }
    Ok(())
}

/// Trim a free-text field, treating blank input as absent.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
