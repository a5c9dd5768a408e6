//! Money amounts.
//!
//! The domain works with `Decimal`; storage keeps integer minor units so
//! balance arithmetic in SQL is exact on every backend.

use rust_decimal::Decimal;

use crate::constants::{MAX_BALANCE_MINOR_UNITS, MONEY_SCALE};
use crate::error::{DomainError, DomainResult};

/// Largest amount or balance the ledger accepts.
pub fn max_balance() -> Decimal {
    from_minor_units(MAX_BALANCE_MINOR_UNITS)
}

/// Amount for a count of minor units.
pub fn from_minor_units(units: i64) -> Decimal {
    Decimal::new(units, MONEY_SCALE)
}

/// Exact count of minor units in `amount`.
///
/// # Errors
/// Fails for amounts beyond [`max_balance`] in either direction or with
/// more than [`MONEY_SCALE`] decimal places.
pub fn to_minor_units(amount: Decimal) -> DomainResult<i64> {
    if amount.abs() > max_balance() {
        return Err(DomainError::validation(format!(
            "Amount must not exceed {}",
            max_balance()
        )));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(DomainError::validation(format!(
            "Amount must have at most {} decimal places",
            MONEY_SCALE
        )));
    }

    let mut scaled = amount;
    scaled.rescale(MONEY_SCALE);
    i64::try_from(scaled.mantissa())
        .map_err(|_| DomainError::validation("Amount is out of range"))
}
