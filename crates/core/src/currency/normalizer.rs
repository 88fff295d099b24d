//! Conversions through the reference currency.
//!
//! Every conversion goes foreign -> reference -> foreign. Results are not
//! rounded here; callers round once at the edge with [`super::conversion`].

use fairshare_shared::{Currency, Money};
use rust_decimal::Decimal;

use super::error::RateError;
use super::rates::RateTable;

/// Expresses `amount` of `currency` in reference units.
///
/// # Errors
///
/// Returns `RateError::MissingRate` if the table has no rate for `currency`
/// and `RateError::Overflow` if the product does not fit a `Decimal`.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use fairshare_core::currency::{FallbackRates, to_reference};
/// use fairshare_shared::Currency;
/// use rust_decimal_macros::dec;
///
/// let table = FallbackRates::default().table("offline", Utc::now());
/// assert_eq!(to_reference(dec!(2), Currency::Usd, &table).unwrap(), dec!(2600));
/// ```
pub fn to_reference(
    amount: Decimal,
    currency: Currency,
    table: &RateTable,
) -> Result<Decimal, RateError> {
    if currency.is_reference() {
        return Ok(amount);
    }
    let rate = table.rate(currency)?;
    amount
        .checked_mul(rate)
        .ok_or(RateError::Overflow(currency))
}

/// Expresses `amount` reference units in `currency`.
///
/// # Errors
///
/// Returns `RateError::MissingRate` if the table has no rate for `currency`,
/// `RateError::DivideByZero` if the rate is zero and `RateError::Overflow`
/// if the quotient does not fit a `Decimal`.
pub fn from_reference(
    amount: Decimal,
    currency: Currency,
    table: &RateTable,
) -> Result<Decimal, RateError> {
    if currency.is_reference() {
        return Ok(amount);
    }
    let rate = table.rate(currency)?;
    if rate.is_zero() {
        return Err(RateError::DivideByZero(currency));
    }
    amount
        .checked_div(rate)
        .ok_or(RateError::Overflow(currency))
}

/// Converts `money` into `target` through the reference currency.
///
/// # Errors
///
/// Propagates the errors of [`to_reference`] and [`from_reference`].
pub fn convert(money: Money, target: Currency, table: &RateTable) -> Result<Money, RateError> {
    if money.currency == target {
        return Ok(money);
    }
    let reference = to_reference(money.amount, money.currency, table)?;
    let amount = from_reference(reference, target, table)?;
    Ok(Money::new(amount, target))
}

/// The amount expressed in every catalog currency, reference first.
///
/// # Errors
///
/// Propagates the first conversion error.
pub fn convert_across(money: Money, table: &RateTable) -> Result<Vec<Money>, RateError> {
    Currency::ALL
        .into_iter()
        .map(|target| convert(money, target, table))
        .collect()
}
