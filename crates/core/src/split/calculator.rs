//! Proportional split of a bill between two incomes.

use fairshare_shared::Money;
use rust_decimal::Decimal;

use crate::currency::{RateTable, from_reference, to_reference};

use super::error::{SplitError, SplitField, ValidationErrors, ViolationKind};
use super::types::{Party, PartyShare, SplitResult};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Splits `bill` so both parties pay the same share of their own income.
///
/// Incomes and bill are normalized to the reference currency; each party pays
/// `bill * income / (income_a + income_b)`, converted back to the bill
/// currency. Percentages are computed on the reference amounts, so they are
/// equal regardless of the currencies involved. Nothing is rounded.
///
/// # Errors
///
/// - `SplitError::Validation` listing every non-positive amount
/// - `SplitError::DegenerateInput` if normalized incomes sum to zero
/// - `SplitError::Rate` if a conversion fails
/// - `SplitError::Overflow` if intermediate values leave the `Decimal` range
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use fairshare_core::currency::FallbackRates;
/// use fairshare_core::split::{Party, compute_split};
/// use fairshare_shared::{Currency, Money};
/// use rust_decimal_macros::dec;
///
/// let table = FallbackRates::default().table("offline", Utc::now());
/// let a = Party::new("Ana", Money::new(dec!(1000), Currency::Ars));
/// let b = Party::new("Ben", Money::new(dec!(3000), Currency::Ars));
/// let result = compute_split(&a, &b, Money::new(dec!(400), Currency::Ars), &table).unwrap();
/// assert_eq!(result.person_a.payment.amount, dec!(100));
/// assert_eq!(result.person_b.payment.amount, dec!(300));
/// ```
pub fn compute_split(
    person_a: &Party,
    person_b: &Party,
    bill: Money,
    table: &RateTable,
) -> Result<SplitResult, SplitError> {
    validate(person_a, person_b, bill)?;

    let a_ref = to_reference(person_a.income.amount, person_a.income.currency, table)?;
    let b_ref = to_reference(person_b.income.amount, person_b.income.currency, table)?;
    let bill_ref = to_reference(bill.amount, bill.currency, table)?;

    let total = a_ref.checked_add(b_ref).ok_or(SplitError::Overflow)?;
    if total.is_zero() {
        return Err(SplitError::DegenerateInput);
    }

    let person_a = share(a_ref, total, bill_ref, bill, table)?;
    let person_b = share(b_ref, total, bill_ref, bill, table)?;

    Ok(SplitResult {
        person_a,
        person_b,
        bill,
    })
}

fn validate(person_a: &Party, person_b: &Party, bill: Money) -> Result<(), SplitError> {
    let mut errors = ValidationErrors::default();
    for (field, money) in [
        (SplitField::PersonAIncome, person_a.income),
        (SplitField::PersonBIncome, person_b.income),
        (SplitField::TotalBill, bill),
    ] {
        if !money.is_positive() {
            errors.push(field, ViolationKind::NotPositive);
        }
    }
    errors.into_result()
}

fn share(
    income_ref: Decimal,
    total_ref: Decimal,
    bill_ref: Decimal,
    bill: Money,
    table: &RateTable,
) -> Result<PartyShare, SplitError> {
    if income_ref.is_zero() {
        return Err(SplitError::DegenerateInput);
    }
    let proportion = income_ref
        .checked_div(total_ref)
        .ok_or(SplitError::DegenerateInput)?;
    let payment_ref = bill_ref.checked_mul(proportion).ok_or(SplitError::Overflow)?;
    let percentage = payment_ref
        .checked_div(income_ref)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .ok_or(SplitError::Overflow)?;
    let payment = from_reference(payment_ref, bill.currency, table)?;

    Ok(PartyShare {
        payment: Money::new(payment, bill.currency),
        percentage,
    })
}
