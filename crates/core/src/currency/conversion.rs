//! Rounding for presentation and settlement.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Convert at full precision, round once at the edge
//! - Round to the currency's minor units
//! - Use banker's rounding (round half to even)

use fairshare_shared::Money;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Rounds a value with banker's rounding (round half to even).
#[must_use]
pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Rounds money to its currency's minor units.
#[must_use]
pub fn round_money(money: Money) -> Money {
    Money::new(
        round(money.amount, money.currency.decimal_places()),
        money.currency,
    )
}
