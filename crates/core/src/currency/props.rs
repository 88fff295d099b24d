//! Property-based tests for conversion and allocation.

use chrono::Utc;
use fairshare_shared::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::AllocationUtil;
use super::normalizer::{convert, from_reference, to_reference};
use super::rates::RateTable;

/// Positive amounts from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive rates from 0.0001 to 10000.0000.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Live tables with an arbitrary positive rate per foreign currency.
fn rate_table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec(positive_rate(), 5).prop_map(|rates| {
        let quotes = Currency::foreign().zip(rates);
        RateTable::live(quotes, Utc::now()).expect("all foreign currencies quoted")
    })
}

fn tolerance() -> Decimal {
    Decimal::new(1, 12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Converting to the reference and back returns the original amount.
    #[test]
    fn prop_round_trip_through_reference(
        amount in positive_amount(),
        currency in any_currency(),
        table in rate_table(),
    ) {
        let reference = to_reference(amount, currency, &table).unwrap();
        let back = from_reference(reference, currency, &table).unwrap();
        prop_assert!(
            (back - amount).abs() < tolerance(),
            "{} {} came back as {}",
            amount, currency, back
        );
    }

    /// Reference amounts pass through untouched.
    #[test]
    fn prop_reference_is_identity(amount in positive_amount(), table in rate_table()) {
        prop_assert_eq!(to_reference(amount, Currency::REFERENCE, &table).unwrap(), amount);
        prop_assert_eq!(from_reference(amount, Currency::REFERENCE, &table).unwrap(), amount);
    }

    /// A cross-currency conversion preserves reference value.
    #[test]
    fn prop_convert_preserves_reference_value(
        amount in positive_amount(),
        from in any_currency(),
        to in any_currency(),
        table in rate_table(),
    ) {
        let original = Money::new(amount, from);
        let converted = convert(original, to, &table).unwrap();
        let before = to_reference(original.amount, from, &table).unwrap();
        let after = to_reference(converted.amount, to, &table).unwrap();
        prop_assert!((before - after).abs() < Decimal::new(1, 8));
    }

    /// Allocated shares always sum to the rounded total.
    #[test]
    fn prop_allocation_sum_invariant(
        total in positive_amount(),
        weights in prop::collection::vec(positive_amount(), 2..6),
        decimal_places in 0u32..=2,
    ) {
        let shares = AllocationUtil::allocate_by_weights(total, &weights, decimal_places).unwrap();
        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(
            shares.iter().copied().sum::<Decimal>(),
            total.round_dp(decimal_places)
        );
        prop_assert!(shares.iter().all(|s| !s.is_sign_negative()));
    }
}
