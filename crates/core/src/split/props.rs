//! Property-based tests for the split calculator.

use chrono::Utc;
use fairshare_shared::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::currency::{RateTable, to_reference};

use super::calculator::compute_split;
use super::types::Party;

/// Positive amounts from 0.01 to 10,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive rates from 0.01 to 5000.00.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

fn rate_table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec(positive_rate(), 5).prop_map(|rates| {
        RateTable::live(Currency::foreign().zip(rates), Utc::now())
            .expect("all foreign currencies quoted")
    })
}

fn money() -> impl Strategy<Value = Money> {
    (positive_amount(), any_currency()).prop_map(|(amount, currency)| Money::new(amount, currency))
}

/// Relative tolerance for quantities that went through several divisions.
fn approx_eq(a: Decimal, b: Decimal) -> bool {
    let scale = a.abs().max(b.abs()).max(Decimal::ONE);
    (a - b).abs() <= scale * Decimal::new(1, 18)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Single currency: payments sum to the bill and percentages match.
    #[test]
    fn prop_single_currency_sum_and_equality(
        a in positive_amount(),
        b in positive_amount(),
        bill in positive_amount(),
        currency in any_currency(),
        table in rate_table(),
    ) {
        let result = compute_split(
            &Party::new("A", Money::new(a, currency)),
            &Party::new("B", Money::new(b, currency)),
            Money::new(bill, currency),
            &table,
        ).unwrap();

        let sum = result.person_a.payment.amount + result.person_b.payment.amount;
        prop_assert!(approx_eq(sum, bill), "sum {} != bill {}", sum, bill);
        prop_assert!(approx_eq(result.person_a.percentage, result.person_b.percentage));
    }

    /// Mixed currencies: percentages match and payments cover the bill in reference terms.
    #[test]
    fn prop_cross_currency_equal_percentages(
        a in money(),
        b in money(),
        bill in money(),
        table in rate_table(),
    ) {
        let result = compute_split(&Party::new("A", a), &Party::new("B", b), bill, &table).unwrap();

        prop_assert_eq!(result.person_a.payment.currency, bill.currency);
        prop_assert!(approx_eq(result.person_a.percentage, result.person_b.percentage));
        prop_assert!(result.person_a.percentage >= Decimal::ZERO);

        let paid_ref = to_reference(
            result.person_a.payment.amount + result.person_b.payment.amount,
            bill.currency,
            &table,
        ).unwrap();
        let bill_ref = to_reference(bill.amount, bill.currency, &table).unwrap();
        prop_assert!(approx_eq(paid_ref, bill_ref), "paid {} vs bill {}", paid_ref, bill_ref);
    }

    /// Settled payments are in minor units and sum exactly to the bill.
    #[test]
    fn prop_settled_sum_equals_bill(
        a in money(),
        b in money(),
        bill in money(),
        table in rate_table(),
    ) {
        let result = compute_split(&Party::new("A", a), &Party::new("B", b), bill, &table).unwrap();
        let settled = result.settled();
        let places = bill.currency.decimal_places();

        prop_assert_eq!(
            settled.person_a.amount + settled.person_b.amount,
            bill.amount.round_dp(places)
        );
        prop_assert!(settled.person_a.amount.scale() <= places);
        prop_assert!(settled.person_b.amount.scale() <= places);
    }

    /// Any non-positive input is rejected.
    #[test]
    fn prop_non_positive_rejected(
        a in -1_000i64..=0,
        b in positive_amount(),
        table in rate_table(),
    ) {
        let result = compute_split(
            &Party::new("A", Money::new(Decimal::from(a), Currency::Ars)),
            &Party::new("B", Money::new(b, Currency::Ars)),
            Money::new(b, Currency::Ars),
            &table,
        );
        prop_assert!(result.is_err_and(|e| e.is_validation()));
    }
}
