//! Split domain types.

use fairshare_shared::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{AllocationUtil, RateError, RateTable, convert_across, round_money};

use super::calculator::compute_split;
use super::error::SplitError;

/// Default name for the first participant.
pub const DEFAULT_PERSON_A: &str = "Person A";
/// Default name for the second participant.
pub const DEFAULT_PERSON_B: &str = "Person B";

/// One of the two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name.
    pub name: String,
    /// Income, in any catalog currency.
    pub income: Money,
}

impl Party {
    /// Creates a party.
    #[must_use]
    pub fn new(name: impl Into<String>, income: Money) -> Self {
        Self {
            name: name.into(),
            income,
        }
    }
}

/// Validated input for a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitInput {
    /// First participant.
    pub person_a: Party,
    /// Second participant.
    pub person_b: Party,
    /// Bill to divide.
    pub bill: Money,
}

impl SplitInput {
    /// Runs [`compute_split`] on this input.
    ///
    /// # Errors
    ///
    /// See [`compute_split`].
    pub fn compute(&self, table: &RateTable) -> Result<SplitResult, SplitError> {
        compute_split(&self.person_a, &self.person_b, self.bill, table)
    }
}

/// One participant's side of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyShare {
    /// Amount owed, in the bill currency, unrounded.
    pub payment: Money,
    /// Payment as a percentage of the participant's own income.
    pub percentage: Decimal,
}

/// Outcome of a proportional split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    /// First participant's share.
    pub person_a: PartyShare,
    /// Second participant's share.
    pub person_b: PartyShare,
    /// The bill that was split.
    pub bill: Money,
}

/// Payments rounded to the bill currency's minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledSplit {
    /// First participant pays.
    pub person_a: Money,
    /// Second participant pays.
    pub person_b: Money,
}

impl SplitResult {
    /// Rounds both payments so they sum exactly to the bill.
    ///
    /// A bill finer than the currency's minor units is rounded first; forms
    /// reject such bills, so only direct callers can hit that case.
    #[must_use]
    pub fn settled(&self) -> SettledSplit {
        let currency = self.bill.currency;
        let weights = [self.person_a.payment.amount, self.person_b.payment.amount];
        let shares =
            AllocationUtil::allocate_by_weights(self.bill.amount, &weights, currency.decimal_places());

        match shares.as_deref() {
            Some(&[a, b]) => SettledSplit {
                person_a: Money::new(a, currency),
                person_b: Money::new(b, currency),
            },
            _ => SettledSplit {
                person_a: round_money(self.person_a.payment),
                person_b: round_money(self.person_b.payment),
            },
        }
    }

    /// The common percentage both participants pay.
    #[must_use]
    pub fn percentage(&self) -> Decimal {
        self.person_a.percentage
    }

    /// Each payment expressed in every catalog currency.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors from the rate table.
    pub fn breakdown(&self, table: &RateTable) -> Result<PaymentBreakdown, RateError> {
        let round_all =
            |amounts: Vec<Money>| -> Vec<Money> { amounts.into_iter().map(round_money).collect() };
        Ok(PaymentBreakdown {
            person_a: round_all(convert_across(self.person_a.payment, table)?),
            person_b: round_all(convert_across(self.person_b.payment, table)?),
        })
    }
}

/// Payments across every currency, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// First participant's payment in each currency.
    pub person_a: Vec<Money>,
    /// Second participant's payment in each currency.
    pub person_b: Vec<Money>,
}

impl PaymentBreakdown {
    /// First participant's payment in `currency`.
    #[must_use]
    pub fn person_a_in(&self, currency: Currency) -> Option<Money> {
        self.person_a.iter().copied().find(|m| m.currency == currency)
    }

    /// Second participant's payment in `currency`.
    #[must_use]
    pub fn person_b_in(&self, currency: Currency) -> Option<Money> {
        self.person_b.iter().copied().find(|m| m.currency == currency)
    }
}
