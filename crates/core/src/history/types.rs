//! Saved calculations and per-owner statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fairshare_shared::types::{CalculationId, UserId};
use fairshare_shared::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::round;
use crate::split::{SplitInput, SplitResult};

/// Decimal places kept for stored percentages.
pub const PERCENTAGE_PLACES: u32 = 6;

/// Input for saving a calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalculation {
    /// Record ID.
    pub id: CalculationId,
    /// Owner of the record.
    pub owner: UserId,
    /// First participant's name.
    pub person_a_name: String,
    /// Second participant's name.
    pub person_b_name: String,
    /// First participant's income.
    pub person_a_income: Money,
    /// Second participant's income.
    pub person_b_income: Money,
    /// The bill.
    pub bill: Money,
    /// First participant's settled payment, in the bill currency.
    pub person_a_payment: Decimal,
    /// Second participant's settled payment, in the bill currency.
    pub person_b_payment: Decimal,
    /// First participant's percentage of income.
    pub person_a_percentage: Decimal,
    /// Second participant's percentage of income.
    pub person_b_percentage: Decimal,
}

impl NewCalculation {
    /// Builds a record from a computed split.
    ///
    /// Payments are stored settled (minor units, summing to the bill) and
    /// percentages rounded to [`PERCENTAGE_PLACES`].
    #[must_use]
    pub fn from_split(owner: UserId, input: &SplitInput, result: &SplitResult) -> Self {
        let settled = result.settled();
        Self {
            id: CalculationId::new(),
            owner,
            person_a_name: input.person_a.name.clone(),
            person_b_name: input.person_b.name.clone(),
            person_a_income: input.person_a.income,
            person_b_income: input.person_b.income,
            bill: input.bill,
            person_a_payment: settled.person_a.amount,
            person_b_payment: settled.person_b.amount,
            person_a_percentage: round(result.person_a.percentage, PERCENTAGE_PLACES),
            person_b_percentage: round(result.person_b.percentage, PERCENTAGE_PLACES),
        }
    }
}

/// A saved calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Record ID.
    pub id: CalculationId,
    /// Owner of the record.
    pub owner: UserId,
    /// First participant's name.
    pub person_a_name: String,
    /// Second participant's name.
    pub person_b_name: String,
    /// First participant's income.
    pub person_a_income: Money,
    /// Second participant's income.
    pub person_b_income: Money,
    /// The bill.
    pub bill: Money,
    /// First participant's payment, in the bill currency.
    pub person_a_payment: Decimal,
    /// Second participant's payment, in the bill currency.
    pub person_b_payment: Decimal,
    /// First participant's percentage of income.
    pub person_a_percentage: Decimal,
    /// Second participant's percentage of income.
    pub person_b_percentage: Decimal,
    /// When the record was saved.
    pub created_at: DateTime<Utc>,
}

impl CalculationRecord {
    /// Materializes a new calculation as stored at `created_at`.
    #[must_use]
    pub fn from_new(new: NewCalculation, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new.id,
            owner: new.owner,
            person_a_name: new.person_a_name,
            person_b_name: new.person_b_name,
            person_a_income: new.person_a_income,
            person_b_income: new.person_b_income,
            bill: new.bill,
            person_a_payment: new.person_a_payment,
            person_b_payment: new.person_b_payment,
            person_a_percentage: new.person_a_percentage,
            person_b_percentage: new.person_b_percentage,
            created_at,
        }
    }
}

/// Aggregate statistics over one owner's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationStats {
    /// Number of saved calculations.
    pub total_calculations: u64,
    /// Most frequent bill currency.
    pub most_used_currency: Option<Currency>,
    /// Mean of raw bill amounts, regardless of currency.
    pub average_bill_amount: Decimal,
    /// Newest `created_at`.
    pub last_calculation_date: Option<DateTime<Utc>>,
}

impl CalculationStats {
    /// Computes statistics from records in any order.
    ///
    /// Currency ties go to the one used most recently. The average is a
    /// plain mean of bill amounts rounded to two places.
    #[must_use]
    pub fn from_records(records: &[CalculationRecord]) -> Self {
        let mut usage: BTreeMap<Currency, (u64, DateTime<Utc>)> = BTreeMap::new();

        for record in records {
            let entry = usage
                .entry(record.bill.currency)
                .or_insert((0, record.created_at));
            entry.0 += 1;
            entry.1 = entry.1.max(record.created_at);
        }

        let most_used_currency = usage
            .into_iter()
            .max_by_key(|(_, (count, last_used))| (*count, *last_used))
            .map(|(currency, _)| currency);

        let total = u64::try_from(records.len()).unwrap_or(u64::MAX);
        let average_bill_amount = round(mean(records.iter().map(|r| r.bill.amount)), 2);

        Self {
            total_calculations: total,
            most_used_currency,
            average_bill_amount,
            last_calculation_date: records.iter().map(|r| r.created_at).max(),
        }
    }
}

/// Mean of the amounts, zero when empty.
///
/// Sums directly while the total fits a `Decimal`, then switches to the
/// running form `mean += (x - mean) / n`, which stays within the range of the
/// inputs.
fn mean(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    let mut sum = Some(Decimal::ZERO);
    let mut running = Decimal::ZERO;
    let mut count = Decimal::ZERO;

    for amount in amounts {
        count += Decimal::ONE;
        sum = sum.and_then(|s| s.checked_add(amount));
        running += (amount - running) / count;
    }

    match sum {
        _ if count.is_zero() => Decimal::ZERO,
        Some(sum) => sum / count,
        None => running,
    }
}
