//! Raw split input as typed by a user.

use std::str::FromStr;

use fairshare_shared::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{SplitError, SplitField, ValidationErrors, ViolationKind};
use super::types::{DEFAULT_PERSON_A, DEFAULT_PERSON_B, Party, SplitInput};

/// Largest income or bill accepted from a form.
///
/// Keeps every reference conversion and proportion well inside the `Decimal`
/// range for any realistic rate.
// 1_000_000_000_000_000 (10^15), built with the const `from_parts`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// An amount as text (`"1,250.50"`) or as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// Text, possibly with thousands separators.
    Text(String),
    /// A plain number.
    Number(serde_json::Number),
}

impl AmountInput {
    /// Parses the amount, stripping `,` separators and whitespace.
    ///
    /// Returns `None` for empty or non-numeric input.
    #[must_use]
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            Self::Text(text) => parse_decimal(&text.replace(',', "")),
            Self::Number(number) => parse_decimal(&number.to_string()),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Calculator form: two names, two incomes and a bill, each with a currency.
///
/// Currencies default to the reference currency and names to
/// `Person A` / `Person B`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitForm {
    /// First person's display name.
    pub person_a_name: Option<String>,
    /// Second person's display name.
    pub person_b_name: Option<String>,
    /// First person's income.
    pub person_a_income: Option<AmountInput>,
    /// Second person's income.
    pub person_b_income: Option<AmountInput>,
    /// Currency of the first income.
    pub person_a_currency: Option<Currency>,
    /// Currency of the second income.
    pub person_b_currency: Option<Currency>,
    /// Bill amount.
    pub total_bill: Option<AmountInput>,
    /// Currency of the bill.
    pub bill_currency: Option<Currency>,
}

impl SplitForm {
    /// Validates every field in one pass and builds a [`SplitInput`].
    ///
    /// # Errors
    ///
    /// Returns `SplitError::Validation` listing every rejected amount in
    /// field order. Amounts above [`MAX_AMOUNT`] and bills with more
    /// decimals than the bill currency's minor units are rejected too, so the
    /// settled payments always add up to the bill as entered.
    pub fn parse(&self) -> Result<SplitInput, SplitError> {
        let mut errors = ValidationErrors::default();
        let bill_currency = currency_or_reference(self.bill_currency);

        let person_a_income = amount(
            self.person_a_income.as_ref(),
            SplitField::PersonAIncome,
            &mut errors,
        );
        let person_b_income = amount(
            self.person_b_income.as_ref(),
            SplitField::PersonBIncome,
            &mut errors,
        );
        let total_bill = amount(self.total_bill.as_ref(), SplitField::TotalBill, &mut errors)
            .filter(|bill| {
                let fits = bill.normalize().scale() <= bill_currency.decimal_places();
                if !fits {
                    errors.push(SplitField::TotalBill, ViolationKind::TooPrecise);
                }
                fits
            });

        match (person_a_income, person_b_income, total_bill) {
            (Some(a), Some(b), Some(bill)) if errors.is_empty() => Ok(SplitInput {
                person_a: Party::new(
                    display_name(self.person_a_name.as_deref(), DEFAULT_PERSON_A),
                    Money::new(a, currency_or_reference(self.person_a_currency)),
                ),
                person_b: Party::new(
                    display_name(self.person_b_name.as_deref(), DEFAULT_PERSON_B),
                    Money::new(b, currency_or_reference(self.person_b_currency)),
                ),
                bill: Money::new(bill, bill_currency),
            }),
            _ => Err(SplitError::Validation(errors)),
        }
    }
}

fn amount(
    input: Option<&AmountInput>,
    field: SplitField,
    errors: &mut ValidationErrors,
) -> Option<Decimal> {
    match input.and_then(AmountInput::parse) {
        None => {
            errors.push(field, ViolationKind::NotNumeric);
            None
        }
        Some(value) if value <= Decimal::ZERO => {
            errors.push(field, ViolationKind::NotPositive);
            None
        }
        Some(value) if value > MAX_AMOUNT => {
            errors.push(field, ViolationKind::TooLarge);
            None
        }
        Some(value) => Some(value),
    }
}

fn display_name(name: Option<&str>, default: &str) -> String {
    match name.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        _ => default.to_string(),
    }
}

const fn currency_or_reference(currency: Option<Currency>) -> Currency {
    match currency {
        Some(c) => c,
        None => Currency::REFERENCE,
    }
}
