//! Split error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::currency::RateError;

/// Input field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitField {
    /// First person's income.
    PersonAIncome,
    /// Second person's income.
    PersonBIncome,
    /// The bill to split.
    TotalBill,
}

impl SplitField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PersonAIncome => "person_a_income",
            Self::PersonBIncome => "person_b_income",
            Self::TotalBill => "total_bill",
        }
    }

    /// Message for a missing, non-numeric or non-positive value.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PersonAIncome => "Person A income must be a positive number",
            Self::PersonBIncome => "Person B income must be a positive number",
            Self::TotalBill => "Total bill must be a positive number",
        }
    }

    const fn too_large_message(self) -> &'static str {
        match self {
            Self::PersonAIncome => "Person A income is too large",
            Self::PersonBIncome => "Person B income is too large",
            Self::TotalBill => "Total bill is too large",
        }
    }
}

/// What was wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Empty or not a number.
    NotNumeric,
    /// Zero or negative.
    NotPositive,
    /// Above [`MAX_AMOUNT`](super::form::MAX_AMOUNT).
    TooLarge,
    /// More decimals than the bill currency's minor units.
    TooPrecise,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field that failed.
    pub field: SplitField,
    /// Reason it failed.
    pub kind: ViolationKind,
    /// Human readable message.
    pub message: &'static str,
}

impl FieldViolation {
    /// Creates a violation with the message for its field and kind.
    #[must_use]
    pub const fn new(field: SplitField, kind: ViolationKind) -> Self {
        let message = match kind {
            ViolationKind::NotNumeric | ViolationKind::NotPositive => field.message(),
            ViolationKind::TooLarge => field.too_large_message(),
            ViolationKind::TooPrecise => "Total bill has more decimals than its currency allows",
        };
        Self {
            field,
            kind,
            message,
        }
    }
}

/// Every violation found in one pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, field: SplitField, kind: ViolationKind) {
        self.0.push(FieldViolation::new(field, kind));
    }

    /// Returns true if nothing was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rejected fields.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Fails with `SplitError::Validation` if anything was rejected.
    pub(crate) fn into_result(self) -> Result<(), SplitError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SplitError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Split calculation errors.
#[derive(Debug, Error)]
pub enum SplitError {
    /// One or more inputs were rejected.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Normalized incomes sum to zero.
    #[error("combined income is zero after normalization")]
    DegenerateInput,

    /// Intermediate arithmetic left the `Decimal` range.
    #[error("amount overflow while splitting")]
    Overflow,

    /// Conversion through the rate table failed.
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl SplitError {
    /// Returns true for errors caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true when the amounts were too large to convert or divide.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Overflow | Self::Rate(RateError::Overflow(_)))
    }
}
