//! Proportional bill splitting between two incomes.

pub mod calculator;
pub mod error;
pub mod form;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::compute_split;
pub use error::{FieldViolation, SplitError, SplitField, ValidationErrors, ViolationKind};
pub use form::{AmountInput, MAX_AMOUNT, SplitForm};
pub use types::{
    DEFAULT_PERSON_A, DEFAULT_PERSON_B, Party, PartyShare, PaymentBreakdown, SettledSplit,
    SplitInput, SplitResult,
};
