//! Rate errors.

use fairshare_shared::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while obtaining rates or converting through them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Network, HTTP status, or decoding failure talking to the rate source.
    #[error("rate source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source response did not include a required currency.
    #[error("rate for {0} missing from source response")]
    MissingRate(Currency),

    /// The source quoted a non-positive rate.
    #[error("rate for {currency} must be positive, got {rate}")]
    InvalidRate {
        /// Currency with the bad quote.
        currency: Currency,
        /// The quoted value.
        rate: Decimal,
    },

    /// A zero rate was hit while converting out of the reference currency.
    #[error("rate for {0} is zero")]
    DivideByZero(Currency),

    /// Conversion result does not fit in a `Decimal`.
    #[error("amount overflow converting {0}")]
    Overflow(Currency),
}

impl RateError {
    /// Returns true for fetch failures that the fallback table recovers from.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable(_) | Self::MissingRate(_) | Self::InvalidRate { .. }
        )
    }
}
