//! Static fallback rates used when the rate source cannot be reached.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fairshare_shared::Currency;
use rust_decimal::Decimal;

use super::error::RateError;
use super::rates::{RateStatus, RateTable};

/// Built-in fallback rate for a foreign currency (ARS per unit).
#[must_use]
pub fn default_fallback_rate(currency: Currency) -> Decimal {
    match currency {
        Currency::Ars => Decimal::ONE,
        Currency::Usd => Decimal::from(1300),
        Currency::Eur => Decimal::from(1550),
        Currency::Brl => Decimal::from(244),
        Currency::Clp => Decimal::new(137, 2),
        Currency::Uyu => Decimal::new(3306, 2),
    }
}

/// Fallback constants, optionally overridden per currency.
#[derive(Debug, Clone)]
pub struct FallbackRates {
    template: RateTable,
}

impl Default for FallbackRates {
    fn default() -> Self {
        let rates = Currency::foreign()
            .map(|c| (c, default_fallback_rate(c)))
            .collect();
        Self {
            template: RateTable::from_trusted(rates, RateStatus::Live, DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

impl FallbackRates {
    /// Built-in constants with `overrides` applied on top.
    ///
    /// # Errors
    ///
    /// Returns `RateError::InvalidRate` if an override is not positive.
    pub fn with_overrides(overrides: &BTreeMap<Currency, Decimal>) -> Result<Self, RateError> {
        let rates = Currency::foreign().map(|c| {
            let rate = overrides
                .get(&c)
                .copied()
                .unwrap_or_else(|| default_fallback_rate(c));
            (c, rate)
        });
        let template = RateTable::build(rates, RateStatus::Live, DateTime::<Utc>::UNIX_EPOCH)?;
        Ok(Self { template })
    }

    /// Produces a degraded table stamped with the failure time.
    #[must_use]
    pub fn table(&self, reason: impl Into<String>, failed_at: DateTime<Utc>) -> RateTable {
        self.template.clone().restamp(
            RateStatus::Fallback {
                reason: reason.into(),
            },
            failed_at,
        )
    }

    /// The fallback rate for a currency.
    #[must_use]
    pub fn rate(&self, currency: Currency) -> Decimal {
        self.template
            .rate(currency)
            .unwrap_or_else(|_| default_fallback_rate(currency))
    }
}
