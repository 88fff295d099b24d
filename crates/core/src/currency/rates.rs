//! Rate tables quoted against the reference currency.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fairshare_shared::Currency;
use rust_decimal::Decimal;

use super::error::RateError;

/// Where the rates in a table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateStatus {
    /// Fetched successfully from the rate source.
    Live,
    /// Static fallback constants used after a failed fetch.
    Fallback {
        /// Why the fetch failed.
        reason: String,
    },
}

impl RateStatus {
    /// Short machine-readable label (`live` or `fallback`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback { .. } => "fallback",
        }
    }
}

/// Immutable snapshot of rates: one reference unit amount per foreign unit.
///
/// `reference = foreign_amount * rate`. The reference currency is implicitly
/// 1 and never stored. Every foreign currency is present and positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<Currency, Decimal>,
    status: RateStatus,
    updated_at: DateTime<Utc>,
}

impl RateTable {
    /// Builds a live table from quoted rates.
    ///
    /// Entries for the reference currency are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RateError::MissingRate` if a foreign currency has no quote
    /// and `RateError::InvalidRate` if a quote is zero or negative.
    pub fn live(
        quotes: impl IntoIterator<Item = (Currency, Decimal)>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, RateError> {
        Self::build(quotes, RateStatus::Live, updated_at)
    }

    pub(crate) fn build(
        quotes: impl IntoIterator<Item = (Currency, Decimal)>,
        status: RateStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, RateError> {
        let quoted: BTreeMap<Currency, Decimal> = quotes
            .into_iter()
            .filter(|(currency, _)| !currency.is_reference())
            .collect();

        let mut rates = BTreeMap::new();
        for currency in Currency::foreign() {
            let rate = *quoted
                .get(&currency)
                .ok_or(RateError::MissingRate(currency))?;
            if rate <= Decimal::ZERO {
                return Err(RateError::InvalidRate { currency, rate });
            }
            rates.insert(currency, rate);
        }

        Ok(Self {
            rates,
            status,
            updated_at,
        })
    }

    /// Wraps rates already known to cover every foreign currency.
    pub(crate) fn from_trusted(
        rates: BTreeMap<Currency, Decimal>,
        status: RateStatus,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            rates,
            status,
            updated_at,
        }
    }

    /// Same rates under a new status and timestamp.
    pub(crate) fn restamp(self, status: RateStatus, updated_at: DateTime<Utc>) -> Self {
        Self {
            rates: self.rates,
            status,
            updated_at,
        }
    }

    /// Returns the rate for a currency; 1 for the reference.
    ///
    /// # Errors
    ///
    /// Returns `RateError::MissingRate` if the currency is not in the table.
    pub fn rate(&self, currency: Currency) -> Result<Decimal, RateError> {
        if currency.is_reference() {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(&currency)
            .copied()
            .ok_or(RateError::MissingRate(currency))
    }

    /// Iterates every currency with its rate, reference first.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        std::iter::once((Currency::REFERENCE, Decimal::ONE))
            .chain(self.rates.iter().map(|(c, r)| (*c, *r)))
    }

    /// Where these rates came from.
    #[must_use]
    pub const fn status(&self) -> &RateStatus {
        &self.status
    }

    /// True when the table holds fallback constants.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, RateStatus::Fallback { .. })
    }

    /// When the source last updated the rates, or when the fetch failed
    /// for a fallback table.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quotes() -> Vec<(Currency, Decimal)> {
        vec![
            (Currency::Usd, dec!(1300)),
            (Currency::Eur, dec!(1550)),
            (Currency::Brl, dec!(244)),
            (Currency::Clp, dec!(1.37)),
            (Currency::Uyu, dec!(33.06)),
        ]
    }

    #[test]
    fn test_live_table() {
        let table = RateTable::live(quotes(), Utc::now()).unwrap();
        assert_eq!(table.status(), &RateStatus::Live);
        assert!(!table.is_degraded());
        assert_eq!(table.rate(Currency::Usd).unwrap(), dec!(1300));
        assert_eq!(table.rate(Currency::Ars).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_missing_currency_is_rejected() {
        let partial: Vec<_> = quotes()
            .into_iter()
            .filter(|(c, _)| *c != Currency::Clp)
            .collect();
        assert_eq!(
            RateTable::live(partial, Utc::now()),
            Err(RateError::MissingRate(Currency::Clp))
        );
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        let mut bad = quotes();
        bad[1].1 = dec!(0);
        assert_eq!(
            RateTable::live(bad, Utc::now()),
            Err(RateError::InvalidRate {
                currency: Currency::Eur,
                rate: dec!(0)
            })
        );
    }

    #[test]
    fn test_reference_quote_is_ignored() {
        let mut with_reference = quotes();
        with_reference.push((Currency::Ars, dec!(42)));
        let table = RateTable::live(with_reference, Utc::now()).unwrap();
        assert_eq!(table.rate(Currency::Ars).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_iter_lists_reference_first() {
        let table = RateTable::live(quotes(), Utc::now()).unwrap();
        let listed: Vec<Currency> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(listed.len(), Currency::ALL.len());
        assert_eq!(listed[0], Currency::REFERENCE);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RateStatus::Live.label(), "live");
        assert_eq!(
            RateStatus::Fallback {
                reason: "timeout".to_string()
            }
            .label(),
            "fallback"
        );
    }
}
