//! Money type with decimal precision and the currency catalog.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., pesos, dollars).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "ARS", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the calculator.
///
/// `Ars` is the reference currency every conversion passes through.
/// The catalog methods below are the single source of codes, names,
/// symbols and minor units for the whole workspace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine Peso
    Ars,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Brazilian Real
    Brl,
    /// Chilean Peso
    Clp,
    /// Uruguayan Peso
    Uyu,
}

impl Currency {
    /// Every supported currency, reference first.
    pub const ALL: [Self; 6] = [
        Self::Ars,
        Self::Usd,
        Self::Eur,
        Self::Brl,
        Self::Clp,
        Self::Uyu,
    ];

    /// The currency all rates are quoted against.
    pub const REFERENCE: Self = Self::Ars;

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Brl => "BRL",
            Self::Clp => "CLP",
            Self::Uyu => "UYU",
        }
    }

    /// English display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ars => "Argentine Peso",
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Brl => "Brazilian Real",
            Self::Clp => "Chilean Peso",
            Self::Uyu => "Uruguayan Peso",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ars | Self::Usd | Self::Clp => "$",
            Self::Eur => "€",
            Self::Brl => "R$",
            Self::Uyu => "$U",
        }
    }

    /// Number of minor-unit decimal places.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        match self {
            Self::Clp => 0,
            _ => 2,
        }
    }

    /// Returns true for the reference currency.
    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Ars)
    }

    /// Currencies that need a quoted rate (everything except the reference).
    pub fn foreign() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(|c| !c.is_reference())
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| format!("Unknown currency: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Usd);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Usd);
    }

    #[test]
    fn test_money_is_negative() {
        let positive = Money::new(dec!(10), Currency::Usd);
        assert!(!positive.is_negative());

        let negative = Money::new(dec!(-10), Currency::Usd);
        assert!(negative.is_negative());

        let zero = Money::new(dec!(0), Currency::Usd);
        assert!(!zero.is_negative());
    }

    #[test]
    fn test_money_is_positive() {
        assert!(Money::new(dec!(0.01), Currency::Ars).is_positive());
        assert!(!Money::zero(Currency::Ars).is_positive());
        assert!(!Money::new(dec!(-1), Currency::Ars).is_positive());
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Ars.to_string(), "ARS");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Brl.to_string(), "BRL");
        assert_eq!(Currency::Clp.to_string(), "CLP");
        assert_eq!(Currency::Uyu.to_string(), "UYU");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("ARS").unwrap(), Currency::Ars);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str(" brl ").unwrap(), Currency::Brl);
        assert_eq!(Currency::from_str("UYU").unwrap(), Currency::Uyu);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_foreign_excludes_reference() {
        let foreign: Vec<Currency> = Currency::foreign().collect();
        assert_eq!(foreign.len(), 5);
        assert!(!foreign.contains(&Currency::REFERENCE));
    }

    #[test]
    fn test_catalog_entries() {
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Brl.symbol(), "R$");
        assert_eq!(Currency::Uyu.symbol(), "$U");
        assert_eq!(Currency::Clp.decimal_places(), 0);
        assert_eq!(Currency::Ars.decimal_places(), 2);
        assert_eq!(Currency::Usd.name(), "US Dollar");
    }

    #[test]
    fn test_currency_serde_uses_iso_code() {
        let json = serde_json::to_string(&Currency::Clp).unwrap();
        assert_eq!(json, "\"CLP\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
    }
}
