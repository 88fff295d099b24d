//! Quote payload returned by the rate endpoint.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use fairshare_core::currency::{RateError, RateTable};
use fairshare_shared::Currency;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// One quote record.
///
/// Field names follow the endpoint's JSON. Several records may share a
/// currency (different exchange houses); the first one wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    /// Currency code, e.g. `USD`.
    pub moneda: String,
    /// Exchange house, e.g. `oficial` or `blue`.
    #[serde(default)]
    pub casa: String,
    /// Display name.
    #[serde(default)]
    pub nombre: String,
    /// Buy price in ARS.
    #[serde(default)]
    pub compra: Option<serde_json::Number>,
    /// Sell price in ARS; this is the rate.
    #[serde(default)]
    pub venta: Option<serde_json::Number>,
    /// RFC 3339 timestamp of the quote.
    #[serde(default)]
    pub fecha_actualizacion: Option<String>,
}

impl QuoteRecord {
    /// Catalog currency for this record, if it is one we track.
    pub fn currency(&self) -> Option<Currency> {
        Currency::from_str(&self.moneda).ok()
    }

    /// The sell price as a `Decimal`.
    pub fn sell_rate(&self) -> Option<Decimal> {
        let raw = self.venta.as_ref()?.to_string();
        Decimal::from_str(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
    }

    /// Parsed update timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.fecha_actualizacion.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Builds a live table from quote records.
///
/// Takes the first record with a sell price for each catalog currency and
/// ignores unknown currencies. The table's timestamp is the USD record's
/// update time, or `fetched_at` when that is absent or unparsable.
///
/// # Errors
///
/// Returns `RateError::MissingRate` for a catalog currency with no usable
/// record and `RateError::InvalidRate` for a non-positive sell price.
pub fn select_rates(
    records: &[QuoteRecord],
    fetched_at: DateTime<Utc>,
) -> Result<RateTable, RateError> {
    let mut selected: BTreeMap<Currency, (Decimal, &QuoteRecord)> = BTreeMap::new();

    for record in records {
        let Some(currency) = record.currency() else {
            debug!(moneda = %record.moneda, "Skipping quote for untracked currency");
            continue;
        };
        if currency.is_reference() || selected.contains_key(&currency) {
            continue;
        }
        if let Some(rate) = record.sell_rate() {
            selected.insert(currency, (rate, record));
        }
    }

    let updated_at = selected
        .get(&Currency::Usd)
        .and_then(|(_, record)| record.updated_at())
        .unwrap_or(fetched_at);

    RateTable::live(
        selected.iter().map(|(currency, (rate, _))| (*currency, *rate)),
        updated_at,
    )
}
