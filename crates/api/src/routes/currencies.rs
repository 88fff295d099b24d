//! Currency catalog route.

use axum::{Json, Router, routing::get};
use fairshare_shared::Currency;
use serde::Serialize;

use crate::AppState;

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies", get(list_currencies))
}

/// Response for a currency.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    /// Currency code (ISO 4217).
    pub code: &'static str,
    /// Currency name.
    pub name: &'static str,
    /// Currency symbol.
    pub symbol: &'static str,
    /// Number of decimal places.
    pub decimal_places: u32,
    /// True for the currency rates are quoted against.
    pub is_reference: bool,
}

impl From<Currency> for CurrencyResponse {
    fn from(c: Currency) -> Self {
        Self {
            code: c.code(),
            name: c.name(),
            symbol: c.symbol(),
            decimal_places: c.decimal_places(),
            is_reference: c.is_reference(),
        }
    }
}

/// Response for `GET /currencies`.
#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    /// Catalog, reference currency first.
    pub currencies: Vec<CurrencyResponse>,
}

/// GET `/currencies` - List the supported currencies.
async fn list_currencies() -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        currencies: Currency::ALL.into_iter().map(CurrencyResponse::from).collect(),
    })
}
