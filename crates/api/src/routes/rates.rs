//! Exchange rate routes.

use axum::{Json, Router, extract::State, routing::get, routing::post};
use chrono::{DateTime, Utc};
use fairshare_core::currency::{RateStatus, RateTable};
use fairshare_shared::Currency;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::AppState;

/// Creates the rate routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rates", get(current_rates))
        .route("/rates/refresh", post(refresh_rates))
}

/// Where a table came from and when.
#[derive(Debug, Serialize)]
pub struct RateStatusResponse {
    /// `live` or `fallback`.
    pub status: &'static str,
    /// Why the last fetch failed, for fallback tables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Quote time for live tables, failure time for fallback ones.
    pub updated_at: DateTime<Utc>,
}

impl From<&RateTable> for RateStatusResponse {
    fn from(table: &RateTable) -> Self {
        let reason = match table.status() {
            RateStatus::Live => None,
            RateStatus::Fallback { reason } => Some(reason.clone()),
        };
        Self {
            status: table.status().label(),
            reason,
            updated_at: table.updated_at(),
        }
    }
}

/// One row of the table.
#[derive(Debug, Serialize)]
pub struct RateEntry {
    /// Currency code.
    pub currency: Currency,
    /// Reference units per one unit of `currency`.
    pub rate: Decimal,
}

/// Response for the rate routes.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    /// Currency every rate is quoted against.
    pub reference: Currency,
    /// Every currency with its rate, reference first.
    pub rates: Vec<RateEntry>,
    /// Table provenance.
    #[serde(flatten)]
    pub source: RateStatusResponse,
}

impl From<&RateTable> for RatesResponse {
    fn from(table: &RateTable) -> Self {
        Self {
            reference: Currency::REFERENCE,
            rates: table
                .iter()
                .map(|(currency, rate)| RateEntry { currency, rate })
                .collect(),
            source: RateStatusResponse::from(table),
        }
    }
}

/// GET `/rates` - Current table.
async fn current_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    Json(RatesResponse::from(&*state.rates.current()))
}

/// POST `/rates/refresh` - Re-fetch and publish a new table.
///
/// Never fails: an unreachable source yields the fallback table.
async fn refresh_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    let table = state.rates.refresh().await;
    info!(status = table.status().label(), "Rates refreshed on request");
    Json(RatesResponse::from(&*table))
}
