//! Stateless split calculation.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use fairshare_core::currency::{RateError, RateTable};
use fairshare_core::split::{SplitForm, SplitInput, SplitResult};
use fairshare_shared::Money;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error};

use super::rates::RateStatusResponse;
use crate::AppState;
use crate::error::{internal_error, split_error_response};

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/split", post(split))
}

/// One participant in a split response.
#[derive(Debug, Serialize)]
pub struct PartyResponse {
    /// Display name.
    pub name: String,
    /// Income as entered.
    pub income: Money,
    /// Unrounded payment in the bill currency.
    pub payment: Money,
    /// Payment rounded to minor units; both settled payments sum to the bill.
    pub settled_payment: Money,
    /// Payment as a percentage of own income.
    pub percentage: Decimal,
    /// Payment in every catalog currency.
    pub payment_in: Vec<Money>,
}

/// Response for a computed split.
#[derive(Debug, Serialize)]
pub struct SplitResponse {
    /// First participant.
    pub person_a: PartyResponse,
    /// Second participant.
    pub person_b: PartyResponse,
    /// The bill that was divided.
    pub bill: Money,
    /// The percentage of income both participants pay.
    pub percentage: Decimal,
    /// Provenance of the rates used.
    pub rates: RateStatusResponse,
}

impl SplitResponse {
    /// Assembles the response from a computed split.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors from the currency breakdown.
    pub fn build(
        input: &SplitInput,
        result: &SplitResult,
        table: &RateTable,
    ) -> Result<Self, RateError> {
        let settled = result.settled();
        let breakdown = result.breakdown(table)?;
        Ok(Self {
            person_a: PartyResponse {
                name: input.person_a.name.clone(),
                income: input.person_a.income,
                payment: result.person_a.payment,
                settled_payment: settled.person_a,
                percentage: result.person_a.percentage,
                payment_in: breakdown.person_a,
            },
            person_b: PartyResponse {
                name: input.person_b.name.clone(),
                income: input.person_b.income,
                payment: result.person_b.payment,
                settled_payment: settled.person_b,
                percentage: result.person_b.percentage,
                payment_in: breakdown.person_b,
            },
            bill: result.bill,
            percentage: result.percentage(),
            rates: RateStatusResponse::from(table),
        })
    }
}

/// Parses the form and computes the split against the current rates.
///
/// On failure the returned response is ready to send.
pub(crate) fn compute(
    state: &AppState,
    form: &SplitForm,
) -> Result<(SplitInput, SplitResult, SplitResponse), Response> {
    let input = form.parse().map_err(|e| {
        debug!(error = %e, "Rejected split form");
        split_error_response(&e)
    })?;
    let table = state.rates.current();
    let result = input
        .compute(&table)
        .map_err(|e| split_error_response(&e))?;
    let response = SplitResponse::build(&input, &result, &table).map_err(|e| {
        error!(error = %e, "Failed to build currency breakdown");
        internal_error("Could not compute the split")
    })?;
    Ok((input, result, response))
}

/// POST `/split` - Compute a split without saving it.
async fn split(State(state): State<AppState>, Json(form): Json<SplitForm>) -> Response {
    match compute(&state, &form) {
        Ok((_, _, response)) => (StatusCode::OK, Json(response)).into_response(),
        Err(response) => response,
    }
}
