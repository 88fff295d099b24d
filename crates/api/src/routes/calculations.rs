//! Saved calculations for the signed-in user.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use fairshare_core::history::{CalculationRecord, HistoryService};
use fairshare_core::split::SplitForm;
use fairshare_db::CalculationRepository;
use fairshare_shared::types::{CalculationId, PageRequest};
use serde::Serialize;
use uuid::Uuid;

use super::split::{SplitResponse, compute};
use crate::AppState;
use crate::error::history_error_response;
use crate::middleware::AuthUser;

/// Creates the calculation routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/calculations",
            get(list_calculations).post(create_calculation),
        )
        .route("/calculations/stats", get(calculation_stats))
        .route("/calculations/{id}", delete(delete_calculation))
}

fn history(state: &AppState) -> HistoryService<CalculationRepository> {
    HistoryService::new(Arc::new(CalculationRepository::new((*state.db).clone())))
}

/// Response for a newly saved calculation.
#[derive(Debug, Serialize)]
pub struct SavedCalculationResponse {
    /// The stored record.
    pub calculation: CalculationRecord,
    /// The full split, as `POST /split` returns it.
    pub split: SplitResponse,
}

/// POST `/calculations` - Compute a split and save it.
async fn create_calculation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(form): Json<SplitForm>,
) -> Response {
    let (input, result, split) = match compute(&state, &form) {
        Ok(computed) => computed,
        Err(response) => return response,
    };

    match history(&state).save(auth.owner(), &input, &result).await {
        Ok(calculation) => (
            StatusCode::CREATED,
            Json(SavedCalculationResponse { calculation, split }),
        )
            .into_response(),
        Err(e) => history_error_response(&e),
    }
}

/// GET `/calculations` - Newest first, paginated.
async fn list_calculations(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Response {
    match history(&state).list(auth.owner(), page).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => history_error_response(&e),
    }
}

/// GET `/calculations/stats` - Aggregates over the user's history.
async fn calculation_stats(State(state): State<AppState>, auth: AuthUser) -> Response {
    match history(&state).stats(auth.owner()).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => history_error_response(&e),
    }
}

/// DELETE `/calculations/{id}` - Remove one of the user's calculations.
async fn delete_calculation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    match history(&state)
        .delete(auth.owner(), CalculationId::from_uuid(id))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => history_error_response(&e),
    }
}
