//! Mapping of domain errors onto JSON error responses.
//!
//! Every error body has the shape `{"error": <code>, "message": <text>}`.
//! Validation failures add a `violations` array with one entry per field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fairshare_core::history::HistoryError;
use fairshare_core::split::SplitError;
use fairshare_shared::AppError;
use serde_json::json;
use tracing::error;

/// Builds a JSON error response.
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "error": error, "message": message.into() })),
    )
        .into_response()
}

/// Generic 500 that hides the cause from the client.
pub fn internal_error(message: &str) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
}

/// Converts an `AppError` into its response, logging server-side failures.
pub fn app_error_response(e: &AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if !e.is_client_error() {
        error!(error = %e, "Request failed");
    }
    error_response(status, e.error_code(), e.to_string())
}

/// Converts a split failure into a response.
///
/// Validation errors are the caller's fault and list every rejected field.
/// Amounts too large to convert are also answered with 400. Everything else
/// means the rate table or arithmetic misbehaved.
pub fn split_error_response(e: &SplitError) -> Response {
    match e {
        out_of_range if out_of_range.is_out_of_range() => error_response(
            StatusCode::BAD_REQUEST,
            "amount_out_of_range",
            out_of_range.to_string(),
        ),
        SplitError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": errors.to_string(),
                "violations": errors,
            })),
        )
            .into_response(),
        other => {
            error!(error = %other, "Split calculation failed");
            internal_error("Could not compute the split")
        }
    }
}

/// Converts a history failure into a response.
pub fn history_error_response(e: &HistoryError) -> Response {
    match e {
        HistoryError::NotFound(id) => app_error_response(&AppError::NotFound(format!(
            "calculation {id}"
        ))),
        HistoryError::Store(msg) => app_error_response(&AppError::Database(msg.clone())),
    }
}
