//! JSON API for splitting bills and keeping a per-user calculation history.
//!
//! Everything is served under `/api/v1`. Rate lookups and `/split` are
//! public; history and `/auth/me` require an access token.

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use axum::Router;
use fairshare_core::currency::RateProvider;
use fairshare_quotes::DolarApiSource;
use fairshare_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Exchange rate holder backed by the live quote endpoint.
pub type Rates = RateProvider<DolarApiSource>;

/// Handles cloned into every request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Current exchange rates.
    pub rates: Arc<Rates>,
}

/// Builds the router with tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
