//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod calculations;
pub mod currencies;
pub mod health;
pub mod rates;
pub mod split;

/// Creates the API router, wrapping the per-user routes in auth middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(calculations::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(currencies::routes())
        .merge(rates::routes())
        .merge(split::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}
