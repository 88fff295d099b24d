//! Account routes: register, login, token refresh, logout and current user.
//!
//! Refresh tokens are JWTs backed by a session row holding the token's
//! SHA-256 hash, so a token stops working as soon as its session is revoked
//! or rotated.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fairshare_core::auth::{check_password_policy, hash_password, normalize_email, verify_password};
use fairshare_db::{SessionRepository, UserRepository, entities::users, is_unique_violation};
use fairshare_shared::auth::{
    LoginRequest, LoginResponse, LogoutRequest, RefreshRequest, RegisterRequest, UserInfo,
};
use fairshare_shared::{AppError, TokenPair};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::error::{app_error_response, error_response, internal_error};
use crate::middleware::AuthUser;
use crate::middleware::auth::token_rejection;

/// Creates the public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// Creates the auth routes that need a bearer token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn invalid_credentials() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "Invalid email or password",
    )
}

fn revoked_session() -> Response {
    error_response(
        StatusCode::UNAUTHORIZED,
        "invalid_token",
        "Refresh token has been revoked or has expired",
    )
}

fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers.get(USER_AGENT).and_then(|h| h.to_str().ok())
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
    }
}

/// Issues an access and refresh token pair and opens a session for it.
async fn start_session(
    state: &AppState,
    user: users::Model,
    user_agent: Option<&str>,
) -> Result<LoginResponse, Response> {
    let access_token = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            internal_error("An error occurred during sign-in")
        })?;
    let (refresh_token, expires_at) = state
        .jwt_service
        .generate_refresh_token(user.id, &user.email)
        .map_err(|e| {
            error!(error = %e, "Failed to generate refresh token");
            internal_error("An error occurred during sign-in")
        })?;

    SessionRepository::new((*state.db).clone())
        .create(user.id, &refresh_token, expires_at, user_agent)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "Failed to create session");
            internal_error("An error occurred during sign-in")
        })?;

    Ok(LoginResponse {
        user: user_info(user),
        tokens: TokenPair::new(
            access_token,
            refresh_token,
            state.jwt_service.access_token_expires_in(),
        ),
    })
}

/// POST /auth/register - Create an account and sign it in.
async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    let Some(email) = normalize_email(&payload.email) else {
        return app_error_response(&AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    };
    if let Err(e) = check_password_policy(&payload.password) {
        return app_error_response(&AppError::Validation(e.to_string()));
    }
    let full_name = payload.full_name.trim();
    if full_name.is_empty() {
        return app_error_response(&AppError::Validation("Full name is required".to_string()));
    }

    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.email_exists(&email).await {
        Ok(true) => {
            return error_response(
                StatusCode::CONFLICT,
                "email_exists",
                "An account with this email already exists",
            );
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return internal_error("An error occurred during registration");
        }
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    let user = match user_repo.create(&email, &password_hash, full_name).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            return error_response(
                StatusCode::CONFLICT,
                "email_exists",
                "An account with this email already exists",
            );
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return internal_error("An error occurred during registration");
        }
    };

    info!(user_id = %user.id, "New user registered");

    match start_session(&state, user, user_agent(&headers)).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(response) => response,
    }
}

/// POST /auth/login - Authenticate and return tokens.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let Some(email) = normalize_email(&payload.email) else {
        return invalid_credentials();
    };

    let user = match UserRepository::new((*state.db).clone())
        .find_by_email(&email)
        .await
    {
        Ok(Some(u)) => u,
        Ok(None) => {
            debug!("Login attempt for unknown email");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during sign-in");
        }
    };

    if !user.is_active {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "account_disabled",
            "This account has been disabled",
        );
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during sign-in");
        }
    }

    let user_id = user.id;
    match start_session(&state, user, user_agent(&headers)).await {
        Ok(response) => {
            info!(user_id = %user_id, "User logged in");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// POST /auth/refresh - Rotate the refresh token and issue a new access token.
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RefreshRequest>,
) -> Response {
    let claims = match state.jwt_service.validate_refresh_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => return token_rejection(&e),
    };

    let sessions = SessionRepository::new((*state.db).clone());
    let session = match sessions.find_active_by_token(&payload.refresh_token).await {
        Ok(Some(s)) if s.user_id == claims.user_id() && s.is_live(Utc::now()) => s,
        Ok(_) => return revoked_session(),
        Err(e) => {
            error!(error = %e, "Database error loading session");
            return internal_error("An error occurred during token refresh");
        }
    };

    let user = match UserRepository::new((*state.db).clone())
        .find_by_id(claims.user_id())
        .await
    {
        Ok(Some(u)) if u.is_active => u,
        Ok(_) => return revoked_session(),
        Err(e) => {
            error!(error = %e, "Database error loading user");
            return internal_error("An error occurred during token refresh");
        }
    };

    let tokens = state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .and_then(|access| {
            state
                .jwt_service
                .generate_refresh_token(user.id, &user.email)
                .map(|refresh| (access, refresh))
        });
    let (access_token, (refresh_token, expires_at)) = match tokens {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate tokens");
            return internal_error("An error occurred during token refresh");
        }
    };

    match sessions
        .rotate(
            session.id,
            user.id,
            &refresh_token,
            expires_at,
            user_agent(&headers),
        )
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!(session_id = %session.id, "Refresh token reused while rotating");
            return revoked_session();
        }
        Err(e) => {
            error!(error = %e, session_id = %session.id, "Failed to rotate session");
            return internal_error("An error occurred during token refresh");
        }
    }

    debug!(user_id = %user.id, "Session rotated");

    (
        StatusCode::OK,
        Json(TokenPair::new(
            access_token,
            refresh_token,
            state.jwt_service.access_token_expires_in(),
        )),
    )
        .into_response()
}

/// POST /auth/logout - Revoke the session behind a refresh token.
///
/// Succeeds even when the session is already gone.
async fn logout(State(state): State<AppState>, Json(payload): Json<LogoutRequest>) -> Response {
    match SessionRepository::new((*state.db).clone())
        .revoke_by_token(&payload.refresh_token)
        .await
    {
        Ok(revoked) => {
            debug!(revoked, "Logout");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to revoke session");
            internal_error("An error occurred during sign-out")
        }
    }
}

/// GET /auth/me - The signed-in user.
async fn me(State(state): State<AppState>, auth: AuthUser) -> Response {
    match UserRepository::new((*state.db).clone())
        .find_by_id(auth.user_id())
        .await
    {
        Ok(Some(user)) => (StatusCode::OK, Json(user_info(user))).into_response(),
        Ok(None) => app_error_response(&AppError::NotFound("user".to_string())),
        Err(e) => {
            error!(error = %e, "Database error loading current user");
            internal_error("An error occurred")
        }
    }
}
