//! Token claims and the request/response bodies of the account routes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two tokens a set of claims belongs to.
///
/// A refresh token is never accepted as a bearer token, and an access token
/// cannot be exchanged for a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived bearer token.
    Access,
    /// Long-lived token backed by a session row.
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Email the user signed in with.
    pub email: String,
    /// Access or refresh.
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    /// Unique token ID, so two tokens issued in the same second differ.
    pub jti: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates claims issued now.
    #[must_use]
    pub fn new(user_id: Uuid, email: &str, kind: TokenKind, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            email: email.to_string(),
            kind,
            jti: Uuid::new_v4(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access_token: String,
    /// Refresh token (long-lived).
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub const fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email, matched case-insensitively.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email, stored trimmed and lowercased.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// Response of register and login: the account plus a fresh token pair.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed-in user.
    pub user: UserInfo,
    /// Issued tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User full name.
    pub full_name: String,
}

/// `POST /auth/refresh` and `POST /auth/logout` body.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token to rotate or revoke.
    pub refresh_token: String,
}

/// Logout takes the same body as refresh.
pub type LogoutRequest = RefreshRequest;
