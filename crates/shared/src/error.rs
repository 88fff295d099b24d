//! Application-wide error type shared by the API and the binaries.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to API clients or to the process entry point.
///
/// Domain crates keep their own error enums; this is what they are mapped
/// to at the edges.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, invalid or revoked credentials.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The named resource does not exist or is not visible to the caller.
    #[error("{0} not found")]
    NotFound(String),

    /// The request body or parameters were rejected.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The resource already exists.
    #[error("already exists: {0}")]
    Conflict(String),

    /// Settings could not be used to start the service.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Persistence failed.
    #[error("database error: {0}")]
    Database(String),

    /// Anything else that is the server's fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Config(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code used as the `error` field of response bodies.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Conflict(_) => "conflict",
            Self::Config(_) => "config_error",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns true for errors caused by the caller rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
