//! Shared types, errors, and configuration for Fairshare.
//!
//! This crate provides common types used across all other crates:
//! - The currency catalog and `Money`
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token handling

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::{Claims, TokenKind, TokenPair};
pub use config::{AppConfig, RatesConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::{Currency, Money};
