//! History error types.

use fairshare_shared::types::CalculationId;
use thiserror::Error;

/// Calculation history errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Calculation not found, or owned by someone else.
    #[error("Calculation not found: {0}")]
    NotFound(CalculationId),

    /// The backing store failed.
    #[error("Calculation store error: {0}")]
    Store(String),
}
