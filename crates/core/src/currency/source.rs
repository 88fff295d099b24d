//! Rate source abstraction.

use super::error::RateError;
use super::rates::RateTable;

/// Something that can produce a live rate table.
///
/// This trait is implemented by the quotes crate over HTTP.
pub trait RateSource: Send + Sync {
    /// Fetches every foreign rate.
    ///
    /// Implementations must fail with `RateError::MissingRate` when any
    /// catalog currency is absent rather than returning a partial table.
    fn fetch_rates(&self) -> impl std::future::Future<Output = Result<RateTable, RateError>> + Send;
}
