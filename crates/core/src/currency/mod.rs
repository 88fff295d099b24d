//! Exchange rates and conversion through the reference currency.

pub mod allocation;
pub mod conversion;
pub mod error;
pub mod fallback;
pub mod normalizer;
pub mod provider;
pub mod rates;
pub mod source;

#[cfg(test)]
mod props;

pub use allocation::AllocationUtil;
pub use conversion::{round, round_money};
pub use error::RateError;
pub use fallback::{FallbackRates, default_fallback_rate};
pub use normalizer::{convert, convert_across, from_reference, to_reference};
pub use provider::{RateProvider, fetch_or_fallback};
pub use rates::{RateStatus, RateTable};
pub use source::RateSource;
