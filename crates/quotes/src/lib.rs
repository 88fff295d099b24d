//! Live exchange rates for Fairshare.
//!
//! Fetches the quote list over HTTP and turns it into a
//! [`RateTable`](fairshare_core::currency::RateTable) quoted against the
//! reference currency.

pub mod dolarapi;
pub mod payload;

pub use dolarapi::DolarApiSource;
pub use payload::{QuoteRecord, select_rates};
