//! Saved calculations and per-owner statistics.

pub mod error;
pub mod service;
pub mod types;


pub use error::HistoryError;
pub use service::{CalculationStore, HistoryService};
pub use types::{CalculationRecord, CalculationStats, NewCalculation, PERCENTAGE_PLACES};
