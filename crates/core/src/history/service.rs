//! History service over a pluggable calculation store.

use std::sync::Arc;

use fairshare_shared::types::{CalculationId, PageRequest, PageResponse, UserId};
use tracing::{debug, info};

use super::error::HistoryError;
use super::types::{CalculationRecord, CalculationStats, NewCalculation};
use crate::split::{SplitInput, SplitResult};

/// Repository trait for calculation persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait CalculationStore: Send + Sync {
    /// Persist a new calculation.
    fn insert(
        &self,
        new: NewCalculation,
    ) -> impl std::future::Future<Output = Result<CalculationRecord, HistoryError>> + Send;

    /// One page of an owner's calculations, newest first, with the total count.
    fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> impl std::future::Future<Output = Result<(Vec<CalculationRecord>, u64), HistoryError>> + Send;

    /// Delete a calculation if it belongs to `owner`. Returns false when nothing matched.
    fn delete(
        &self,
        owner: UserId,
        id: CalculationId,
    ) -> impl std::future::Future<Output = Result<bool, HistoryError>> + Send;

    /// Every calculation the owner has saved.
    fn all_for_owner(
        &self,
        owner: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<CalculationRecord>, HistoryError>> + Send;
}

/// Owner-scoped access to saved calculations.
pub struct HistoryService<S: CalculationStore> {
    store: Arc<S>,
}

impl<S: CalculationStore> HistoryService<S> {
    /// Create a new history service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Saves a computed split for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Store` if persistence fails.
    pub async fn save(
        &self,
        owner: UserId,
        input: &SplitInput,
        result: &SplitResult,
    ) -> Result<CalculationRecord, HistoryError> {
        let record = self
            .store
            .insert(NewCalculation::from_split(owner, input, result))
            .await?;
        info!(calculation_id = %record.id, owner = %owner, "Calculation saved");
        Ok(record)
    }

    /// Lists an owner's calculations, newest first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Store` if the store fails.
    pub async fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<PageResponse<CalculationRecord>, HistoryError> {
        let page = page.clamped();
        let (records, total) = self.store.list(owner, page).await?;
        Ok(PageResponse::new(records, page.page, page.per_page, total))
    }

    /// Deletes one of the owner's calculations.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::NotFound` if no record with `id` belongs to
    /// `owner`.
    pub async fn delete(&self, owner: UserId, id: CalculationId) -> Result<(), HistoryError> {
        if self.store.delete(owner, id).await? {
            info!(calculation_id = %id, owner = %owner, "Calculation deleted");
            Ok(())
        } else {
            debug!(calculation_id = %id, owner = %owner, "Delete matched nothing");
            Err(HistoryError::NotFound(id))
        }
    }

    /// Aggregate statistics over the owner's history.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Store` if the store fails.
    pub async fn stats(&self, owner: UserId) -> Result<CalculationStats, HistoryError> {
        let records = self.store.all_for_owner(owner).await?;
        Ok(CalculationStats::from_records(&records))
    }
}
