//! Calculation repository backing the history service.

use std::str::FromStr;

use chrono::Utc;
use fairshare_core::history::{CalculationRecord, CalculationStore, HistoryError, NewCalculation};
use fairshare_shared::types::{CalculationId, PageRequest, UserId};
use fairshare_shared::{Currency, Money};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::calculations;

/// Calculation repository scoped by owner on every query.
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    db: DatabaseConnection,
}

impl CalculationRepository {
    /// Creates a new calculation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_error(e: DbErr) -> HistoryError {
    HistoryError::Store(e.to_string())
}

fn parse_currency(column: &str, code: &str) -> Result<Currency, HistoryError> {
    Currency::from_str(code)
        .map_err(|e| HistoryError::Store(format!("invalid {column} in stored calculation: {e}")))
}

/// Converts a stored row into a domain record.
///
/// # Errors
///
/// Returns `HistoryError::Store` if a currency column holds an unknown code.
pub fn model_to_record(model: calculations::Model) -> Result<CalculationRecord, HistoryError> {
    Ok(CalculationRecord {
        id: CalculationId::from_uuid(model.id),
        owner: UserId::from_uuid(model.user_id),
        person_a_income: Money::new(
            model.person_a_income,
            parse_currency("person_a_currency", &model.person_a_currency)?,
        ),
        person_b_income: Money::new(
            model.person_b_income,
            parse_currency("person_b_currency", &model.person_b_currency)?,
        ),
        bill: Money::new(
            model.total_bill,
            parse_currency("bill_currency", &model.bill_currency)?,
        ),
        person_a_name: model.person_a_name,
        person_b_name: model.person_b_name,
        person_a_payment: model.person_a_payment,
        person_b_payment: model.person_b_payment,
        person_a_percentage: model.person_a_percentage,
        person_b_percentage: model.person_b_percentage,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

/// Builds the insert model for a new calculation.
pub fn new_to_active_model(new: NewCalculation) -> calculations::ActiveModel {
    let now = Utc::now().into();
    calculations::ActiveModel {
        id: Set(new.id.into_inner()),
        user_id: Set(new.owner.into_inner()),
        person_a_name: Set(new.person_a_name),
        person_b_name: Set(new.person_b_name),
        person_a_income: Set(new.person_a_income.amount),
        person_b_income: Set(new.person_b_income.amount),
        person_a_currency: Set(new.person_a_income.currency.code().to_string()),
        person_b_currency: Set(new.person_b_income.currency.code().to_string()),
        total_bill: Set(new.bill.amount),
        bill_currency: Set(new.bill.currency.code().to_string()),
        person_a_payment: Set(new.person_a_payment),
        person_b_payment: Set(new.person_b_payment),
        person_a_percentage: Set(new.person_a_percentage),
        person_b_percentage: Set(new.person_b_percentage),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl CalculationStore for CalculationRepository {
    async fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, HistoryError> {
        let model = new_to_active_model(new)
            .insert(&self.db)
            .await
            .map_err(store_error)?;
        model_to_record(model)
    }

    async fn list(
        &self,
        owner: UserId,
        page: PageRequest,
    ) -> Result<(Vec<CalculationRecord>, u64), HistoryError> {
        let query = calculations::Entity::find()
            .filter(calculations::Column::UserId.eq(owner.into_inner()));

        let total = query.clone().count(&self.db).await.map_err(store_error)?;

        let models = query
            .order_by_desc(calculations::Column::CreatedAt)
            .order_by_desc(calculations::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .map_err(store_error)?;

        let records = models
            .into_iter()
            .map(model_to_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((records, total))
    }

    async fn delete(&self, owner: UserId, id: CalculationId) -> Result<bool, HistoryError> {
        let result = calculations::Entity::delete_many()
            .filter(calculations::Column::Id.eq(id.into_inner()))
            .filter(calculations::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn all_for_owner(&self, owner: UserId) -> Result<Vec<CalculationRecord>, HistoryError> {
        calculations::Entity::find()
            .filter(calculations::Column::UserId.eq(owner.into_inner()))
            .order_by_desc(calculations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(model_to_record)
            .collect()
    }
}
