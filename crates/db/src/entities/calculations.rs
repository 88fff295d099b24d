//! `SeaORM` Entity for calculations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "calculations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub person_a_name: String,
    pub person_b_name: String,
    pub person_a_income: Decimal,
    pub person_b_income: Decimal,
    pub person_a_currency: String,
    pub person_b_currency: String,
    pub total_bill: Decimal,
    pub bill_currency: String,
    pub person_a_payment: Decimal,
    pub person_b_payment: Decimal,
    pub person_a_percentage: Decimal,
    pub person_b_percentage: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
