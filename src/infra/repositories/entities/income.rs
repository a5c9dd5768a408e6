//! Income entry database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{from_minor_units, LedgerEntry};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Uuid,
    pub category: String,
    /// Minor units
    pub amount: i64,
    pub date: Date,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LedgerEntry {
    fn from(model: Model) -> Self {
        LedgerEntry {
            id: model.id,
            user_id: model.user_id,
            category: model.category,
            amount: from_minor_units(model.amount),
            date: model.date,
            description: model.description,
        }
    }
}
