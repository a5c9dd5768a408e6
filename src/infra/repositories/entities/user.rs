//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{from_minor_units, User};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub registered_at: DateTimeUtc,
    pub first_name: String,
    pub second_name: String,
    /// Minor units
    pub incomes_balance: i64,
    /// Minor units
    pub expenses_balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::income::Entity")]
    Incomes,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Incomes.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            registered_at: model.registered_at,
            first_name: model.first_name,
            second_name: model.second_name,
            incomes_balance: from_minor_units(model.incomes_balance),
            expenses_balance: from_minor_units(model.expenses_balance),
        }
    }
}
