//! Migration: Create incomes and expenses tables.
//!
//! Both tables share one layout; rows are removed with their owner.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [EntryTable::Incomes, EntryTable::Expenses] {
            manager.create_table(entry_table(table)).await?;

            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_user_id", table.name()))
                        .table(table)
                        .col(Entry::UserId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{}_date", table.name()))
                        .table(table)
                        .col(Entry::Date)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [EntryTable::Expenses, EntryTable::Incomes] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

fn entry_table(table: EntryTable) -> TableCreateStatement {
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Entry::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Entry::UserId).uuid().not_null())
        .col(ColumnDef::new(Entry::Category).string().not_null())
        .col(ColumnDef::new(Entry::Amount).big_integer().not_null())
        .col(ColumnDef::new(Entry::Date).date().not_null())
        .col(
            ColumnDef::new(Entry::Description)
                .string()
                .not_null()
                .default(""),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_user_id", table.name()))
                .from(table, Entry::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum EntryTable {
    Incomes,
    Expenses,
}

impl EntryTable {
    fn name(&self) -> &'static str {
        match self {
            EntryTable::Incomes => "incomes",
            EntryTable::Expenses => "expenses",
        }
    }
}

#[derive(Iden)]
enum Entry {
    Id,
    UserId,
    Category,
    Amount,
    Date,
    Description,
}
