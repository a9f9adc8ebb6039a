//! Create `inventory` table.
//!
//! Stock thresholds live on the row; the stock status is derived when read.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventory::Id))
                    .col(string_len(Inventory::Name, 100))
                    .col(string_len_null(Inventory::Category, 100))
                    .col(integer(Inventory::CurrentStock).default(0))
                    .col(integer(Inventory::MinStock).default(10))
                    .col(integer(Inventory::MaxStock).default(50))
                    .col(double(Inventory::UnitCost).default(0.0))
                    .col(double(Inventory::SellingPrice).default(0.0))
                    .col(string_len_null(Inventory::Supplier, 100))
                    .col(date_null(Inventory::LastOrdered))
                    .col(date_null(Inventory::ExpirationDate))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Inventory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    Name,
    Category,
    CurrentStock,
    MinStock,
    MaxStock,
    UnitCost,
    SellingPrice,
    Supplier,
    LastOrdered,
    ExpirationDate,
}
