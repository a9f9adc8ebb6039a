//! Create `property` table with FK to `customer`.
//!
//! Service locations; removed together with their customer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(pk_auto(Property::Id))
                    .col(integer(Property::CustomerId))
                    .col(string_len_null(Property::Label, 100))
                    .col(string_len(Property::Address, 200))
                    .col(text_null(Property::Notes))
                    .col(boolean(Property::IsPrimary).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_customer")
                            .from(Property::Table, Property::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Property::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Property { Table, Id, CustomerId, Label, Address, Notes, IsPrimary }

#[derive(DeriveIden)]
enum Customer { Table, Id }
