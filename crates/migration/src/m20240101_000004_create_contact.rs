//! Create `contact` table with FK to `customer`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(pk_auto(Contact::Id))
                    .col(integer(Contact::CustomerId))
                    .col(string_len(Contact::Name, 100))
                    .col(string_len_null(Contact::Phone, 20))
                    .col(string_len_null(Contact::Email, 120))
                    .col(string_len_null(Contact::Title, 100))
                    .col(boolean(Contact::IsPrimary).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_customer")
                            .from(Contact::Table, Contact::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, CustomerId, Name, Phone, Email, Title, IsPrimary }

#[derive(DeriveIden)]
enum Customer { Table, Id }
