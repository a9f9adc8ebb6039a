//! Create `job` table.
//!
//! A customer cannot be removed while jobs reference it; technician, property and
//! contact links are cleared when their target disappears.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(pk_auto(Job::Id))
                    .col(integer(Job::CustomerId))
                    .col(integer_null(Job::TechnicianId))
                    .col(integer_null(Job::PropertyId))
                    .col(integer_null(Job::ContactId))
                    .col(string_len(Job::Description, 500))
                    .col(text_null(Job::Notes))
                    .col(string_len(Job::Status, 50).default("Scheduled"))
                    .col(date(Job::JobDate))
                    .col(time_null(Job::JobTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_customer")
                            .from(Job::Table, Job::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_technician")
                            .from(Job::Table, Job::TechnicianId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_property")
                            .from(Job::Table, Job::PropertyId)
                            .to(Property::Table, Property::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_contact")
                            .from(Job::Table, Job::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Job::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Job {
    Table,
    Id,
    CustomerId,
    TechnicianId,
    PropertyId,
    ContactId,
    Description,
    Notes,
    Status,
    JobDate,
    JobTime,
}

#[derive(DeriveIden)]
enum Customer { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Property { Table, Id }

#[derive(DeriveIden)]
enum Contact { Table, Id }
