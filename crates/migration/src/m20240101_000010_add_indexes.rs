use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Job: listing and agenda filter on date, feeds filter on technician
        manager
            .create_index(
                Index::create()
                    .name("idx_job_date")
                    .table(Job::Table)
                    .col(Job::JobDate)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_job_technician")
                    .table(Job::Table)
                    .col(Job::TechnicianId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_job_customer")
                    .table(Job::Table)
                    .col(Job::CustomerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_customer")
                    .table(Property::Table)
                    .col(Property::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_customer")
                    .table(Contact::Table)
                    .col(Contact::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_job_date").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_technician").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_job_customer").table(Job::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_property_customer").table(Property::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contact_customer").table(Contact::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Job { Table, JobDate, TechnicianId, CustomerId }

#[derive(DeriveIden)]
enum Property { Table, CustomerId }

#[derive(DeriveIden)]
enum Contact { Table, CustomerId }
