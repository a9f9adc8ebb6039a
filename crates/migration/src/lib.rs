//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_user;
mod m20240101_000002_create_customer;
mod m20240101_000003_create_property;
mod m20240101_000004_create_contact;
mod m20240101_000005_create_job;
mod m20240101_000006_create_inventory;
mod m20240101_000007_create_marketing_campaign;
mod m20240101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user::Migration),
            Box::new(m20240101_000002_create_customer::Migration),
            Box::new(m20240101_000003_create_property::Migration),
            Box::new(m20240101_000004_create_contact::Migration),
            Box::new(m20240101_000005_create_job::Migration),
            Box::new(m20240101_000006_create_inventory::Migration),
            Box::new(m20240101_000007_create_marketing_campaign::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000010_add_indexes::Migration),
        ]
    }
}
