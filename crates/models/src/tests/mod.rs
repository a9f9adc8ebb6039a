
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory SQLite store private to one test.
pub(crate) async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    let db = crate::db::connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
