use chrono::NaiveDate;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fixed "today" for seeded fixtures so date-relative assertions stay stable.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default()
}

/// Migrated in-memory store private to the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Like [`get_db`], populated with the demonstration dataset relative to [`today`].
pub async fn seeded_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = get_db().await?;
    crate::seed::seed_demo_data(&db, today()).await?;
    Ok(db)
}
