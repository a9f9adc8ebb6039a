//! First-run bootstrap and the demonstration dataset.

use chrono::{Days, NaiveDate, NaiveTime};
use migration::{Migrator, MigratorTrait, SchemaManager};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Set, TransactionTrait};
use tracing::{info, warn};

use models::{contact, customer, inventory, job, marketing_campaign, property, user};
use crate::errors::ServiceError;

/// What [`bootstrap`] did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// No schema existed; created and seeded.
    Seeded,
    /// The existing schema failed the compatibility probe; rebuilt and seeded.
    Rebuilt,
    /// Schema looked compatible; pending migrations applied, data untouched.
    Upgraded,
}

pub async fn bootstrap(db: &DatabaseConnection, today: NaiveDate) -> anyhow::Result<Bootstrap> {
    let manager = SchemaManager::new(db);
    if !manager.has_table("user").await? {
        info!("no schema found, creating and seeding");
        Migrator::up(db, None).await?;
        seed_demo_data(db, today).await?;
        return Ok(Bootstrap::Seeded);
    }
    if let Err(e) = schema_probe(db).await {
        warn!(err = %e, "schema appears outdated, recreating database");
        Migrator::fresh(db).await?;
        seed_demo_data(db, today).await?;
        return Ok(Bootstrap::Rebuilt);
    }
    Migrator::up(db, None).await?;
    Ok(Bootstrap::Upgraded)
}

/// Read one row from each table the API joins; any column drift fails the select.
async fn schema_probe(db: &DatabaseConnection) -> Result<(), DbErr> {
    customer::Entity::find().one(db).await?;
    property::Entity::find().one(db).await?;
    contact::Entity::find().one(db).await?;
    job::Entity::find().one(db).await?;
    Ok(())
}

fn days_before(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(n)).unwrap_or(today)
}

fn days_after(today: NaiveDate, n: u64) -> NaiveDate {
    today.checked_add_days(Days::new(n)).unwrap_or(today)
}

fn at(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Three staff, two customers each with a primary home and contact, three
/// jobs around `today`, two stock items and two campaigns.
pub async fn seed_demo_data(db: &DatabaseConnection, today: NaiveDate) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    let staff = |email: &str, role: &str| user::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        role: Set(role.to_string()),
    };
    staff("admin@pestpro.com", user::ROLE_ADMIN).insert(&txn).await?;
    let tech = staff("tech@pestpro.com", user::ROLE_TECHNICIAN).insert(&txn).await?;
    let dave = staff("dave@pestpro.com", user::ROLE_TECHNICIAN).insert(&txn).await?;

    let mut homes = Vec::new();
    for (name, address, phone, email) in [
        ("John Doe", "123 Main St, Cleveland, OH", "216-555-0101", "john.doe@example.com"),
        ("Jane Smith", "456 Oak Ave, Cleveland, OH", "216-555-0102", "jane.smith@example.com"),
    ] {
        let c = customer::ActiveModel {
            id: NotSet,
            name: Set(name.into()),
            address: Set(Some(address.into())),
            phone: Set(Some(phone.into())),
            email: Set(Some(email.into())),
        }
        .insert(&txn)
        .await?;
        let home = property::ActiveModel {
            id: NotSet,
            customer_id: Set(c.id),
            label: Set(Some("Home".into())),
            address: Set(address.into()),
            notes: Set(None),
            is_primary: Set(true),
        }
        .insert(&txn)
        .await?;
        let primary = contact::ActiveModel {
            id: NotSet,
            customer_id: Set(c.id),
            name: Set(name.into()),
            phone: Set(Some(phone.into())),
            email: Set(Some(email.into())),
            title: Set(None),
            is_primary: Set(true),
        }
        .insert(&txn)
        .await?;
        homes.push((c, home, primary));
    }
    let [(john, john_home, john_contact), (jane, jane_home, jane_contact)] = <[_; 2]>::try_from(homes)
        .map_err(|_| ServiceError::Internal("seed customers were not created".into()))?;

    let jobs = [
        (&john, &john_home, &john_contact, &tech, "Standard ant treatment", job::STATUS_SCHEDULED, today, at(9, 30), Some("Check under the sink.")),
        (&jane, &jane_home, &jane_contact, &dave, "Rodent inspection", job::STATUS_COMPLETED, days_before(today, 1), at(14, 0), None),
        (&john, &john_home, &john_contact, &tech, "Follow-up spider treatment", job::STATUS_SCHEDULED, today, at(11, 0), None),
    ];
    for (c, p, k, t, description, status, date, time, notes) in jobs {
        job::ActiveModel {
            id: NotSet,
            customer_id: Set(c.id),
            technician_id: Set(Some(t.id)),
            property_id: Set(Some(p.id)),
            contact_id: Set(Some(k.id)),
            description: Set(description.into()),
            notes: Set(notes.map(str::to_string)),
            status: Set(status.into()),
            job_date: Set(date),
            job_time: Set(time),
        }
        .insert(&txn)
        .await?;
    }

    let stock = [
        ("Termiticide Concentrate", "Termiticides", 15, 10, 50, 45.0, 75.0, "PestChem Supply", 15, 365),
        ("Bed Bug Spray", "Insecticides", 5, 8, 30, 25.0, 45.0, "BugBuster Inc", 20, 180),
    ];
    for (name, category, current, min, max, cost, price, supplier, ordered_ago, expires_in) in stock {
        inventory::ActiveModel {
            id: NotSet,
            name: Set(name.into()),
            category: Set(Some(category.into())),
            current_stock: Set(current),
            min_stock: Set(min),
            max_stock: Set(max),
            unit_cost: Set(cost),
            selling_price: Set(price),
            supplier: Set(Some(supplier.into())),
            last_ordered: Set(Some(days_before(today, ordered_ago))),
            expiration_date: Set(Some(days_after(today, expires_in))),
        }
        .insert(&txn)
        .await?;
    }

    let campaigns = [
        ("Summer Bed Bug Prevention", "Email", "Residential", "Active", 247, 98, 23, 3200.0, 10),
        ("Commercial Quarterly Service", "SMS", "Commercial", "Completed", 45, 42, 18, 5400.0, 15),
    ];
    for (name, kind, audience, status, sent, opened, clicked, revenue, age) in campaigns {
        marketing_campaign::ActiveModel {
            id: NotSet,
            name: Set(name.into()),
            campaign_type: Set(Some(kind.into())),
            audience: Set(Some(audience.into())),
            status: Set(status.into()),
            sent: Set(sent),
            opened: Set(opened),
            clicked: Set(clicked),
            revenue: Set(revenue),
            created_date: Set(Some(days_before(today, age))),
            content_subject: Set(None),
            content_body: Set(None),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!(%today, "demonstration data seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::today;
    use configs::DatabaseConfig;
    use models::db::connect_with_config;
    use sea_orm::{ConnectionTrait, PaginatorTrait, Statement};

    async fn blank_db() -> anyhow::Result<DatabaseConnection> {
        connect_with_config(&DatabaseConfig::in_memory()).await
    }

    #[tokio::test]
    async fn empty_store_is_created_and_seeded() -> anyhow::Result<()> {
        let db = blank_db().await?;
        assert_eq!(bootstrap(&db, today()).await?, Bootstrap::Seeded);
        assert_eq!(user::Entity::find().count(&db).await?, 3);
        assert_eq!(customer::Entity::find().count(&db).await?, 2);
        assert_eq!(property::Entity::find().count(&db).await?, 2);
        assert_eq!(contact::Entity::find().count(&db).await?, 2);
        assert_eq!(job::Entity::find().count(&db).await?, 3);
        assert_eq!(inventory::Entity::find().count(&db).await?, 2);
        assert_eq!(marketing_campaign::Entity::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn second_start_keeps_existing_data() -> anyhow::Result<()> {
        let db = blank_db().await?;
        bootstrap(&db, today()).await?;
        customer::ActiveModel { name: Set("Kept".into()), ..Default::default() }.insert(&db).await?;
        assert_eq!(bootstrap(&db, today()).await?, Bootstrap::Upgraded);
        assert_eq!(customer::Entity::find().count(&db).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn drifted_schema_is_rebuilt() -> anyhow::Result<()> {
        let db = blank_db().await?;
        bootstrap(&db, today()).await?;
        let backend = db.get_database_backend();
        db.execute(Statement::from_string(backend, "DROP TABLE contact")).await?;
        db.execute(Statement::from_string(backend, "CREATE TABLE contact (id INTEGER PRIMARY KEY)")).await?;
        assert_eq!(bootstrap(&db, today()).await?, Bootstrap::Rebuilt);
        assert_eq!(contact::Entity::find().count(&db).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn seeded_dates_follow_today() -> anyhow::Result<()> {
        let db = blank_db().await?;
        bootstrap(&db, today()).await?;
        let rodent = job::Entity::find_by_id(2).one(&db).await?.expect("seeded job");
        assert_eq!(rodent.job_date, NaiveDate::from_ymd_opt(2024, 5, 31).expect("date"));
        let spray = inventory::Entity::find_by_id(2).one(&db).await?.expect("seeded item");
        assert_eq!(spray.expiration_date, NaiveDate::from_ymd_opt(2024, 11, 28));
        Ok(())
    }
}
