use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, NotSet,
    PrimaryKeyTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use models::{contact, customer, job, property, user};
use crate::errors::ServiceError;
use crate::payload::{self, non_blank};
use crate::views::{format_job, JobRecord, JobView};

/// Body of a job creation request.
#[derive(Debug, Default, Deserialize)]
pub struct NewJob {
    #[serde(default, deserialize_with = "payload::lenient_id")]
    pub customer_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub job_date: Option<String>,
    /// `HH:MM`
    #[serde(default)]
    pub job_time: Option<String>,
    #[serde(default, deserialize_with = "payload::lenient_id")]
    pub technician_id: Option<i32>,
    #[serde(default, deserialize_with = "payload::lenient_id")]
    pub property_id: Option<i32>,
    #[serde(default, deserialize_with = "payload::lenient_id")]
    pub contact_id: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update. Absent keys leave the stored value alone; for the nullable
/// links and notes an explicit `null` clears the value.
///
/// `start` sets date and time together and is applied first, so an explicit
/// `job_date` or `job_time` in the same payload wins over it.
#[derive(Debug, Default, Deserialize)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "payload::lenient_id")]
    pub customer_id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "payload::patch")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "payload::lenient_id_patch")]
    pub technician_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "payload::lenient_id_patch")]
    pub property_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "payload::lenient_id_patch")]
    pub contact_id: Option<Option<i32>>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub job_date: Option<String>,
    #[serde(default)]
    pub job_time: Option<String>,
}

/// All jobs, most recent date first.
pub async fn list_jobs(db: &DatabaseConnection) -> Result<Vec<JobView>, ServiceError> {
    let jobs = job::Entity::find()
        .order_by_desc(job::Column::JobDate)
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?;
    Ok(hydrate(db, jobs).await?.iter().map(format_job).collect())
}

/// Jobs scheduled on one day, earliest time first.
pub async fn agenda(db: &DatabaseConnection, date: NaiveDate) -> Result<Vec<JobView>, ServiceError> {
    let jobs = job::Entity::find()
        .filter(job::Column::JobDate.eq(date))
        .order_by_asc(job::Column::JobTime)
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?;
    Ok(hydrate(db, jobs).await?.iter().map(format_job).collect())
}

pub async fn create_job(db: &DatabaseConnection, input: NewJob) -> Result<JobView, ServiceError> {
    let customer_id = input
        .customer_id
        .ok_or_else(|| ServiceError::Validation("customer_id is required".into()))?;
    let description = input.description.as_deref().unwrap_or_default().trim().to_string();
    job::validate_description(&description)?;
    let raw_date = non_blank(input.job_date.as_deref())
        .ok_or_else(|| ServiceError::Validation("job_date (YYYY-MM-DD) is required".into()))?;
    let job_date = job::parse_job_date(raw_date)?;
    let job_time = non_blank(input.job_time.as_deref()).map(job::parse_job_time).transpose()?;

    let txn = db.begin().await?;
    ensure_exists::<_, customer::Entity>(&txn, "customer", customer_id).await?;
    ensure_links(&txn, input.technician_id, input.property_id, input.contact_id).await?;

    let created = job::ActiveModel {
        id: NotSet,
        customer_id: Set(customer_id),
        technician_id: Set(input.technician_id),
        property_id: Set(input.property_id),
        contact_id: Set(input.contact_id),
        description: Set(description),
        notes: Set(input.notes),
        status: Set(job::STATUS_SCHEDULED.to_string()),
        job_date: Set(job_date),
        job_time: Set(job_time),
    }
    .insert(&txn)
    .await?;
    let record = hydrate_one(&txn, created).await?;
    txn.commit().await?;

    info!(job_id = record.job.id, customer_id, "job created");
    Ok(format_job(&record))
}

pub async fn update_job(db: &DatabaseConnection, id: i32, patch: JobUpdate) -> Result<JobView, ServiceError> {
    let txn = db.begin().await?;
    let current = job::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("job", id))?;

    let (job_date, job_time) = resolve_schedule(&current, &patch)?;

    let mut am: job::ActiveModel = current.into();
    if let Some(customer_id) = patch.customer_id {
        ensure_exists::<_, customer::Entity>(&txn, "customer", customer_id).await?;
        am.customer_id = Set(customer_id);
    }
    if let Some(description) = patch.description {
        job::validate_description(&description)?;
        am.description = Set(description.trim().to_string());
    }
    if let Some(status) = patch.status {
        if status.trim().is_empty() {
            return Err(ServiceError::Validation("Status is required".into()));
        }
        am.status = Set(status.trim().to_string());
    }
    if let Some(notes) = patch.notes {
        am.notes = Set(notes);
    }
    ensure_links(
        &txn,
        patch.technician_id.flatten(),
        patch.property_id.flatten(),
        patch.contact_id.flatten(),
    )
    .await?;
    if let Some(technician_id) = patch.technician_id {
        am.technician_id = Set(technician_id);
    }
    if let Some(property_id) = patch.property_id {
        am.property_id = Set(property_id);
    }
    if let Some(contact_id) = patch.contact_id {
        am.contact_id = Set(contact_id);
    }
    am.job_date = Set(job_date);
    am.job_time = Set(job_time);

    let updated = am.update(&txn).await?;
    let record = hydrate_one(&txn, updated).await?;
    txn.commit().await?;

    info!(job_id = id, status = %record.job.status, "job updated");
    Ok(format_job(&record))
}

fn resolve_schedule(current: &job::Model, patch: &JobUpdate) -> Result<(NaiveDate, Option<NaiveTime>), ServiceError> {
    let mut date = current.job_date;
    let mut time = current.job_time;
    if let Some(start) = non_blank(patch.start.as_deref()) {
        let start = job::parse_start(start)?;
        date = start.date();
        time = Some(start.time());
    }
    if let Some(raw) = non_blank(patch.job_date.as_deref()) {
        date = job::parse_job_date(raw)?;
    }
    if let Some(raw) = non_blank(patch.job_time.as_deref()) {
        time = Some(job::parse_job_time(raw)?);
    }
    Ok((date, time))
}

async fn ensure_links<C: ConnectionTrait>(
    db: &C,
    technician_id: Option<i32>,
    property_id: Option<i32>,
    contact_id: Option<i32>,
) -> Result<(), ServiceError> {
    if let Some(id) = technician_id {
        ensure_exists::<_, user::Entity>(db, "technician", id).await?;
    }
    if let Some(id) = property_id {
        ensure_exists::<_, property::Entity>(db, "property", id).await?;
    }
    if let Some(id) = contact_id {
        ensure_exists::<_, contact::Entity>(db, "contact", id).await?;
    }
    Ok(())
}

/// A referenced row that does not exist is a client mistake, reported as 400.
async fn ensure_exists<C, E>(db: &C, entity: &str, id: i32) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
{
    match E::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::Validation(format!("{entity} {id} does not exist"))),
    }
}

async fn by_id<C, E>(
    db: &C,
    column: E::Column,
    ids: BTreeSet<i32>,
    key: fn(&E::Model) -> i32,
) -> Result<HashMap<i32, E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = E::find().filter(column.is_in(ids)).all(db).await?;
    Ok(rows.into_iter().map(|m| (key(&m), m)).collect())
}

/// Load the customer, technician, property and contact of every job with one
/// query per table, preserving the input order.
pub async fn hydrate<C: ConnectionTrait>(db: &C, jobs: Vec<job::Model>) -> Result<Vec<JobRecord>, ServiceError> {
    if jobs.is_empty() {
        return Ok(Vec::new());
    }
    let customers = by_id::<_, customer::Entity>(
        db,
        customer::Column::Id,
        jobs.iter().map(|j| j.customer_id).collect(),
        |m| m.id,
    )
    .await?;
    let technicians = by_id::<_, user::Entity>(
        db,
        user::Column::Id,
        jobs.iter().filter_map(|j| j.technician_id).collect(),
        |m| m.id,
    )
    .await?;
    let properties = by_id::<_, property::Entity>(
        db,
        property::Column::Id,
        jobs.iter().filter_map(|j| j.property_id).collect(),
        |m| m.id,
    )
    .await?;
    let contacts = by_id::<_, contact::Entity>(
        db,
        contact::Column::Id,
        jobs.iter().filter_map(|j| j.contact_id).collect(),
        |m| m.id,
    )
    .await?;

    jobs.into_iter()
        .map(|job| {
            let customer = customers
                .get(&job.customer_id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("customer", job.customer_id))?;
            Ok(JobRecord {
                technician: job.technician_id.and_then(|id| technicians.get(&id).cloned()),
                property: job.property_id.and_then(|id| properties.get(&id).cloned()),
                contact: job.contact_id.and_then(|id| contacts.get(&id).cloned()),
                customer,
                job,
            })
        })
        .collect()
}

pub async fn hydrate_one<C: ConnectionTrait>(db: &C, job: job::Model) -> Result<JobRecord, ServiceError> {
    let id = job.id;
    hydrate(db, vec![job])
        .await?
        .pop()
        .ok_or_else(|| ServiceError::not_found("job", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seeded_db, today};
    use serde_json::json;

    fn new_job(v: serde_json::Value) -> NewJob {
        serde_json::from_value(v).unwrap()
    }

    fn job_update(v: serde_json::Value) -> JobUpdate {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn create_defaults_to_scheduled_without_time() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let v = create_job(&db, new_job(json!({"customer_id": 1, "description": "Ant check", "job_date": "2024-06-01"}))).await?;
        assert_eq!(v.status, "Scheduled");
        assert_eq!(v.job_time, None);
        assert_eq!(v.title, "John Doe - Ant check");
        assert_eq!(v.start, "2024-06-01T09:00:00");
        assert_eq!(v.technician_name, "Unassigned");
        Ok(())
    }

    #[tokio::test]
    async fn create_accepts_string_ids_and_links() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let v = create_job(
            &db,
            new_job(json!({
                "customer_id": "2", "description": " Wasps ", "job_date": "2024-06-03",
                "job_time": "08:15", "technician_id": "3", "property_id": 2, "contact_id": 2, "notes": "Gate code 42"
            })),
        )
        .await?;
        assert_eq!(v.description, "Wasps");
        assert_eq!(v.job_time.as_deref(), Some("08:15"));
        assert_eq!(v.technician_name, "Dave");
        assert_eq!(v.resource_id, Some(3));
        assert_eq!(v.property.as_ref().map(|p| p.id), Some(2));
        assert_eq!(v.contact.as_ref().map(|c| c.id), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_bad_input_without_writing() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let before = list_jobs(&db).await?.len();

        let cases = [
            json!({"description": "x", "job_date": "2024-06-01"}),
            json!({"customer_id": 1, "description": "  ", "job_date": "2024-06-01"}),
            json!({"customer_id": 1, "description": "x"}),
            json!({"customer_id": 1, "description": "x", "job_date": "06/01/2024"}),
            json!({"customer_id": 1, "description": "x", "job_date": "2024-06-01", "job_time": "9am"}),
            json!({"customer_id": 99, "description": "x", "job_date": "2024-06-01"}),
            json!({"customer_id": 1, "description": "x", "job_date": "2024-06-01", "technician_id": 99}),
        ];
        for case in cases {
            let err = create_job(&db, new_job(case.clone())).await.unwrap_err();
            assert!(
                matches!(err, ServiceError::Validation(_) | ServiceError::Model(_)),
                "{case}: {err:?}"
            );
        }
        assert_eq!(list_jobs(&db).await?.len(), before);
        Ok(())
    }

    #[tokio::test]
    async fn list_orders_by_date_descending() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let jobs = list_jobs(&db).await?;
        let dates: Vec<&str> = jobs.iter().map(|j| j.job_date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(jobs.last().map(|j| j.description.as_str()), Some("Rodent inspection"));
        Ok(())
    }

    #[tokio::test]
    async fn agenda_is_ordered_by_time() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let day = agenda(&db, today()).await?;
        let times: Vec<_> = day.iter().map(|j| j.job_time.clone().unwrap_or_default()).collect();
        assert_eq!(times, vec!["09:30", "11:00"]);
        assert!(agenda(&db, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn explicit_null_clears_links_and_absent_keeps_them() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let v = update_job(&db, 1, job_update(json!({"notes": "Bring ladder"}))).await?;
        assert_eq!(v.technician_id, Some(2));
        assert!(v.property.is_some());

        let v = update_job(&db, 1, job_update(json!({"technician_id": null, "property_id": null}))).await?;
        assert_eq!(v.technician_id, None);
        assert_eq!(v.technician_name, "Unassigned");
        assert!(v.property.is_none());
        assert!(v.contact.is_some());
        assert_eq!(v.notes.as_deref(), Some("Bring ladder"));
        Ok(())
    }

    #[tokio::test]
    async fn explicit_date_and_time_win_over_start() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let v = update_job(&db, 3, job_update(json!({"start": "2024-07-04T15:45:00"}))).await?;
        assert_eq!(v.job_date, "2024-07-04");
        assert_eq!(v.job_time.as_deref(), Some("15:45"));

        let v = update_job(
            &db,
            3,
            job_update(json!({"start": "2024-08-01T10:00:00", "job_date": "2024-08-02", "job_time": "16:30"})),
        )
        .await?;
        assert_eq!(v.start, "2024-08-02T16:30:00");
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_leaves_row_untouched() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let err = update_job(&db, 1, job_update(json!({"status": "Completed", "job_time": "noon"}))).await;
        assert!(err.is_err());
        let stored = job::Entity::find_by_id(1).one(&db).await?.unwrap();
        assert_eq!(stored.status, job::STATUS_SCHEDULED);

        let missing = update_job(&db, 404, JobUpdate::default()).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn completing_a_job_turns_it_green() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let v = update_job(&db, 1, job_update(json!({"status": "Completed"}))).await?;
        assert_eq!(v.color, "green");
        Ok(())
    }

    #[tokio::test]
    async fn hydrate_empty_is_empty() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(hydrate(&db, Vec::new()).await?.is_empty());
        Ok(())
    }
}
