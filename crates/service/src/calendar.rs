//! iCalendar export of a technician's open jobs.

use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use models::{job, user};
use crate::errors::ServiceError;
use crate::job_service::hydrate;
use crate::views::JobRecord;

pub const CONTENT_TYPE: &str = "text/calendar";

/// Every event blocks one hour, whatever the job actually takes.
pub const EVENT_DURATION_HOURS: i64 = 1;

/// Feed document with one event per job of `technician_id` that is not completed.
pub async fn technician_feed(db: &DatabaseConnection, technician_id: i32) -> Result<String, ServiceError> {
    let technician = user::Entity::find_by_id(technician_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("technician", technician_id))?;
    let jobs = job::Entity::find()
        .filter(job::Column::TechnicianId.eq(technician.id))
        .filter(job::Column::Status.ne(job::STATUS_COMPLETED))
        .order_by_asc(job::Column::JobDate)
        .order_by_asc(job::Column::JobTime)
        .all(db)
        .await?;
    let records = hydrate(db, jobs).await?;
    debug!(technician_id, events = records.len(), "rendering calendar feed");
    Ok(render_feed(&records).to_string())
}

pub fn render_feed(records: &[JobRecord]) -> Calendar {
    let mut calendar = Calendar::new();
    for record in records {
        calendar.push(job_event(record));
    }
    calendar.done()
}

fn job_event(record: &JobRecord) -> Event {
    let job = &record.job;
    let begin = job.starts_at();
    let location = record.location().unwrap_or_default();
    let description = format!(
        "Customer: {}\nAddress: {}\nPhone: {}\nNotes: {}",
        record.customer.name,
        location,
        record.customer.phone.as_deref().unwrap_or("N/A"),
        job.notes.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or("N/A"),
    );
    Event::new()
        .uid(&format!("job-{}@pestpro", job.id))
        .summary(&format!("Job: {}", job.description))
        .starts(begin)
        .ends(begin + Duration::hours(EVENT_DURATION_HOURS))
        .description(&description)
        .location(location)
        .done()
}
