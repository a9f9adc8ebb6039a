use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{contact, customer, errors, property, user};

pub const STATUS_SCHEDULED: &str = "Scheduled";
pub const STATUS_COMPLETED: &str = "Completed";

/// Hour used for display and calendar export when a job has no explicit time.
pub const DEFAULT_START_HOUR: u32 = 9;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub technician_id: Option<i32>,
    pub property_id: Option<i32>,
    pub contact_id: Option<i32>,
    pub description: String,
    pub notes: Option<String>,
    pub status: String,
    pub job_date: NaiveDate,
    pub job_time: Option<NaiveTime>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    Technician,
    Property,
    Contact,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
            Relation::Technician => Entity::belongs_to(user::Entity)
                .from(Column::TechnicianId)
                .to(user::Column::Id)
                .into(),
            Relation::Property => Entity::belongs_to(property::Entity)
                .from(Column::PropertyId)
                .to(property::Column::Id)
                .into(),
            Relation::Contact => Entity::belongs_to(contact::Entity)
                .from(Column::ContactId)
                .to(contact::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Technician.def() }
}

impl Related<property::Entity> for Entity {
    fn to() -> RelationDef { Relation::Property.def() }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contact.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Scheduled start: the job date combined with its time, or 09:00 when unset.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.job_date.and_time(self.job_time.unwrap_or_else(default_start_time))
    }

    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

pub fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or_default()
}

pub fn validate_description(description: &str) -> Result<(), errors::ModelError> {
    if description.trim().is_empty() { return Err(errors::ModelError::Validation("Description is required".into())); }
    Ok(())
}

/// Parse an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_job_date(raw: &str) -> Result<NaiveDate, errors::ModelError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| errors::ModelError::Validation(format!("Invalid isoformat string: '{raw}' ({e})")))
}

/// Parse a wall-clock time in `HH:MM` form.
pub fn parse_job_time(raw: &str) -> Result<NaiveTime, errors::ModelError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|e| errors::ModelError::Validation(format!("Invalid job_time '{raw}', expected HH:MM ({e})")))
}

/// Parse a combined ISO start timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` (`T` or space separator), RFC 3339 with an
/// offset (the wall-clock part is kept), or a bare date meaning midnight.
pub fn parse_start(raw: &str) -> Result<NaiveDateTime, errors::ModelError> {
    let s = raw.trim();
    const FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
    if let Some(dt) = FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(s, f).ok()) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::default()));
    }
    Err(errors::ModelError::Validation(format!("Invalid isoformat string: '{raw}'")))
}
