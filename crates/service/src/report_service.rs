//! Read-only aggregations behind the dashboard and reports pages.
//!
//! Revenue figures are illustrative placeholders: no invoices are stored, so
//! the monthly trend is fixed and monthly revenue is a flat rate per job.

use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;

use models::{customer, job, user};
use crate::errors::ServiceError;
use crate::inventory_service;

/// Placeholder revenue credited per job on the dashboard.
pub const REVENUE_PER_JOB: i64 = 150;

const REVENUE_TREND: [(&str, i64); 6] =
    [("Jan", 13000), ("Feb", 15500), ("Mar", 18000), ("Apr", 15000), ("May", 19000), ("Jun", 26000)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub name: &'static str,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianJobs {
    pub name: String,
    pub jobs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: u64,
    pub jobs_today: u64,
    pub revenue_this_month: i64,
    pub inventory_alerts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub revenue_trend: Vec<RevenuePoint>,
    pub job_status_distribution: Vec<NamedValue>,
    pub recent_activity: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reports {
    pub job_status_distribution: Vec<NamedValue>,
    pub revenue_trend: Vec<RevenuePoint>,
    pub technician_performance: Vec<TechnicianJobs>,
}

#[derive(Debug, FromQueryResult)]
struct EmailJobCount {
    email: String,
    jobs: i64,
}

pub fn revenue_trend() -> Vec<RevenuePoint> {
    REVENUE_TREND.iter().map(|&(name, revenue)| RevenuePoint { name, revenue }).collect()
}

/// Completed and Scheduled job counts, in that order.
pub async fn job_status_distribution(db: &DatabaseConnection) -> Result<Vec<NamedValue>, ServiceError> {
    let mut out = Vec::with_capacity(2);
    for status in [job::STATUS_COMPLETED, job::STATUS_SCHEDULED] {
        let value = job::Entity::find().filter(job::Column::Status.eq(status)).count(db).await?;
        out.push(NamedValue { name: status.to_string(), value });
    }
    Ok(out)
}

/// Jobs per assigned technician; staff without jobs are left out.
pub async fn technician_performance(db: &DatabaseConnection) -> Result<Vec<TechnicianJobs>, ServiceError> {
    let rows = user::Entity::find()
        .select_only()
        .column(user::Column::Email)
        .column_as(Expr::col((job::Entity, job::Column::Id)).count(), "jobs")
        .join(JoinType::InnerJoin, user::Relation::Jobs.def())
        .group_by(user::Column::Email)
        .order_by_asc(user::Column::Email)
        .into_model::<EmailJobCount>()
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| TechnicianJobs { name: user::display_name(&r.email), jobs: r.jobs })
        .collect())
}

pub async fn dashboard(db: &DatabaseConnection, today: NaiveDate) -> Result<Dashboard, ServiceError> {
    let total_customers = customer::Entity::find().count(db).await?;
    let total_jobs = job::Entity::find().count(db).await?;
    let jobs_today = job::Entity::find().filter(job::Column::JobDate.eq(today)).count(db).await?;
    let recent = job::Entity::find().order_by_desc(job::Column::Id).limit(3).all(db).await?;

    Ok(Dashboard {
        stats: DashboardStats {
            total_customers,
            jobs_today,
            revenue_this_month: i64::try_from(total_jobs).unwrap_or(i64::MAX).saturating_mul(REVENUE_PER_JOB),
            inventory_alerts: inventory_service::count_alerts(db).await?,
        },
        revenue_trend: revenue_trend(),
        job_status_distribution: job_status_distribution(db).await?,
        recent_activity: recent
            .into_iter()
            .map(|j| Activity {
                id: j.id,
                kind: "job",
                description: format!("Job #{} ({}) status: {}", j.id, j.description, j.status),
            })
            .collect(),
    })
}

pub async fn reports(db: &DatabaseConnection) -> Result<Reports, ServiceError> {
    Ok(Reports {
        job_status_distribution: job_status_distribution(db).await?,
        revenue_trend: revenue_trend(),
        technician_performance: technician_performance(db).await?,
    })
}
