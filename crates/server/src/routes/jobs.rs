use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use service::job_service::{self, JobUpdate, NewJob};
use service::views::JobView;

use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/jobs", tag = "jobs", responses((status = 200, description = "Jobs, newest date first")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobView>>, ApiError> {
    Ok(Json(job_service::list_jobs(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "jobs",
    request_body = crate::openapi::NewJobDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Invalid payload"))
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewJob>,
) -> Result<(StatusCode, Json<JobView>), ApiError> {
    let created = job_service::create_job(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{id}",
    tag = "jobs",
    params(("id" = i32, Path, description = "Job id")),
    request_body = crate::openapi::JobUpdateDoc,
    responses((status = 200, description = "Updated"), (status = 400, description = "Invalid payload"), (status = 404, description = "Unknown job"))
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<JobUpdate>,
) -> Result<Json<JobView>, ApiError> {
    Ok(Json(job_service::update_job(&state.db, id, patch).await?))
}

#[utoipa::path(
    get,
    path = "/api/agenda/{date}",
    tag = "jobs",
    params(("date" = String, Path, description = "Day as YYYY-MM-DD")),
    responses((status = 200, description = "Jobs on that day by time"), (status = 400, description = "Malformed date"))
)]
pub async fn agenda(State(state): State<AppState>, PathParam(date): PathParam<String>) -> Result<Json<Vec<JobView>>, ApiError> {
    let day = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| ApiError::bad_request(format!("Invalid date format: {date} ({e})")))?;
    Ok(Json(job_service::agenda(&state.db, day).await?))
}
