use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use service::calendar;

use crate::errors::ApiError;
use crate::extract::PathParam;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/calendar/{technician_id}/feed.ics",
    tag = "calendar",
    params(("technician_id" = i32, Path, description = "Technician user id")),
    responses((status = 200, description = "iCalendar feed of open jobs", content_type = "text/calendar"), (status = 404, description = "Unknown technician"))
)]
pub async fn feed(State(state): State<AppState>, PathParam(technician_id): PathParam<i32>) -> Result<impl IntoResponse, ApiError> {
    let body = calendar::technician_feed(&state.db, technician_id).await?;
    Ok(([(header::CONTENT_TYPE, calendar::CONTENT_TYPE)], body))
}
