//! Dashboard, reports, stock and marketing pages.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Local;

use service::inventory_service;
use service::marketing_service::{self, NewCampaign};
use service::report_service::{self, Dashboard, Reports};
use service::views::{CampaignView, InventoryView};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[utoipa::path(get, path = "/api/dashboard", tag = "insights", responses((status = 200, description = "Headline stats and recent activity")))]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, ApiError> {
    Ok(Json(report_service::dashboard(&state.db, Local::now().date_naive()).await?))
}

#[utoipa::path(get, path = "/api/reports", tag = "insights", responses((status = 200, description = "Job and technician aggregates")))]
pub async fn reports(State(state): State<AppState>) -> Result<Json<Reports>, ApiError> {
    Ok(Json(report_service::reports(&state.db).await?))
}

#[utoipa::path(get, path = "/api/inventory", tag = "insights", responses((status = 200, description = "Stock with derived status")))]
pub async fn inventory(State(state): State<AppState>) -> Result<Json<Vec<InventoryView>>, ApiError> {
    Ok(Json(inventory_service::list_inventory(&state.db).await?))
}

#[utoipa::path(get, path = "/api/marketing", tag = "insights", responses((status = 200, description = "Campaigns, newest first")))]
pub async fn list_campaigns(State(state): State<AppState>) -> Result<Json<Vec<CampaignView>>, ApiError> {
    Ok(Json(marketing_service::list_campaigns(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/api/marketing",
    tag = "insights",
    request_body = crate::openapi::CampaignDoc,
    responses((status = 201, description = "Draft created"), (status = 400, description = "Name missing"))
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewCampaign>,
) -> Result<(StatusCode, Json<CampaignView>), ApiError> {
    let created = marketing_service::create_campaign(&state.db, input, Local::now().date_naive()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
