use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use service::user_service::{self, NewUser, UserUpdate};
use service::views::{TechnicianView, UserView};

use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

#[utoipa::path(get, path = "/api/users", tag = "users", responses((status = 200, description = "All staff")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    Ok(Json(user_service::list_users(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = crate::openapi::UserDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Email or role missing"), (status = 409, description = "Email taken"))
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewUser>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let created = user_service::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    request_body = crate::openapi::RoleDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Unknown user"), (status = 409, description = "Last admin"))
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<UserUpdate>,
) -> Result<Json<UserView>, ApiError> {
    Ok(Json(user_service::update_user(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Unknown user"), (status = 409, description = "Last admin"))
)]
pub async fn remove(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    user_service::delete_user(&state.db, id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}

#[utoipa::path(get, path = "/api/technicians", tag = "users", responses((status = 200, description = "Technicians as scheduler resources")))]
pub async fn technicians(State(state): State<AppState>) -> Result<Json<Vec<TechnicianView>>, ApiError> {
    Ok(Json(user_service::list_technicians(&state.db).await?))
}
