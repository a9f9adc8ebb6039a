use axum::{extract::State, Json};

use service::auth_service::{self, LoginInput, LoginSession};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = crate::openapi::LoginDoc,
    responses((status = 200, description = "Logged in"), (status = 404, description = "User not found"))
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<LoginSession>, ApiError> {
    Ok(Json(auth_service::login(&state.db, &state.tokens, input).await?))
}
