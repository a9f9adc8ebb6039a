use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use service::contact_service::{self, NewContact};
use service::customer_service::{self, BulkUploadReport, CustomerUpdate, NewCustomer};
use service::property_service::{self, NewProperty};
use service::views::{ContactView, CustomerDetail, CustomerSummary, PropertyView};

use crate::errors::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BulkUploadBody {
    #[serde(default)]
    pub customers: Vec<Value>,
}

#[utoipa::path(get, path = "/api/customers", tag = "customers", responses((status = 200, description = "Customers by name")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerSummary>>, ApiError> {
    Ok(Json(customer_service::list_customers(&state.db).await?))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "customers",
    request_body = crate::openapi::CustomerDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Name missing"))
)]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<NewCustomer>,
) -> Result<(StatusCode, Json<CustomerSummary>), ApiError> {
    let created = customer_service::create_customer(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Customer with jobs, properties and contacts"), (status = 404, description = "Unknown customer"))
)]
pub async fn detail(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<CustomerDetail>, ApiError> {
    Ok(Json(customer_service::get_customer(&state.db, id).await?))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Unknown customer"))
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(patch): JsonBody<CustomerUpdate>,
) -> Result<Json<CustomerSummary>, ApiError> {
    Ok(Json(customer_service::update_customer(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Unknown customer"), (status = 409, description = "Customer still has jobs"))
)]
pub async fn remove(State(state): State<AppState>, PathParam(id): PathParam<i32>) -> Result<Json<Value>, ApiError> {
    customer_service::delete_customer(&state.db, id).await?;
    Ok(Json(json!({"message": "Customer deleted successfully"})))
}

#[utoipa::path(
    post,
    path = "/api/customers/bulk-upload",
    tag = "customers",
    request_body = crate::openapi::BulkUploadDoc,
    responses((status = 200, description = "Import summary"))
)]
pub async fn bulk_upload(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<BulkUploadBody>,
) -> Result<Json<BulkUploadReport>, ApiError> {
    Ok(Json(customer_service::bulk_upload(&state.db, body.customers).await?))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/properties",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Properties"), (status = 404, description = "Unknown customer"))
)]
pub async fn list_properties(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Vec<PropertyView>>, ApiError> {
    Ok(Json(property_service::list_properties(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/customers/{id}/properties",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::PropertyDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Address missing"), (status = 404, description = "Unknown customer"))
)]
pub async fn create_property(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<NewProperty>,
) -> Result<(StatusCode, Json<PropertyView>), ApiError> {
    let created = property_service::create_property(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/contacts",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    responses((status = 200, description = "Contacts"), (status = 404, description = "Unknown customer"))
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<Vec<ContactView>>, ApiError> {
    Ok(Json(contact_service::list_contacts(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/customers/{id}/contacts",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer id")),
    request_body = crate::openapi::ContactDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Name missing"), (status = 404, description = "Unknown customer"))
)]
pub async fn create_contact(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(input): JsonBody<NewContact>,
) -> Result<(StatusCode, Json<ContactView>), ApiError> {
    let created = contact_service::create_contact(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
