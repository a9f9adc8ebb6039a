use axum::{
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod calendar;
pub mod customers;
pub mod insights;
pub mod jobs;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router over `state`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/dashboard", get(insights::dashboard))
        .route("/api/reports", get(insights::reports))
        .route("/api/inventory", get(insights::inventory))
        .route("/api/marketing", get(insights::list_campaigns).post(insights::create_campaign))
        .route("/api/jobs", get(jobs::list).post(jobs::create))
        .route("/api/jobs/:id", put(jobs::update))
        .route("/api/agenda/:date", get(jobs::agenda))
        .route("/api/customers", get(customers::list).post(customers::create))
        .route("/api/customers/bulk-upload", post(customers::bulk_upload))
        .route(
            "/api/customers/:id",
            get(customers::detail).put(customers::update).delete(customers::remove),
        )
        .route(
            "/api/customers/:id/properties",
            get(customers::list_properties).post(customers::create_property),
        )
        .route(
            "/api/customers/:id/contacts",
            get(customers::list_contacts).post(customers::create_contact),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", put(users::update).delete(users::remove))
        .route("/api/technicians", get(users::technicians))
        .route("/api/auth/login", post(auth::login))
        .route("/api/calendar/:technician_id/feed.ics", get(calendar::feed));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
