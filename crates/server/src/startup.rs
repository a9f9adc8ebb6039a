use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use chrono::Local;
use common::env::ensure_store_dir;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use service::seed;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Credentialed CORS restricted to the configured origins.
pub fn build_cors(origins: &[String]) -> Result<CorsLayer, StartupError> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| StartupError::InvalidConfig(format!("bad CORS origin {o:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Connect, bootstrap the store and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    ensure_store_dir(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    let outcome = seed::bootstrap(&db, Local::now().date_naive()).await?;
    info!(?outcome, "store ready");

    let cors = build_cors(&cfg.server.cors_origins)?;
    Ok(routes::build_router(AppState::new(db, &cfg.auth), cors))
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, origins = ?cfg.server.cors_origins, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
