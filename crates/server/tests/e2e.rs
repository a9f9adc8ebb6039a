use std::net::SocketAddr;

use axum::Router;
use chrono::Local;
use configs::{AuthConfig, DatabaseConfig};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::routes;
use server::startup::build_cors;
use server::state::AppState;

const ORIGIN: &str = "http://localhost:5173";

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_with_config(&DatabaseConfig::in_memory()).await?;
    service::seed::bootstrap(&db, Local::now().date_naive()).await?;
    let auth = AuthConfig { secret_key: "e2e-secret".into(), token_ttl_hours: 1 };
    let app: Router = routes::build_router(AppState::new(db, &auth), build_cors(&[ORIGIN.to_string()])?);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });
    Ok(TestApp { base_url: format!("http://{addr}") })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_cors_allows_configured_origin_only() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/api/customers", app.base_url))
        .header("Origin", ORIGIN)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some(ORIGIN)
    );
    assert_eq!(
        res.headers().get("access-control-allow-credentials").and_then(|v| v.to_str().ok()),
        Some("true")
    );

    let res = client
        .get(format!("{}/api/customers", app.base_url))
        .header("Origin", "http://evil.example")
        .send()
        .await?;
    assert!(res.headers().get("access-control-allow-origin").is_none());
    Ok(())
}

#[tokio::test]
async fn e2e_schedule_and_export_job() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/customers", app.base_url))
        .json(&json!({"name": "Rita Roach", "address": "12 Cedar Ln", "phone": "216-555-0177"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let customer: Value = res.json().await?;

    let res = client
        .post(format!("{}/api/jobs", app.base_url))
        .json(&json!({
            "customer_id": customer["id"].to_string(),
            "technician_id": 3,
            "description": "Roach treatment",
            "job_date": "2030-01-15",
            "job_time": "08:15",
            "notes": "Gate code 4411"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let job: Value = res.json().await?;
    assert_eq!(job["start"], "2030-01-15T08:15:00");
    assert_eq!(job["technician_name"], "Dave");

    let res = client.get(format!("{}/api/calendar/3/feed.ics", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let feed = res.text().await?;
    assert_eq!(feed.matches("BEGIN:VEVENT").count(), 1);
    assert!(feed.contains("DTSTART:20300115T081500"));
    assert!(feed.contains("12 Cedar Ln"));
    Ok(())
}
