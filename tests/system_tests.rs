//! Integration tests for the system endpoints and the embedded pages.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use localpulse::api::AppState;
use localpulse::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = localpulse::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    let app = localpulse::api::router(state.clone()).await;

    (app, state)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_system_status_reports_row_counts() {
    let (app, state) = spawn_app().await;

    localpulse::db::seed::seed_demo(state.store()).await.unwrap();

    let response = app.oneshot(get_request("/api/system/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let status = &body["data"];

    assert_eq!(status["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(status["tracked_areas"], 3);
    assert_eq!(status["businesses"], 5);
    assert_eq!(status["alerts"], 3);
    assert_eq!(status["waitlist_signups"], 1);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/system/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "alive");

    let response = app
        .oneshot(get_request("/api/system/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["ready"], true);
    assert_eq!(body["data"]["checks"]["database"], true);
}

#[tokio::test]
async fn test_metrics_endpoint_responds_without_recorder() {
    let (app, _state) = spawn_app().await;

    let response = app.oneshot(get_request("/api/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_landing_page_is_served() {
    let (app, _state) = spawn_app().await;

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with(mime::TEXT_HTML.as_ref()));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("LocalPulse"));
    assert!(html.contains("Get Early Access"));
}

#[tokio::test]
async fn test_dashboard_page_is_served() {
    let (app, _state) = spawn_app().await;

    let response = app.oneshot(get_request("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Demo Mode"));
}

#[tokio::test]
async fn test_static_assets_and_missing_files() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/style.css"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/dashboard/dashboard.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/no-such-file.png")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
