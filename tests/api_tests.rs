use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use localpulse::api::AppState;
use localpulse::config::Config;
use localpulse::db::{NewAlert, NewBusiness};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Router, Arc<AppState>) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // A single pooled connection so every query sees the same in-memory db.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;

    let state = localpulse::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    let app = localpulse::api::router(state.clone()).await;

    (app, state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_alert_round_trip() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            serde_json::json!({
                "alert_type": "new_business",
                "title": "New Coffee Shop",
                "description": "Blue Bottle Coffee opened at 123 Main St"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let inserted = &body["data"][0];
    assert!(inserted["id"].is_number());
    assert!(!inserted["created_at"].as_str().unwrap().is_empty());
    assert_eq!(inserted["alert_type"], "new_business");

    let response = app.oneshot(get_request("/api/alerts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"New Coffee Shop"));
}

#[tokio::test]
async fn test_alert_list_joins_business_name_and_address() {
    let (app, state) = spawn_app().await;

    let business = state
        .store()
        .add_business(NewBusiness {
            name: "Blue Bottle Coffee".to_string(),
            address: "123 Main St".to_string(),
            category: Some("Coffee Shop".to_string()),
            status: Some("active".to_string()),
            rating: Some(4.5),
            review_count: Some(234),
        })
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            serde_json::json!({
                "business_id": business.id,
                "alert_type": "new_business",
                "title": "New Coffee Shop"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/api/alerts")).await.unwrap();
    let body = body_json(response).await;

    let alert = &body["data"][0];
    assert_eq!(alert["businesses"]["name"], "Blue Bottle Coffee");
    assert_eq!(alert["businesses"]["address"], "123 Main St");
}

#[tokio::test]
async fn test_alerts_capped_at_50_newest_first() {
    let (app, state) = spawn_app().await;

    for i in 0..55 {
        state
            .store()
            .create_alert(NewAlert {
                business_id: None,
                alert_type: Some("new_business".to_string()),
                title: Some(format!("Alert {i}")),
                description: None,
            })
            .await
            .unwrap();
    }

    let response = app.oneshot(get_request("/api/alerts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let alerts = body["data"].as_array().unwrap();

    assert_eq!(alerts.len(), 50);
    assert_eq!(alerts[0]["title"], "Alert 54");

    // Strictly non-increasing creation order. Timestamps are fixed-width
    // RFC 3339, so the string comparison matches the instant comparison.
    for pair in alerts.windows(2) {
        let newer = pair[0]["created_at"].as_str().unwrap();
        let older = pair[1]["created_at"].as_str().unwrap();
        assert!(newer >= older);
    }
}

#[tokio::test]
async fn test_alert_with_unknown_fields_is_accepted() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            serde_json::json!({
                "alert_type": "permit_filed",
                "title": "Permit Filed",
                "severity": "high",
                "source": "city-records"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"][0]["alert_type"], "permit_filed");
}

#[tokio::test]
async fn test_alert_missing_required_field_is_a_store_error() {
    let (app, _state) = spawn_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/alerts", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_tracked_areas_round_trip_newest_first() {
    let (app, _state) = spawn_app().await;

    for name in ["Downtown Austin", "South Congress"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/tracked-areas",
                serde_json::json!({ "name": name, "location": "Austin, TX" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get_request("/api/tracked-areas")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let areas = body["data"].as_array().unwrap();

    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["name"], "South Congress");
    assert_eq!(areas[1]["name"], "Downtown Austin");
    // Nothing ever writes last_scan.
    assert!(areas[0]["last_scan"].is_null());
}

#[tokio::test]
async fn test_waitlist_signup_echoes_row() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/waitlist",
            serde_json::json!({
                "email": "jane@example.com",
                "market_interest": "Austin, TX",
                "business_type": "Coffee Shop"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Added to waitlist");
    assert_eq!(body["data"][0]["email"], "jane@example.com");
    assert!(body["data"][0]["id"].is_number());
    assert!(!body["data"][0]["created_at"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_waitlist_email_is_not_an_error() {
    let (app, _state) = spawn_app().await;

    let signup = serde_json::json!({
        "email": "jane@example.com",
        "market_interest": "Austin, TX",
        "business_type": "Coffee Shop"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/waitlist", signup.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/waitlist", signup))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Already on waitlist");
    assert!(body["data"].is_null());

    // Still exactly one row.
    let response = app.oneshot(get_request("/api/waitlist")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_waitlist_ignores_extra_fields() {
    let (app, _state) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/waitlist",
            serde_json::json!({
                "email": "sam@example.com",
                "market_interest": "Denver, CO",
                "business_type": "Gym",
                "referral": "twitter"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/api/waitlist")).await.unwrap();
    let body = body_json(response).await;
    let entry = &body["data"][0];

    assert_eq!(entry["email"], "sam@example.com");
    assert!(entry.get("referral").is_none());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_400() {
    use sea_orm::{ConnectionTrait, Statement};

    let (app, state) = spawn_app().await;

    let backend = state.store().conn.get_database_backend();
    state
        .store()
        .conn
        .execute(Statement::from_string(
            backend,
            "DROP TABLE alerts".to_string(),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/api/alerts"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(!body["error"].as_str().unwrap().is_empty());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/alerts",
            serde_json::json!({ "alert_type": "closure", "title": "Gone" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
