// End-to-end tests against the real session store and generator

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use patient_monitor_api::api::create_application;
use patient_monitor_api::config::AppConfig;

// Initialize tracing once for all tests
static INIT: std::sync::Once = std::sync::Once::new();
fn initialize() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .with_test_writer()
            .try_init();
    });
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let session = response
        .headers()
        .get("x-session-id")
        .map(|value| value.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, session, json)
}

fn get(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).method("GET");
    if let Some(id) = session {
        builder = builder.header("x-session-id", id);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_default_table_regression() {
    initialize();
    let app = create_application(&AppConfig::default());
    let (status, session, body) = call(&app, get("/api/v1/dashboard", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(session.is_some());
    assert_eq!(body["summary"]["total"], 100);
    assert_eq!(body["summary"]["stable"], 78);
    assert_eq!(body["summary"]["needs_attention"], 14);
    assert_eq!(body["summary"]["critical"], 8);
    assert_eq!(body["filter_options"]["age_bounds"]["min"], 18);
    assert_eq!(body["filter_options"]["age_bounds"]["max"], 90);
    assert_eq!(body["page"]["title"], "Patient Monitoring Dashboard");
}

#[tokio::test]
async fn test_session_keeps_its_table() {
    initialize();
    let app = create_application(&AppConfig::default());
    let (_, session, first) = call(&app, get("/api/v1/patients?limit=3", None)).await;
    let session = session.unwrap();

    let (_, echoed, second) = call(&app, get("/api/v1/patients?limit=3", Some(&session))).await;
    assert_eq!(echoed.as_deref(), Some(session.as_str()));
    assert_eq!(first["rows"], second["rows"]);

    let (status, _, ended) = call(
        &app,
        Request::builder()
            .uri("/api/v1/session")
            .method("DELETE")
            .header("x-session-id", &session)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["ended"], true);

    // The ended id is not resurrected
    let (_, renewed, body) = call(&app, get("/api/v1/session", Some(&session))).await;
    assert_ne!(renewed.as_deref(), Some(session.as_str()));
    assert_eq!(body["created"], true);
}

#[tokio::test]
async fn test_configured_table_size() {
    initialize();
    let config = AppConfig {
        patient_count: 25,
        data_seed: 7,
        session_ttl: Duration::from_secs(60),
        ..AppConfig::default()
    };
    let app = create_application(&config);

    let (status, _, body) = call(&app, get("/api/v1/dashboard/metrics", None)).await;
    assert_eq!(status, StatusCode::OK);
    let total = body
        .as_array()
        .unwrap()
        .iter()
        .find(|metric| metric["key"] == "total")
        .unwrap();
    assert_eq!(total["value"], "25");
}

#[tokio::test]
async fn test_bad_input_is_rejected() {
    initialize();
    let app = create_application(&AppConfig::default());

    let (status, _, body) = call(&app, get("/api/v1/dashboard?statuses=Recovering", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _, _) = call(&app, get("/api/v1/patients?sort_by=shoe_size", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_sessions() {
    initialize();
    let app = create_application(&AppConfig::default());
    call(&app, get("/api/v1/session", None)).await;

    let (status, _, body) = call(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"]["session_store"]["message"], "1 of 1000 sessions active");
}
