use axum::{body::to_bytes, http::StatusCode};

use super::{get, send, test_app};

#[tokio::test]
async fn test_index_page() {
    let app = test_app();
    let response = send(&app, get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let csp = response
        .headers()
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("https://cdn.plot.ly"));
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Patient Monitoring Dashboard"));
    assert!(html.contains("/static/dashboard.js"));
}

#[tokio::test]
async fn test_dashboard_script() {
    let app = test_app();
    let response = send(&app, get("/static/dashboard.js")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("application/javascript"));
    // Static assets never open a session
    assert!(response.headers().get("x-session-id").is_none());

    // Filter lists start empty so the first view is unrestricted
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let script = String::from_utf8(body.to_vec()).unwrap();
    assert!(script.contains("fillSelect"));
    assert!(!script.contains(".selected ="));
}

#[tokio::test]
async fn test_swagger_document_is_served() {
    let app = test_app();
    let response = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
