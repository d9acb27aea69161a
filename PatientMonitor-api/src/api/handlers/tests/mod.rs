// Handler tests drive the full router against the mock dashboard service

mod dashboard_test;
mod health_test;
mod page_test;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use tower::ServiceExt;

use patient_monitor_domain::services::create_mock_dashboard_service;
use patient_monitor_domain::testing::MockDashboardService;

use crate::api::routes::{create_app_with_service, DashboardState};
use crate::config::AppConfig;

pub(crate) fn test_app_with(service: MockDashboardService) -> Router {
    let service: DashboardState = Arc::new(service);
    create_app_with_service(service, &AppConfig::default())
}

pub(crate) fn test_app() -> Router {
    let service: DashboardState = Arc::new(create_mock_dashboard_service());
    create_app_with_service(service, &AppConfig::default())
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub(crate) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
