use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Extension};

use patient_monitor_domain::health::{ComponentStatus, HealthServiceTrait};
use patient_monitor_domain::testing::{create_mock_health_service, MockDashboardService, MockHealthService};

use crate::api::handlers::health::{health_check, initialize_server_start_time};
use crate::config::AppConfig;

use super::{body_json, get, send, test_app, test_app_with};

async fn check(service: MockHealthService) -> (StatusCode, serde_json::Value) {
    initialize_server_start_time();
    let service: Arc<dyn HealthServiceTrait + Send + Sync> = Arc::new(service);
    let config = AppConfig {
        environment: "test".to_string(),
        ..AppConfig::default()
    };

    let response = health_check(Extension(service), Extension(Arc::new(config)))
        .await
        .into_response();
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn test_healthy_service() {
    let (status, body) = check(MockHealthService::new()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["components"]["session_store"]["status"], "ok");
    assert_eq!(body["components"]["api"]["status"], "ok");
    assert!(body["uptime"].is_u64());
    assert!(body["components"].get("additional").is_none());
}

#[tokio::test]
async fn test_factory_mock_is_healthy() {
    let service: Arc<dyn HealthServiceTrait + Send + Sync> = Arc::new(create_mock_health_service());
    assert_eq!(service.check_session_store_status().await, Ok(true));

    let response = health_check(Extension(service), Extension(Arc::new(AppConfig::default())))
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_degraded_session_store() {
    let (status, body) = check(MockHealthService::new().with_degraded_session_store()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["session_store"]["status"], "degraded");
    assert_eq!(
        body["components"]["session_store"]["message"],
        "Session store is close to capacity"
    );
}

#[tokio::test]
async fn test_unhealthy_session_store() {
    let (status, body) = check(MockHealthService::new().with_unhealthy_session_store()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_additional_components_are_reported() {
    let service = MockHealthService::new().with_component(
        "generator",
        ComponentStatus::Degraded,
        Some("slow".to_string()),
    );
    let (status, body) = check(service).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["components"]["additional"]["generator"]["status"], "degraded");
    assert_eq!(body["components"]["additional"]["generator"]["message"], "slow");
}

#[tokio::test]
async fn test_health_route_reports_session_store() {
    let app = test_app();
    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["environment"], "development");
    assert_eq!(body["components"]["session_store"]["message"], "0 of 1000 sessions active");

    let app = test_app_with(MockDashboardService::new().with_store_failure());
    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
