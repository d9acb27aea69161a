use axum::http::StatusCode;

use patient_monitor_domain::entities::{Department, PatientStatus};
use patient_monitor_domain::testing::{fixtures::patient, MockDashboardService};

use super::{body_json, get, send, test_app, test_app_with};

#[tokio::test]
async fn test_full_dashboard_regression() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-session-id"));
    assert!(response.headers().contains_key("set-cookie"));

    let body = body_json(response).await;
    assert_eq!(body["summary"]["total"], 100);
    assert_eq!(body["summary"]["critical"], 8);
    assert_eq!(body["summary"]["needs_attention"], 14);
    assert_eq!(body["summary"]["stable"], 78);
    assert_eq!(body["metrics"].as_array().unwrap().len(), 6);
    assert_eq!(body["table"]["total_count"], 100);
    assert_eq!(body["table"]["rows"].as_array().unwrap().len(), 100);
}

#[tokio::test]
async fn test_status_filter_narrows_every_view() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard?statuses=Critical")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["total"], 8);
    assert_eq!(body["table"]["total_count"], 8);
    for row in body["table"]["rows"].as_array().unwrap() {
        assert_eq!(row["status"], "Critical");
    }
}

#[tokio::test]
async fn test_department_and_age_filters() {
    let app = test_app();
    let response = send(
        &app,
        get("/api/v1/patients?departments=Cardiology,Surgery&statuses=Critical"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_count"], 4);

    let response = send(&app, get("/api/v1/patients?age_min=30&age_max=60")).await;
    let body = body_json(response).await;
    assert_eq!(body["total_count"], 40);
    for row in body["rows"].as_array().unwrap() {
        let age = row["age"].as_u64().unwrap();
        assert!((30..=60).contains(&age));
    }
}

#[tokio::test]
async fn test_inverted_age_range_is_empty_not_an_error() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard?age_min=70&age_max=20")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["total"], 0);
    let mean_age = body["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|metric| metric["key"] == "mean_age")
        .unwrap();
    assert_eq!(mean_age["value"], "N/A");
}

#[tokio::test]
async fn test_unknown_label_is_rejected() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard?departments=Oncology")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("Oncology"));
}

#[tokio::test]
async fn test_non_numeric_age_is_rejected() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard/metrics?age_min=young")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_out_of_range_limit_is_rejected() {
    let app = test_app();
    let response = send(&app, get("/api/v1/patients?limit=0")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["limit"].is_array());
}

#[tokio::test]
async fn test_sorted_page_of_patients() {
    let app = test_app();
    let response = send(&app, get("/api/v1/patients?sort_by=age&sort_dir=desc&limit=5&offset=0")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total_count"], 100);
    let ages: Vec<u64> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["age"].as_u64().unwrap())
        .collect();
    assert_eq!(ages.len(), 5);
    assert_eq!(ages[0], 90);
    assert!(ages.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn test_filter_options() {
    let app = test_app();
    let response = send(&app, get("/api/v1/dashboard/filters")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["departments"].as_array().unwrap().len(), 5);
    assert_eq!(body["statuses"].as_array().unwrap().len(), 3);
    assert_eq!(body["age_bounds"]["min"], 18);
    assert_eq!(body["age_bounds"]["max"], 90);
}

#[tokio::test]
async fn test_chart_endpoints() {
    let app = test_app();

    let body = body_json(send(&app, get("/api/v1/dashboard/charts/status")).await).await;
    let total: u64 = body["slices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slice| slice["count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 100);

    let body = body_json(send(&app, get("/api/v1/dashboard/charts/departments")).await).await;
    assert_eq!(body["bars"][0]["department"], "Therapy");
    assert_eq!(body["bars"][0]["count"], 28);

    let body = body_json(send(&app, get("/api/v1/dashboard/charts/vitals?vital=temperature")).await).await;
    assert_eq!(body["y_label"], "Temperature (°C)");

    let response = send(&app, get("/api/v1/dashboard/charts/vitals?vital=glucose")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_custom_table() {
    let app = test_app_with(MockDashboardService::new().with_patients(vec![
        patient("P0001", 40, Department::Surgery, PatientStatus::Stable),
        patient("P0002", 65, Department::Surgery, PatientStatus::Critical),
    ]));

    let body = body_json(send(&app, get("/api/v1/dashboard/metrics")).await).await;
    let total = body
        .as_array()
        .unwrap()
        .iter()
        .find(|metric| metric["key"] == "total")
        .unwrap();
    assert_eq!(total["value"], "2");
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let app = test_app_with(MockDashboardService::new().with_store_failure());
    let response = send(&app, get("/api/v1/dashboard")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
}
