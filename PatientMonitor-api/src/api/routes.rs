use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

use patient_monitor_domain::health::create_health_service;
use patient_monitor_domain::services::{create_default_dashboard_service, DashboardServiceTrait};

use crate::api::handlers::{dashboard, health, page, patients, session};
use crate::api::middleware::{session_middleware, SESSION_HEADER};
use crate::config::AppConfig;
use crate::openapi::configure_swagger_routes;

/// Shared state of the dashboard routes
pub type DashboardState = Arc<dyn DashboardServiceTrait + Send + Sync>;

/// Create the application router with an in-memory session store
pub fn create_app(config: &AppConfig) -> Router {
    let service: DashboardState = Arc::new(create_default_dashboard_service(config.session_settings()));
    info!(
        "Session store ready: {} patients per session, seed {}, up to {} sessions",
        config.patient_count, config.data_seed, config.session_max
    );
    create_app_with_service(service, config)
}

/// Create the application router around an existing dashboard service
pub fn create_app_with_service(service: DashboardState, config: &AppConfig) -> Router {
    debug!("Creating application router");

    let health_service = create_health_service(service.clone());

    // Every route here sees the caller's session table
    let session_routes = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/dashboard/filters", get(dashboard::get_filter_options))
        .route("/dashboard/metrics", get(dashboard::get_metrics))
        .route("/dashboard/charts/status", get(dashboard::get_status_chart))
        .route("/dashboard/charts/departments", get(dashboard::get_department_chart))
        .route("/dashboard/charts/vitals", get(dashboard::get_vitals_chart))
        .route("/patients", get(patients::get_patients))
        .route("/session", get(session::get_session))
        .layer(middleware::from_fn_with_state(service.clone(), session_middleware));

    // Ending a session must not start a new one
    let api_routes = Router::new()
        .route("/session", delete(session::end_session))
        .merge(session_routes);

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/", get(page::index))
        .route("/static/dashboard.js", get(page::dashboard_script))
        .route("/health", get(health::health_check))
        .layer(Extension(health_service))
        .layer(Extension(Arc::new(config.clone())));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(service)
        .merge(configure_swagger_routes());

    debug!("Routes merged");

    health::initialize_server_start_time();

    configure_http_layers(app, config)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let session_header = HeaderName::from_static(SESSION_HEADER);
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, session_header.clone()])
        .expose_headers([session_header])
        .max_age(Duration::from_secs(3600));

    match config.cors_allow_origin.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => cors.allow_origin(AllowOrigin::exact(origin)),
        Some(Err(e)) => {
            warn!("Ignoring invalid CORS origin: {}", e);
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

/// Request tracing, CORS and security headers for the whole application
pub fn configure_http_layers(app: Router, config: &AppConfig) -> Router {
    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self'; script-src 'self' https://cdn.plot.ly; connect-src 'self'; img-src 'self' data: blob:; style-src 'self' 'unsafe-inline'; font-src 'self' data:; frame-ancestors 'none'; form-action 'self'; base-uri 'self'",
            ),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static("camera=(), microphone=(), geolocation=(), interest-cohort=()"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ));

    app.layer(cors_layer(config))
        .layer(security_headers)
        .layer(TraceLayer::new_for_http())
}
