use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Dashboard endpoints
        crate::api::handlers::dashboard::get_dashboard,
        crate::api::handlers::dashboard::get_filter_options,
        crate::api::handlers::dashboard::get_metrics,
        crate::api::handlers::dashboard::get_status_chart,
        crate::api::handlers::dashboard::get_department_chart,
        crate::api::handlers::dashboard::get_vitals_chart,

        // Patient table
        crate::api::handlers::patients::get_patients,

        // Session endpoints
        crate::api::handlers::session::get_session,
        crate::api::handlers::session::end_session
    ),
    components(
        schemas(
            // Public entities
            crate::entities::common::ErrorResponse,
            crate::entities::session::SessionResponse,
            crate::entities::session::EndSessionResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain views
            patient_monitor_domain::entities::DashboardView,
            patient_monitor_domain::entities::DashboardSummary,
            patient_monitor_domain::entities::PageInfo,
            patient_monitor_domain::entities::AppliedFilter,
            patient_monitor_domain::entities::AgeRange,
            patient_monitor_domain::entities::FilterOptions,
            patient_monitor_domain::entities::VitalSignOption,
            patient_monitor_domain::entities::Metric,
            patient_monitor_domain::entities::DeltaPolarity,
            patient_monitor_domain::entities::StatusChart,
            patient_monitor_domain::entities::PieSlice,
            patient_monitor_domain::entities::DepartmentChart,
            patient_monitor_domain::entities::DepartmentBar,
            patient_monitor_domain::entities::VitalsChart,
            patient_monitor_domain::entities::BoxGroup,
            patient_monitor_domain::entities::BoxPoint,
            patient_monitor_domain::entities::FiveNumberSummary,
            patient_monitor_domain::entities::PatientTable,
            patient_monitor_domain::entities::TableColumn,
            patient_monitor_domain::entities::ColumnKind,

            // Patient records
            patient_monitor_domain::entities::Patient,
            patient_monitor_domain::entities::Gender,
            patient_monitor_domain::entities::Department,
            patient_monitor_domain::entities::PatientStatus,
            patient_monitor_domain::entities::VitalSign,
            patient_monitor_domain::entities::SortColumn,
            patient_monitor_domain::entities::SortDirection
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "dashboard", description = "Dashboard metrics, charts and filter options"),
        (name = "patients", description = "Patient table"),
        (name = "session", description = "Per-visitor session holding the generated table")
    ),
    info(
        title = "Patient Monitor API",
        version = "0.1.0",
        description = "Synthetic patient monitoring dashboard",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_doc_generation() {
        let openapi = ApiDoc::openapi();

        assert_eq!(openapi.info.title, "Patient Monitor API");
        assert_eq!(openapi.info.version, "0.1.0");

        let tags = openapi.tags.as_ref().unwrap();
        for name in ["health", "dashboard", "patients", "session"] {
            assert!(tags.iter().any(|tag| tag.name == name), "missing tag {}", name);
        }

        for path in [
            "/health",
            "/api/v1/dashboard",
            "/api/v1/dashboard/filters",
            "/api/v1/dashboard/metrics",
            "/api/v1/dashboard/charts/status",
            "/api/v1/dashboard/charts/departments",
            "/api/v1/dashboard/charts/vitals",
            "/api/v1/patients",
            "/api/v1/session",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing path {}", path);
        }
    }

    #[test]
    fn test_schemas_registered() {
        let openapi = ApiDoc::openapi();
        let schemas = &openapi.components.as_ref().unwrap().schemas;

        assert!(schemas.contains_key("DashboardView"));
        assert!(schemas.contains_key("Patient"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
