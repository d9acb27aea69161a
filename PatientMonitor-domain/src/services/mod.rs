pub mod aggregation;
pub mod dashboard;
pub mod filter;
pub mod presentation;

// Domain services
// Every dashboard interaction is one pass through filter -> aggregation ->
// presentation over the session's table.

// Re-export service traits and factory functions
pub use dashboard::{
    create_default_dashboard_service, DashboardService, DashboardServiceError, DashboardServiceTrait,
};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use dashboard::create_mock_dashboard_service;
