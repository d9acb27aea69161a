use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, info};

use patient_monitor_data::repository::{
    RepositoryError, SessionRepositoryTrait, SessionSettings, SessionStore,
};

use crate::entities::conversions;
use crate::entities::filter::{DashboardQuery, PatientFilter, TableQuery};
use crate::entities::session::{SessionOverview, SessionTable};
use crate::entities::view::{
    DashboardView, DepartmentChart, FilterOptions, Metric, PatientTable, StatusChart, VitalsChart,
};
use crate::services::filter::filter_patients;
use crate::services::{aggregation, presentation};

/// Dashboard service errors
#[derive(Debug, Error)]
pub enum DashboardServiceError {
    /// Malformed input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Session store failure
    #[error("Session store error: {0}")]
    SessionStoreError(String),
}

/// Operations behind the dashboard page
///
/// Session methods talk to the session store. Everything else is a pure
/// function of a session's table and the user's selections, recomputed on
/// every call.
#[async_trait]
pub trait DashboardServiceTrait {
    /// Resolve the caller's session, starting a fresh one when the id is
    /// missing, malformed, unknown or expired
    async fn open_session(&self, session_id: Option<&str>) -> Result<SessionTable, DashboardServiceError>;

    /// Discard a session and its table. Returns false if it was not live.
    async fn end_session(&self, session_id: &str) -> Result<bool, DashboardServiceError>;

    /// Occupancy of the session store
    async fn session_stats(&self) -> Result<SessionOverview, DashboardServiceError>;

    /// Choices for the filter controls
    fn filter_options(&self, table: &SessionTable) -> FilterOptions;

    /// Full dashboard for one set of selections
    fn render(&self, table: &SessionTable, query: &DashboardQuery, table_query: &TableQuery) -> DashboardView;

    fn metrics(&self, table: &SessionTable, filter: &PatientFilter) -> Vec<Metric>;

    fn status_chart(&self, table: &SessionTable, filter: &PatientFilter) -> StatusChart;

    fn department_chart(&self, table: &SessionTable, filter: &PatientFilter) -> DepartmentChart;

    fn vitals_chart(&self, table: &SessionTable, query: &DashboardQuery) -> VitalsChart;

    fn patient_table(&self, table: &SessionTable, filter: &PatientFilter, table_query: &TableQuery) -> PatientTable;
}

/// Dashboard service backed by a session repository
pub struct DashboardService<R: SessionRepositoryTrait> {
    repository: R,
}

impl<R: SessionRepositoryTrait> DashboardService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn map_repo_error(&self, err: RepositoryError) -> DashboardServiceError {
        error!("Session store failure: {}", err);
        DashboardServiceError::SessionStoreError(err.to_string())
    }
}

#[async_trait]
impl<R: SessionRepositoryTrait + Send + Sync> DashboardServiceTrait for DashboardService<R> {
    async fn open_session(&self, session_id: Option<&str>) -> Result<SessionTable, DashboardServiceError> {
        let id = session_id.and_then(|raw| match conversions::parse_string_to_uuid(raw) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Ignoring session id: {}", e);
                None
            }
        });

        let lookup = self
            .repository
            .get_or_create(id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        if lookup.created {
            let swept = self
                .repository
                .cleanup_expired()
                .await
                .map_err(|e| self.map_repo_error(e))?;
            if swept > 0 {
                info!("Swept {} expired sessions", swept);
            }
        }

        Ok(conversions::convert_to_domain_session_table(&lookup))
    }

    async fn end_session(&self, session_id: &str) -> Result<bool, DashboardServiceError> {
        let id = conversions::parse_string_to_uuid(session_id)
            .map_err(DashboardServiceError::ValidationError)?;

        self.repository
            .remove(id)
            .await
            .map_err(|e| self.map_repo_error(e))
    }

    async fn session_stats(&self) -> Result<SessionOverview, DashboardServiceError> {
        let stats = self
            .repository
            .stats()
            .await
            .map_err(|e| self.map_repo_error(e))?;
        Ok(conversions::convert_to_domain_session_overview(stats))
    }

    fn filter_options(&self, table: &SessionTable) -> FilterOptions {
        presentation::filter_options(&table.patients)
    }

    fn render(&self, table: &SessionTable, query: &DashboardQuery, table_query: &TableQuery) -> DashboardView {
        let view = presentation::render_dashboard(&table.patients, query, table_query);
        debug!(
            "Rendered dashboard for session {}: {} of {} patients",
            table.session_id,
            view.summary.total,
            table.patients.len()
        );
        view
    }

    fn metrics(&self, table: &SessionTable, filter: &PatientFilter) -> Vec<Metric> {
        let rows = filter_patients(&table.patients, filter);
        presentation::metrics(&aggregation::summarize(&rows))
    }

    fn status_chart(&self, table: &SessionTable, filter: &PatientFilter) -> StatusChart {
        let rows = filter_patients(&table.patients, filter);
        presentation::status_chart(&aggregation::summarize(&rows))
    }

    fn department_chart(&self, table: &SessionTable, filter: &PatientFilter) -> DepartmentChart {
        let rows = filter_patients(&table.patients, filter);
        presentation::department_chart(&rows)
    }

    fn vitals_chart(&self, table: &SessionTable, query: &DashboardQuery) -> VitalsChart {
        let rows = filter_patients(&table.patients, &query.filter);
        presentation::vitals_chart(&rows, query.vital)
    }

    fn patient_table(&self, table: &SessionTable, filter: &PatientFilter, table_query: &TableQuery) -> PatientTable {
        let rows = filter_patients(&table.patients, filter);
        presentation::patient_table(&rows, table_query)
    }
}

/// Create a dashboard service with an in-memory session store
pub fn create_default_dashboard_service(
    settings: SessionSettings,
) -> impl DashboardServiceTrait + Send + Sync {
    DashboardService::new(SessionStore::new(settings))
}

/// Create a mock dashboard service for testing
/// This function is only available when the mock feature is enabled
#[cfg(feature = "mock")]
pub fn create_mock_dashboard_service() -> impl DashboardServiceTrait + Send + Sync {
    crate::testing::MockDashboardService::new()
}
