// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

pub mod fixtures;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

// Re-export the data layer mock for callers wiring a real service
pub use patient_monitor_data::repository::mock::MockSessionRepository;

use crate::entities::conversions::parse_string_to_uuid;
use crate::entities::filter::{DashboardQuery, PatientFilter, TableQuery};
use crate::entities::patient::Patient;
use crate::entities::session::{SessionOverview, SessionTable};
use crate::entities::view::{
    DashboardView, DepartmentChart, FilterOptions, Metric, PatientTable, StatusChart, VitalsChart,
};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};
use crate::services::aggregation::summarize;
use crate::services::dashboard::{DashboardServiceError, DashboardServiceTrait};
use crate::services::filter::filter_patients;
use crate::services::presentation;

/// Mock dashboard service serving the fixture table to every session
pub struct MockDashboardService {
    patients: Vec<Patient>,
    sessions: Mutex<HashSet<Uuid>>,
    should_fail_store: bool,
}

impl Default for MockDashboardService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDashboardService {
    /// Create a mock serving the seeded 100-patient table
    pub fn new() -> Self {
        Self {
            patients: fixtures::sample_patients(),
            sessions: Mutex::new(HashSet::new()),
            should_fail_store: false,
        }
    }

    /// Serve a custom table instead
    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    /// Configure the mock to fail every session store operation
    pub fn with_store_failure(mut self) -> Self {
        self.should_fail_store = true;
        self
    }

    fn sessions(&self) -> Result<std::sync::MutexGuard<'_, HashSet<Uuid>>, DashboardServiceError> {
        if self.should_fail_store {
            return Err(DashboardServiceError::SessionStoreError(
                "Session store error - mock is configured to fail".to_string(),
            ));
        }
        self.sessions
            .lock()
            .map_err(|e| DashboardServiceError::SessionStoreError(e.to_string()))
    }

    fn table(&self, session_id: Uuid, created: bool) -> SessionTable {
        SessionTable {
            session_id,
            created,
            generated_on: fixtures::fixture_date(),
            patients: self.patients.clone(),
        }
    }
}

#[async_trait]
impl DashboardServiceTrait for MockDashboardService {
    async fn open_session(&self, session_id: Option<&str>) -> Result<SessionTable, DashboardServiceError> {
        let mut sessions = self.sessions()?;

        let known = session_id
            .and_then(|raw| parse_string_to_uuid(raw).ok())
            .filter(|id| sessions.contains(id));

        match known {
            Some(id) => Ok(self.table(id, false)),
            None => {
                let id = Uuid::new_v4();
                sessions.insert(id);
                Ok(self.table(id, true))
            }
        }
    }

    async fn end_session(&self, session_id: &str) -> Result<bool, DashboardServiceError> {
        let id = parse_string_to_uuid(session_id).map_err(DashboardServiceError::ValidationError)?;
        Ok(self.sessions()?.remove(&id))
    }

    async fn session_stats(&self) -> Result<SessionOverview, DashboardServiceError> {
        let sessions = self.sessions()?;
        Ok(SessionOverview {
            active_sessions: sessions.len(),
            max_sessions: 1000,
            idle_ttl_secs: 1800,
        })
    }

    fn filter_options(&self, table: &SessionTable) -> FilterOptions {
        presentation::filter_options(&table.patients)
    }

    fn render(&self, table: &SessionTable, query: &DashboardQuery, table_query: &TableQuery) -> DashboardView {
        presentation::render_dashboard(&table.patients, query, table_query)
    }

    fn metrics(&self, table: &SessionTable, filter: &PatientFilter) -> Vec<Metric> {
        presentation::metrics(&summarize(&filter_patients(&table.patients, filter)))
    }

    fn status_chart(&self, table: &SessionTable, filter: &PatientFilter) -> StatusChart {
        presentation::status_chart(&summarize(&filter_patients(&table.patients, filter)))
    }

    fn department_chart(&self, table: &SessionTable, filter: &PatientFilter) -> DepartmentChart {
        presentation::department_chart(&filter_patients(&table.patients, filter))
    }

    fn vitals_chart(&self, table: &SessionTable, query: &DashboardQuery) -> VitalsChart {
        presentation::vitals_chart(&filter_patients(&table.patients, &query.filter), query.vital)
    }

    fn patient_table(&self, table: &SessionTable, filter: &PatientFilter, table_query: &TableQuery) -> PatientTable {
        presentation::patient_table(&filter_patients(&table.patients, filter), table_query)
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    session_store_status: ComponentStatus,
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            session_store_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with a session store close to capacity
    pub fn with_degraded_session_store(mut self) -> Self {
        self.session_store_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unreadable session store
    pub fn with_unhealthy_session_store(mut self) -> Self {
        self.session_store_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            "session_store".to_string(),
            HealthComponent {
                status: self.session_store_status.clone(),
                details: match self.session_store_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Session store is close to capacity".to_string()),
                    ComponentStatus::Unhealthy => Some("Session store lock poisoned".to_string()),
                },
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        SystemHealth {
            status: crate::health::overall_status(&components),
            components,
        }
    }

    async fn check_session_store_status(&self) -> Result<bool, String> {
        match self.session_store_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Session store lock poisoned".to_string()),
        }
    }
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
