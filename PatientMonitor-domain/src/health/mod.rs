//! Domain layer health check functionality
//! The only stateful component of the service is the session store, so its
//! reachability and occupancy decide the overall status.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::entities::session::SessionOverview;
use crate::services::dashboard::DashboardServiceTrait;

/// Share of the session capacity above which the store reports degraded
pub const DEGRADED_OCCUPANCY: f64 = 0.9;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    pub status: ComponentStatus,
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    pub status: SystemStatus,
    /// Component name to health
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the session store
    /// Returns Ok(false) when it is close to capacity and Err when it cannot
    /// be read at all
    async fn check_session_store_status(&self) -> Result<bool, String>;
}

/// Classify session store occupancy
pub fn assess_session_capacity(overview: &SessionOverview) -> HealthComponent {
    let details = format!(
        "{} of {} sessions active",
        overview.active_sessions, overview.max_sessions
    );

    if overview.max_sessions == 0 {
        return HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some("Session store has no capacity".to_string()),
        };
    }

    let occupancy = overview.active_sessions as f64 / overview.max_sessions as f64;
    let status = if occupancy >= DEGRADED_OCCUPANCY {
        ComponentStatus::Degraded
    } else {
        ComponentStatus::Healthy
    };

    HealthComponent {
        status,
        details: Some(details),
    }
}

/// Worst component status wins
pub fn overall_status(components: &HashMap<String, HealthComponent>) -> SystemStatus {
    if components.values().any(|c| c.status == ComponentStatus::Unhealthy) {
        SystemStatus::Unhealthy
    } else if components.values().any(|c| c.status == ComponentStatus::Degraded) {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    }
}

/// Health service that inspects the dashboard's session store
pub struct HealthService {
    dashboard: Arc<dyn DashboardServiceTrait + Send + Sync>,
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService").finish_non_exhaustive()
    }
}

impl HealthService {
    pub fn new(dashboard: Arc<dyn DashboardServiceTrait + Send + Sync>) -> Self {
        Self { dashboard }
    }

    async fn session_store_component(&self) -> HealthComponent {
        match self.dashboard.session_stats().await {
            Ok(overview) => assess_session_capacity(&overview),
            Err(e) => HealthComponent {
                status: ComponentStatus::Unhealthy,
                details: Some(e.to_string()),
            },
        }
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();
        components.insert("session_store".to_string(), self.session_store_component().await);
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth {
            status: overall_status(&components),
            components,
        }
    }

    async fn check_session_store_status(&self) -> Result<bool, String> {
        let component = self.session_store_component().await;
        match component.status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err(component
                .details
                .unwrap_or_else(|| "Session store unavailable".to_string())),
        }
    }
}

/// Factory function to create a health service for a dashboard
pub fn create_health_service(
    dashboard: Arc<dyn DashboardServiceTrait + Send + Sync>,
) -> Arc<dyn HealthServiceTrait + Send + Sync> {
    Arc::new(HealthService::new(dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDashboardService;

    #[test]
    fn test_assess_session_capacity() {
        let healthy = assess_session_capacity(&SessionOverview {
            active_sessions: 10,
            max_sessions: 1000,
            idle_ttl_secs: 1800,
        });
        assert_eq!(healthy.status, ComponentStatus::Healthy);
        assert_eq!(healthy.details.as_deref(), Some("10 of 1000 sessions active"));

        let degraded = assess_session_capacity(&SessionOverview {
            active_sessions: 950,
            max_sessions: 1000,
            idle_ttl_secs: 1800,
        });
        assert_eq!(degraded.status, ComponentStatus::Degraded);

        let empty = assess_session_capacity(&SessionOverview {
            active_sessions: 0,
            max_sessions: 0,
            idle_ttl_secs: 1800,
        });
        assert_eq!(empty.status, ComponentStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_get_system_health() {
        let service = HealthService::new(Arc::new(MockDashboardService::new()));
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("session_store"));
        assert!(health.components.contains_key("api"));
        assert_eq!(service.check_session_store_status().await, Ok(true));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unhealthy() {
        let service = HealthService::new(Arc::new(MockDashboardService::new().with_store_failure()));
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Unhealthy);
        assert!(service.check_session_store_status().await.is_err());
    }
}
