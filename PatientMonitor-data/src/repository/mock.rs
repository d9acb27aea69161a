// Mock session repository used by tests and the `mock` feature

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::errors::RepositoryError;
use super::session::{Session, SessionLookup, SessionRepositoryTrait, SessionStats};
use crate::models::patient::PatientRecord;

/// Session repository that serves one fixed table to every session
#[derive(Debug, Clone)]
pub struct MockSessionRepository {
    patients: Arc<[PatientRecord]>,
    sessions: Arc<Mutex<Vec<Uuid>>>,
    fail_lock: bool,
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSessionRepository {
    /// Create a mock with an empty table
    pub fn new() -> Self {
        Self {
            patients: Arc::from(Vec::new()),
            sessions: Arc::new(Mutex::new(Vec::new())),
            fail_lock: false,
        }
    }

    /// Serve the given patients to every session
    pub fn with_patients(mut self, patients: Vec<PatientRecord>) -> Self {
        self.patients = patients.into();
        self
    }

    /// Make every operation fail as if the lock were poisoned
    pub fn with_lock_failure(mut self) -> Self {
        self.fail_lock = true;
        self
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail_lock {
            Err(RepositoryError::Lock("mock is configured to fail".to_string()))
        } else {
            Ok(())
        }
    }

    fn session(&self, id: Uuid) -> Session {
        Session {
            id,
            patients: self.patients.clone(),
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SessionRepositoryTrait for MockSessionRepository {
    async fn get_or_create(&self, id: Option<Uuid>) -> Result<SessionLookup, RepositoryError> {
        self.check()?;
        let mut sessions = self.sessions.lock()?;

        if let Some(id) = id.filter(|id| sessions.contains(id)) {
            return Ok(SessionLookup {
                session: self.session(id),
                created: false,
            });
        }

        let id = Uuid::new_v4();
        sessions.push(id);
        Ok(SessionLookup {
            session: self.session(id),
            created: true,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>, RepositoryError> {
        self.check()?;
        let sessions = self.sessions.lock()?;
        Ok(sessions.contains(&id).then(|| self.session(id)))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.check()?;
        let mut sessions = self.sessions.lock()?;
        let before = sessions.len();
        sessions.retain(|existing| *existing != id);
        Ok(sessions.len() != before)
    }

    async fn cleanup_expired(&self) -> Result<usize, RepositoryError> {
        self.check()?;
        Ok(0)
    }

    async fn stats(&self) -> Result<SessionStats, RepositoryError> {
        self.check()?;
        let sessions = self.sessions.lock()?;
        Ok(SessionStats {
            active_sessions: sessions.len(),
            max_sessions: usize::MAX,
            idle_ttl: Duration::MAX,
        })
    }
}
