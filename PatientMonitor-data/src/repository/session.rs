use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::errors::RepositoryError;
use crate::generator::GeneratorSettings;
use crate::models::patient::PatientRecord;

/// Default idle lifetime of a session
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Default maximum number of live sessions
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// A browser session and the patient table generated for it
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier handed back to the client
    pub id: Uuid,

    /// Immutable patient table owned by this session
    pub patients: Arc<[PatientRecord]>,

    /// Date the table was generated relative to
    pub generated_on: NaiveDate,

    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// Result of resolving a session for a request
#[derive(Debug, Clone)]
pub struct SessionLookup {
    pub session: Session,

    /// True when the session was created by this lookup
    pub created: bool,
}

/// Snapshot of the store's occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub active_sessions: usize,
    pub max_sessions: usize,
    pub idle_ttl: Duration,
}

/// Lifecycle and generation settings for the session store
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Sessions idle for longer than this are discarded
    pub idle_ttl: Duration,

    /// Upper bound on live sessions
    pub max_sessions: usize,

    /// How each session's table is generated
    pub generator: GeneratorSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
            generator: GeneratorSettings::default(),
        }
    }
}

/// Repository trait for session-scoped patient tables
#[async_trait]
pub trait SessionRepositoryTrait {
    /// Resolve an existing live session or create a fresh one
    async fn get_or_create(&self, id: Option<Uuid>) -> Result<SessionLookup, RepositoryError>;

    /// Get a live session without creating one
    async fn get(&self, id: Uuid) -> Result<Option<Session>, RepositoryError>;

    /// Discard a session. Returns false if it did not exist.
    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Discard every expired session, returning how many were removed
    async fn cleanup_expired(&self) -> Result<usize, RepositoryError>;

    /// Current occupancy
    async fn stats(&self) -> Result<SessionStats, RepositoryError>;
}

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_access: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) >= ttl
    }
}

/// In-memory session store
///
/// Clones share the same underlying map. The lock is only held for map
/// operations and table generation, never across an await point.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    settings: SessionSettings,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl SessionStore {
    /// Create an empty store
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            settings,
        }
    }

    fn create_session(&self) -> Session {
        let today = Utc::now().date_naive();
        let patients = self.settings.generator.generate(today);

        Session {
            id: Uuid::new_v4(),
            patients: patients.into(),
            generated_on: today,
            created_at: Utc::now(),
        }
    }

    /// Free a slot for a new session: drop expired entries first, then the
    /// least recently used ones
    fn make_room(
        &self,
        sessions: &mut HashMap<Uuid, SessionEntry>,
        now: Instant,
    ) -> Result<(), RepositoryError> {
        let max = self.settings.max_sessions;
        if max == 0 {
            return Err(RepositoryError::Capacity(
                "Session store is configured with zero capacity".to_string(),
            ));
        }

        if sessions.len() < max {
            return Ok(());
        }

        let ttl = self.settings.idle_ttl;
        sessions.retain(|_, entry| !entry.is_expired(now, ttl));

        if sessions.len() >= max {
            warn!("Session store reached max size ({}), evicting least recently used", max);
            let mut by_access: Vec<(Uuid, Instant)> = sessions
                .iter()
                .map(|(id, entry)| (*id, entry.last_access))
                .collect();
            by_access.sort_by_key(|(_, last_access)| *last_access);

            let excess = sessions.len() + 1 - max;
            for (id, _) in by_access.into_iter().take(excess) {
                sessions.remove(&id);
                debug!("Evicted session {}", id);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionStore {
    async fn get_or_create(&self, id: Option<Uuid>) -> Result<SessionLookup, RepositoryError> {
        let now = Instant::now();
        let ttl = self.settings.idle_ttl;
        let mut sessions = self.sessions.lock()?;

        if let Some(id) = id {
            match sessions.get_mut(&id) {
                Some(entry) if !entry.is_expired(now, ttl) => {
                    entry.last_access = now;
                    return Ok(SessionLookup {
                        session: entry.session.clone(),
                        created: false,
                    });
                }
                Some(_) => {
                    sessions.remove(&id);
                    info!("Session {} expired, starting a new one", id);
                }
                None => {
                    debug!("Unknown session {}, starting a new one", id);
                }
            }
        }

        self.make_room(&mut sessions, now)?;

        let session = self.create_session();
        info!(
            "Created session {} with {} patients",
            session.id,
            session.patients.len()
        );
        sessions.insert(
            session.id,
            SessionEntry {
                session: session.clone(),
                last_access: now,
            },
        );

        Ok(SessionLookup {
            session,
            created: true,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>, RepositoryError> {
        let now = Instant::now();
        let sessions = self.sessions.lock()?;
        Ok(sessions
            .get(&id)
            .filter(|entry| !entry.is_expired(now, self.settings.idle_ttl))
            .map(|entry| entry.session.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.lock()?;
        let removed = sessions.remove(&id).is_some();
        if removed {
            info!("Session {} discarded", id);
        }
        Ok(removed)
    }

    async fn cleanup_expired(&self) -> Result<usize, RepositoryError> {
        let now = Instant::now();
        let ttl = self.settings.idle_ttl;
        let mut sessions = self.sessions.lock()?;

        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, ttl));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!("Removed {} expired sessions", removed);
        }
        Ok(removed)
    }

    async fn stats(&self) -> Result<SessionStats, RepositoryError> {
        let sessions = self.sessions.lock()?;
        Ok(SessionStats {
            active_sessions: sessions.len(),
            max_sessions: self.settings.max_sessions,
            idle_ttl: self.settings.idle_ttl,
        })
    }
}
