use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::patient::Patient;

/// A session's patient table, as seen by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTable {
    pub session_id: Uuid,

    /// True when this request started the session
    pub created: bool,

    /// Date lengths of stay are counted up to
    pub generated_on: NaiveDate,

    pub patients: Vec<Patient>,
}

/// Occupancy of the session store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct SessionOverview {
    pub active_sessions: usize,
    pub max_sessions: usize,
    pub idle_ttl_secs: u64,
}
