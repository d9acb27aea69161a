use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use patient_monitor_domain::entities::patient::display_date;
use patient_monitor_domain::entities::SessionTable;

/// The caller's session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: Uuid,

    /// True when this request started the session
    pub created: bool,

    /// Date lengths of stay are counted up to, DD.MM.YYYY
    #[schema(value_type = String, example = "15.03.2024")]
    #[serde(with = "display_date")]
    pub generated_on: chrono::NaiveDate,

    /// Rows in the session's table
    pub patient_count: usize,
}

/// Result of ending a session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndSessionResponse {
    pub session_id: Uuid,
    pub ended: bool,
}

pub fn convert_to_public_session(table: &SessionTable) -> SessionResponse {
    SessionResponse {
        session_id: table.session_id,
        created: table.created,
        generated_on: table.generated_on,
        patient_count: table.patients.len(),
    }
}
