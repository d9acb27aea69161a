use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use patient_monitor_domain::entities::SessionTable;
use patient_monitor_domain::services::DashboardServiceError;

use crate::api::middleware::{expired_session_cookie, session_id_from_headers};
use crate::api::routes::DashboardState;
use crate::entities::common::ErrorResponse;
use crate::entities::session::{convert_to_public_session, EndSessionResponse, SessionResponse};

/// The caller's session, started on demand
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "session"
)]
#[instrument(skip(table), fields(session = %table.session_id))]
pub async fn get_session(Extension(table): Extension<Arc<SessionTable>>) -> Json<SessionResponse> {
    Json(convert_to_public_session(&table))
}

/// End the caller's session and discard its table
#[utoipa::path(
    delete,
    path = "/api/v1/session",
    params(
        ("x-session-id" = Option<String>, Header, description = "Session to end (or the session_id cookie)")
    ),
    responses(
        (status = 200, description = "Session ended", body = EndSessionResponse),
        (status = 400, description = "No valid session id supplied", body = ErrorResponse),
        (status = 404, description = "Session not found or already expired", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "session"
)]
#[instrument(skip(service, headers))]
pub async fn end_session(
    State(service): State<DashboardState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Response> {
    let Some(raw_id) = session_id_from_headers(&headers) else {
        return Err(ErrorResponse::bad_request("No session id supplied").into_response());
    };

    let session_id = Uuid::parse_str(&raw_id).map_err(|e| {
        warn!("Rejected session id {:?}: {}", raw_id, e);
        ErrorResponse::bad_request("Session id is not a valid UUID").into_response()
    })?;

    match service.end_session(&session_id.to_string()).await {
        Ok(true) => {
            info!("Session {} ended", session_id);
            let body = EndSessionResponse {
                session_id,
                ended: true,
            };
            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, expired_session_cookie())],
                Json(body),
            ))
        }
        Ok(false) => Err(ErrorResponse::not_found("session").into_response()),
        Err(DashboardServiceError::ValidationError(msg)) => {
            Err(ErrorResponse::bad_request(&msg).into_response())
        }
        Err(DashboardServiceError::SessionStoreError(_)) => {
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}
