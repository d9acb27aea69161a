//! Session resolution for dashboard requests
//!
//! Each request is bound to a session before it reaches a handler. The
//! session's table is handed to the handler as a request extension and the
//! session id is echoed back as a header and a cookie.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::api::routes::DashboardState;
use crate::entities::common::ErrorResponse;

/// Header carrying the session id in both directions
pub const SESSION_HEADER: &str = "x-session-id";

/// Cookie carrying the session id for browsers
pub const SESSION_COOKIE: &str = "session_id";

/// Session id sent by the client: the header wins over the cookie
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(SESSION_HEADER) {
        match value.to_str() {
            Ok(id) if !id.trim().is_empty() => return Some(id.trim().to_string()),
            _ => warn!("Ignoring unreadable {} header", SESSION_HEADER),
        }
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn session_cookie(session_id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, session_id)
}

/// Cookie value that makes the browser forget the session
pub fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("session_id=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Echo the session id on a response
pub fn attach_session(response: &mut Response, session_id: Uuid) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&session_id.to_string()) {
        headers.insert(SESSION_HEADER, value);
    }
    if let Ok(cookie) = HeaderValue::from_str(&session_cookie(session_id)) {
        headers.append(header::SET_COOKIE, cookie);
    }
}

/// Resolve or start the caller's session and expose its table to the handler
pub async fn session_middleware(
    State(service): State<DashboardState>,
    mut req: Request,
    next: Next,
) -> Response {
    let requested = session_id_from_headers(req.headers());

    let table = match service.open_session(requested.as_deref()).await {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to resolve session: {}", e);
            return ErrorResponse::internal_error().into_response();
        }
    };

    if table.created {
        debug!("Started session {} for {}", table.session_id, req.uri().path());
    }

    let session_id = table.session_id;
    req.extensions_mut().insert(Arc::new(table));

    let mut response = next.run(req).await;
    attach_session(&mut response, session_id);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session_id=from-cookie"));
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("from-cookie"));

        headers.insert(SESSION_HEADER, HeaderValue::from_static("from-header"));
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("from-header"));
    }

    #[test]
    fn test_missing_session_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(header::COOKIE, HeaderValue::from_static("session_id="));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_attach_session_sets_header_and_cookie() {
        let id = Uuid::new_v4();
        let mut response = Response::new(axum::body::Body::empty());
        attach_session(&mut response, id);

        let headers = response.headers();
        assert_eq!(headers.get(SESSION_HEADER).unwrap(), id.to_string().as_str());
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("session_id={}", id)));
        assert!(cookie.contains("HttpOnly"));
    }
}
