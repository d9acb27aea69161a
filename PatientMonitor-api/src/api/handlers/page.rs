use axum::{
    http::header,
    response::{Html, IntoResponse},
};
use tracing::debug;

static INDEX_HTML: &str = include_str!("../../../static/index.html");
static DASHBOARD_JS: &str = include_str!("../../../static/dashboard.js");

/// HTML shell of the dashboard; the script fills it from the JSON API
pub async fn index() -> Html<&'static str> {
    debug!("Serving dashboard page");
    Html(INDEX_HTML)
}

pub async fn dashboard_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}
