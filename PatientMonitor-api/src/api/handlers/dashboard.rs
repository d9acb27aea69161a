use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{debug, info, instrument};

use patient_monitor_domain::entities::{
    DepartmentChart, Metric, SessionTable, StatusChart, VitalsChart,
};

use crate::api::routes::DashboardState;
use crate::entities::common::ErrorResponse;
use crate::entities::query::{
    convert_to_domain_filter, convert_to_domain_query, convert_to_domain_table_query, validated,
    FilterParams, TableParams, VitalParams,
};

/// Full dashboard: metrics, charts and the patient table for the current
/// selections
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    params(FilterParams, VitalParams, TableParams),
    responses(
        (status = 200, description = "Dashboard rendered", body = DashboardView),
        (status = 400, description = "Invalid filter selection", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_dashboard(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
    vital: Result<Query<VitalParams>, QueryRejection>,
    paging: Result<Query<TableParams>, QueryRejection>,
) -> Result<impl IntoResponse, Response> {
    let query = convert_to_domain_query(
        &validated(filter).map_err(IntoResponse::into_response)?,
        &validated(vital).map_err(IntoResponse::into_response)?,
    )
    .map_err(IntoResponse::into_response)?;
    let table_query = validated(paging)
        .and_then(|params| convert_to_domain_table_query(&params))
        .map_err(IntoResponse::into_response)?;

    let view = service.render(&table, &query, &table_query);
    info!(
        "Dashboard rendered: {} of {} patients selected",
        view.summary.total,
        table.patients.len()
    );

    Ok((StatusCode::OK, Json(view)))
}

/// Options for the filter controls, taken from the whole session table
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/filters",
    responses(
        (status = 200, description = "Filter options", body = FilterOptions),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_filter_options(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
) -> impl IntoResponse {
    debug!("Filter options requested");
    Json(service.filter_options(&table))
}

/// The six summary indicators
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/metrics",
    params(FilterParams),
    responses(
        (status = 200, description = "Summary metrics", body = [Metric]),
        (status = 400, description = "Invalid filter selection", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_metrics(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<Metric>>, ErrorResponse> {
    let filter = convert_to_domain_filter(&validated(filter)?)?;
    Ok(Json(service.metrics(&table, &filter)))
}

/// Donut chart of the status distribution
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/charts/status",
    params(FilterParams),
    responses(
        (status = 200, description = "Status chart", body = StatusChart),
        (status = 400, description = "Invalid filter selection", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_status_chart(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<StatusChart>, ErrorResponse> {
    let filter = convert_to_domain_filter(&validated(filter)?)?;
    Ok(Json(service.status_chart(&table, &filter)))
}

/// Bar chart of patients per department
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/charts/departments",
    params(FilterParams),
    responses(
        (status = 200, description = "Department chart", body = DepartmentChart),
        (status = 400, description = "Invalid filter selection", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_department_chart(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<DepartmentChart>, ErrorResponse> {
    let filter = convert_to_domain_filter(&validated(filter)?)?;
    Ok(Json(service.department_chart(&table, &filter)))
}

/// Box plot of the selected vital sign by status
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/charts/vitals",
    params(FilterParams, VitalParams),
    responses(
        (status = 200, description = "Vital sign chart", body = VitalsChart),
        (status = 400, description = "Invalid filter selection or vital sign", body = ErrorResponse),
    ),
    tag = "dashboard"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_vitals_chart(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
    vital: Result<Query<VitalParams>, QueryRejection>,
) -> Result<Json<VitalsChart>, ErrorResponse> {
    let query = convert_to_domain_query(&validated(filter)?, &validated(vital)?)?;
    Ok(Json(service.vitals_chart(&table, &query)))
}
