use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use tracing::{debug, instrument};

use patient_monitor_domain::entities::{PatientTable, SessionTable};

use crate::api::routes::DashboardState;
use crate::entities::common::ErrorResponse;
use crate::entities::query::{
    convert_to_domain_filter, convert_to_domain_table_query, validated, FilterParams, TableParams,
};

/// Filtered patient table, sortable by any column and paginated
#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(FilterParams, TableParams),
    responses(
        (status = 200, description = "Patient table", body = PatientTable),
        (status = 400, description = "Invalid filter, sort or paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "patients"
)]
#[instrument(skip(service, table), fields(session = %table.session_id))]
pub async fn get_patients(
    State(service): State<DashboardState>,
    Extension(table): Extension<Arc<SessionTable>>,
    filter: Result<Query<FilterParams>, QueryRejection>,
    paging: Result<Query<TableParams>, QueryRejection>,
) -> Result<Json<PatientTable>, ErrorResponse> {
    let filter = convert_to_domain_filter(&validated(filter)?)?;
    let table_query = convert_to_domain_table_query(&validated(paging)?)?;

    let patients = service.patient_table(&table, &filter, &table_query);
    debug!(
        "Returning {} of {} matching patients",
        patients.rows.len(),
        patients.total_count
    );

    Ok(Json(patients))
}
