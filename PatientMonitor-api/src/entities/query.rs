use std::str::FromStr;

use axum::extract::{rejection::QueryRejection, Query};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use patient_monitor_domain::entities::{
    DashboardQuery, Department, ParseLabelError, PatientFilter, PatientStatus, SortColumn,
    SortDirection, TableQuery, VitalSign,
};

use super::common::ErrorResponse;

/// Filter selections shared by every dashboard endpoint
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// Comma-separated department labels, e.g. `Cardiology,Intensive Care`.
    /// Empty or missing selects every department.
    pub departments: Option<String>,

    /// Comma-separated status labels, e.g. `Critical,Needs Attention`.
    /// Empty or missing selects every status.
    pub statuses: Option<String>,

    /// Lower age bound, inclusive (default: youngest patient)
    #[validate(range(max = 150, message = "age_min must be between 0 and 150"))]
    pub age_min: Option<u16>,

    /// Upper age bound, inclusive (default: oldest patient)
    #[validate(range(max = 150, message = "age_max must be between 0 and 150"))]
    pub age_max: Option<u16>,
}

/// Vital sign shown in the box plot
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VitalParams {
    /// heart_rate (default), blood_pressure_systolic, blood_pressure_diastolic,
    /// temperature or oxygen_level
    pub vital: Option<String>,
}

/// Sorting and paging of the patient table
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TableParams {
    /// Column key to sort by (default: generation order)
    pub sort_by: Option<String>,

    /// Sort direction (asc/desc, default: asc)
    pub sort_dir: Option<String>,

    /// Maximum number of rows (default: all, max: 1000)
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    pub limit: Option<u32>,

    /// Rows to skip (default: 0)
    pub offset: Option<usize>,
}

/// Unwrap a query extraction and validate it, producing the API error body
/// on failure
pub fn validated<T: Validate>(query: Result<Query<T>, QueryRejection>) -> Result<T, ErrorResponse> {
    let Query(params) = query.map_err(|rejection| ErrorResponse::bad_request(&rejection.body_text()))?;
    params
        .validate()
        .map_err(|errors| ErrorResponse::from_validation_errors(&errors))?;
    Ok(params)
}

fn label_error(err: ParseLabelError) -> ErrorResponse {
    ErrorResponse::validation_error(&err.to_string(), None)
}

/// Parse a comma-separated list of labels, skipping blanks and repeats
fn parse_list<T>(raw: Option<&str>) -> Result<Vec<T>, ParseLabelError>
where
    T: FromStr<Err = ParseLabelError> + PartialEq,
{
    let mut values = Vec::new();
    for item in raw.unwrap_or_default().split(',') {
        if item.trim().is_empty() {
            continue;
        }
        let value = item.parse::<T>()?;
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}

// Validated ages are at most 150
fn to_age(age: Option<u16>) -> Option<u8> {
    age.map(|a| u8::try_from(a).unwrap_or(u8::MAX))
}

pub fn convert_to_domain_filter(params: &FilterParams) -> Result<PatientFilter, ErrorResponse> {
    Ok(PatientFilter {
        departments: parse_list::<Department>(params.departments.as_deref()).map_err(label_error)?,
        statuses: parse_list::<PatientStatus>(params.statuses.as_deref()).map_err(label_error)?,
        age_min: to_age(params.age_min),
        age_max: to_age(params.age_max),
    })
}

pub fn convert_to_domain_query(
    filter: &FilterParams,
    vital: &VitalParams,
) -> Result<DashboardQuery, ErrorResponse> {
    let vital = match vital.vital.as_deref().map(str::trim) {
        None | Some("") => VitalSign::default(),
        Some(raw) => raw.parse::<VitalSign>().map_err(label_error)?,
    };

    Ok(DashboardQuery {
        filter: convert_to_domain_filter(filter)?,
        vital,
    })
}

pub fn convert_to_domain_table_query(params: &TableParams) -> Result<TableQuery, ErrorResponse> {
    let sort_by = match params.sort_by.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<SortColumn>().map_err(label_error)?),
    };
    let direction = match params.sort_dir.as_deref().map(str::trim) {
        None | Some("") => SortDirection::default(),
        Some(raw) => raw.parse::<SortDirection>().map_err(label_error)?,
    };

    Ok(TableQuery {
        sort_by,
        direction,
        limit: params.limit.map(|limit| limit as usize),
        offset: params.offset.unwrap_or(0),
    })
}
