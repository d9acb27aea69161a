use std::cmp::Ordering;

use crate::entities::filter::{DashboardQuery, SortColumn, SortDirection, TableQuery};
use crate::entities::patient::{Department, Patient, PatientStatus, VitalSign};
use crate::entities::view::{
    BoxGroup, BoxPoint, ColumnKind, DashboardSummary, DashboardView, DeltaPolarity,
    DepartmentBar, DepartmentChart, FilterOptions, Metric, PageInfo, PatientTable, PieSlice,
    StatusChart, TableColumn, VitalSignOption, VitalsChart,
};
use crate::services::aggregation::{
    count_by_department, five_number_summary, format_mean, round_one_decimal, summarize,
    NOT_AVAILABLE,
};
use crate::services::filter::{apply_filter, observed_age_bounds};

pub const PAGE_TITLE: &str = "Patient Monitoring Dashboard";
pub const PAGE_ICON: &str = "🏥";

pub const STATUS_CHART_TITLE: &str = "Status distribution";
pub const DEPARTMENT_CHART_TITLE: &str = "Department distribution";
pub const VITALS_CHART_TITLE: &str = "Patient vital signs";
pub const PATIENT_TABLE_TITLE: &str = "Patient list";

pub const STATUS_CHART_HOLE: f64 = 0.4;

/// Qualitative palette for the department bars, assigned in bar order
pub const DEPARTMENT_PALETTE: [&str; 5] = ["#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A"];

pub const STATUS_HELP: &str = "Current patient status";

pub fn page_info() -> PageInfo {
    PageInfo {
        title: PAGE_TITLE.to_string(),
        icon: PAGE_ICON.to_string(),
        layout: "wide".to_string(),
        sidebar_header: "Filters".to_string(),
        vital_selector_label: "Select a vital sign".to_string(),
    }
}

/// Filter choices derived from the full session table
pub fn filter_options(patients: &[Patient]) -> FilterOptions {
    let mut departments: Vec<Department> = Department::ALL
        .into_iter()
        .filter(|d| patients.iter().any(|p| p.department == *d))
        .collect();
    departments.sort_by_key(|d| d.label());

    let mut statuses: Vec<PatientStatus> = PatientStatus::ALL
        .into_iter()
        .filter(|s| patients.iter().any(|p| p.status == *s))
        .collect();
    statuses.sort_by_key(|s| s.label());

    FilterOptions {
        departments,
        statuses,
        age_bounds: observed_age_bounds(patients),
        vital_signs: VitalSign::ALL
            .into_iter()
            .map(|vital| VitalSignOption {
                key: vital,
                label: vital.label().to_string(),
            })
            .collect(),
    }
}

fn count_metric(key: &str, label: &str, count: usize, delta_polarity: DeltaPolarity) -> Metric {
    Metric {
        key: key.to_string(),
        label: label.to_string(),
        value: count.to_string(),
        raw: Some(count as f64),
        delta_polarity,
    }
}

/// The six summary indicators
pub fn metrics(summary: &DashboardSummary) -> Vec<Metric> {
    let mean_stay = match summary.mean_length_of_stay {
        Some(days) => format!("{:.1} days", round_one_decimal(days)),
        None => NOT_AVAILABLE.to_string(),
    };

    vec![
        count_metric("total", "Total patients", summary.total, DeltaPolarity::Normal),
        count_metric("critical", "Critical", summary.critical, DeltaPolarity::Inverse),
        count_metric(
            "needs_attention",
            "Needs attention",
            summary.needs_attention,
            DeltaPolarity::Inverse,
        ),
        count_metric("stable", "Stable", summary.stable, DeltaPolarity::Normal),
        Metric {
            key: "mean_age".to_string(),
            label: "Average age".to_string(),
            value: format_mean(summary.mean_age),
            raw: summary.mean_age,
            delta_polarity: DeltaPolarity::Normal,
        },
        Metric {
            key: "mean_stay".to_string(),
            label: "Average stay".to_string(),
            value: mean_stay,
            raw: summary.mean_length_of_stay,
            delta_polarity: DeltaPolarity::Normal,
        },
    ]
}

/// Donut chart, largest status first, empty statuses omitted
pub fn status_chart(summary: &DashboardSummary) -> StatusChart {
    let mut slices: Vec<PieSlice> = PatientStatus::ALL
        .into_iter()
        .map(|status| PieSlice {
            status,
            count: summary.count(status),
            color: status.color().to_string(),
        })
        .filter(|slice| slice.count > 0)
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));

    StatusChart {
        title: STATUS_CHART_TITLE.to_string(),
        hole: STATUS_CHART_HOLE,
        slices,
    }
}

pub fn department_chart(patients: &[Patient]) -> DepartmentChart {
    let bars = count_by_department(patients)
        .into_iter()
        .zip(DEPARTMENT_PALETTE.iter().cycle())
        .map(|((department, count), color)| DepartmentBar {
            department,
            count,
            color: color.to_string(),
        })
        .collect();

    DepartmentChart {
        title: DEPARTMENT_CHART_TITLE.to_string(),
        x_label: "Department".to_string(),
        y_label: "Number of patients".to_string(),
        bars,
    }
}

/// Box plot of one vital sign; groups appear in the order their status
/// first occurs in the rows
pub fn vitals_chart(patients: &[Patient], vital: VitalSign) -> VitalsChart {
    let mut order: Vec<PatientStatus> = Vec::new();
    for patient in patients {
        if !order.contains(&patient.status) {
            order.push(patient.status);
        }
    }

    let groups = order
        .into_iter()
        .filter_map(|status| {
            let points: Vec<BoxPoint> = patients
                .iter()
                .filter(|p| p.status == status)
                .map(|p| BoxPoint {
                    patient_id: p.patient_id.clone(),
                    value: p.vital(vital),
                })
                .collect();
            let values: Vec<f64> = points.iter().map(|point| point.value).collect();
            let summary = five_number_summary(&values)?;

            Some(BoxGroup {
                status,
                color: status.color().to_string(),
                summary,
                points,
            })
        })
        .collect();

    VitalsChart {
        title: VITALS_CHART_TITLE.to_string(),
        vital,
        y_label: format!("{} ({})", vital.label(), vital.unit()),
        unit: vital.unit().to_string(),
        points: "all".to_string(),
        groups,
    }
}

fn column(key: SortColumn, label: &str, kind: ColumnKind) -> TableColumn {
    TableColumn {
        key,
        label: label.to_string(),
        kind,
        options: None,
        help: None,
        width: None,
    }
}

/// Column layout of the patient list
pub fn table_columns() -> Vec<TableColumn> {
    vec![
        column(SortColumn::PatientId, "Patient ID", ColumnKind::Text),
        column(SortColumn::Age, "Age", ColumnKind::Number),
        column(SortColumn::Gender, "Gender", ColumnKind::Text),
        column(SortColumn::Department, "Department", ColumnKind::Text),
        column(SortColumn::AdmissionDate, "Admission date", ColumnKind::Date),
        TableColumn {
            options: Some(
                PatientStatus::ALL
                    .iter()
                    .map(|status| status.label().to_string())
                    .collect(),
            ),
            help: Some(STATUS_HELP.to_string()),
            width: Some("medium".to_string()),
            ..column(SortColumn::Status, "Status", ColumnKind::Select)
        },
        column(SortColumn::HeartRate, "Heart rate", ColumnKind::Number),
        column(SortColumn::BloodPressureSystolic, "Systolic BP", ColumnKind::Number),
        column(SortColumn::BloodPressureDiastolic, "Diastolic BP", ColumnKind::Number),
        column(SortColumn::Temperature, "Temperature", ColumnKind::Number),
        column(SortColumn::OxygenLevel, "Oxygen level", ColumnKind::Number),
        column(SortColumn::BloodPressure, "Blood pressure", ColumnKind::Text),
        column(SortColumn::LengthOfStayDays, "Length of stay (days)", ColumnKind::Number),
    ]
}

fn compare_by(column: SortColumn, a: &Patient, b: &Patient) -> Ordering {
    match column {
        SortColumn::PatientId => a.patient_id.cmp(&b.patient_id),
        SortColumn::Age => a.age.cmp(&b.age),
        SortColumn::Gender => a.gender.code().cmp(b.gender.code()),
        SortColumn::Department => a.department.label().cmp(b.department.label()),
        SortColumn::AdmissionDate => a.admission_date.cmp(&b.admission_date),
        SortColumn::Status => a.status.label().cmp(b.status.label()),
        SortColumn::HeartRate => a.heart_rate.cmp(&b.heart_rate),
        SortColumn::BloodPressureSystolic => a.blood_pressure_systolic.cmp(&b.blood_pressure_systolic),
        SortColumn::BloodPressureDiastolic => {
            a.blood_pressure_diastolic.cmp(&b.blood_pressure_diastolic)
        }
        SortColumn::Temperature => a.temperature.total_cmp(&b.temperature),
        SortColumn::OxygenLevel => a.oxygen_level.cmp(&b.oxygen_level),
        SortColumn::BloodPressure => a.blood_pressure.cmp(&b.blood_pressure),
        SortColumn::LengthOfStayDays => a.length_of_stay_days.cmp(&b.length_of_stay_days),
    }
}

/// Sorted, paged view of the filtered rows
///
/// Sorting is stable in both directions, so equal keys keep their
/// generation order.
pub fn patient_table(patients: &[Patient], query: &TableQuery) -> PatientTable {
    let mut rows = patients.to_vec();
    if let Some(column) = query.sort_by {
        rows.sort_by(|a, b| {
            let ordering = compare_by(column, a, b);
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total_count = rows.len();
    let rows: Vec<Patient> = rows
        .into_iter()
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .collect();

    PatientTable {
        title: PATIENT_TABLE_TITLE.to_string(),
        columns: table_columns(),
        rows,
        total_count,
        offset: query.offset,
        limit: query.limit,
        sort_by: query.sort_by,
        sort_direction: query.direction,
        hide_index: true,
    }
}

/// One full pass: filter the session table, aggregate, and lay out every
/// widget
pub fn render_dashboard(
    patients: &[Patient],
    query: &DashboardQuery,
    table_query: &TableQuery,
) -> DashboardView {
    let (applied_filter, filtered) = apply_filter(patients, &query.filter);
    let summary = summarize(&filtered);

    DashboardView {
        page: page_info(),
        filter_options: filter_options(patients),
        applied_filter,
        metrics: metrics(&summary),
        status_chart: status_chart(&summary),
        department_chart: department_chart(&filtered),
        vitals_chart: vitals_chart(&filtered, query.vital),
        table: patient_table(&filtered, table_query),
        summary,
    }
}
