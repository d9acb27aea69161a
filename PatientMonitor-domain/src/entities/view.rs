use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::filter::{AgeRange, SortColumn, SortDirection};
use super::patient::{Department, Patient, PatientStatus, VitalSign};

/// Counts and means over a filtered set of patients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DashboardSummary {
    pub total: usize,
    pub stable: usize,
    pub needs_attention: usize,
    pub critical: usize,

    /// None when there are no patients
    pub mean_age: Option<f64>,

    /// None when there are no patients
    pub mean_length_of_stay: Option<f64>,
}

impl DashboardSummary {
    pub fn count(&self, status: PatientStatus) -> usize {
        match status {
            PatientStatus::Stable => self.stable,
            PatientStatus::NeedsAttention => self.needs_attention,
            PatientStatus::Critical => self.critical,
        }
    }
}

/// Whether an increase of a metric is good or bad news
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DeltaPolarity {
    Normal,
    Inverse,
}

/// One summary indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Metric {
    /// Stable machine key
    pub key: String,
    pub label: String,
    /// Formatted value, "N/A" when undefined
    pub value: String,
    /// Unformatted value, absent when undefined
    pub raw: Option<f64>,
    pub delta_polarity: DeltaPolarity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PieSlice {
    pub status: PatientStatus,
    pub count: usize,
    pub color: String,
}

/// Donut chart of the status distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct StatusChart {
    pub title: String,
    /// Relative radius of the hole
    pub hole: f64,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DepartmentBar {
    pub department: Department,
    pub count: usize,
    pub color: String,
}

/// Bar chart of patients per department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DepartmentChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<DepartmentBar>,
}

/// Five-number summary of a sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BoxPoint {
    pub patient_id: String,
    pub value: f64,
}

/// Values of one status group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct BoxGroup {
    pub status: PatientStatus,
    pub color: String,
    pub summary: FiveNumberSummary,
    pub points: Vec<BoxPoint>,
}

/// Box plot of one vital sign grouped by status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalsChart {
    pub title: String,
    pub vital: VitalSign,
    pub y_label: String,
    pub unit: String,
    /// Which points to draw next to the boxes
    pub points: String,
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
    Date,
    /// Value constrained to `TableColumn::options`
    Select,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct TableColumn {
    pub key: SortColumn,
    pub label: String,
    pub kind: ColumnKind,
    /// Allowed values of a select column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub help: Option<String>,
    pub width: Option<String>,
}

/// Patient list, sorted and paged
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientTable {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Patient>,
    /// Filtered rows before paging
    pub total_count: usize,
    pub offset: usize,
    pub limit: Option<usize>,
    pub sort_by: Option<SortColumn>,
    pub sort_direction: SortDirection,
    pub hide_index: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct VitalSignOption {
    pub key: VitalSign,
    pub label: String,
}

/// Choices offered by the filter controls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FilterOptions {
    /// Departments present in the table, sorted by label
    pub departments: Vec<Department>,
    /// Statuses present in the table, sorted by label
    pub statuses: Vec<PatientStatus>,
    /// Slider bounds, the observed ages of the table
    pub age_bounds: Option<AgeRange>,
    pub vital_signs: Vec<VitalSignOption>,
}

/// Filter with missing age bounds filled in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct AppliedFilter {
    pub departments: Vec<Department>,
    pub statuses: Vec<PatientStatus>,
    /// None when the table is empty
    pub age_range: Option<AgeRange>,
}

/// Static page metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PageInfo {
    pub title: String,
    pub icon: String,
    pub layout: String,
    pub sidebar_header: String,
    pub vital_selector_label: String,
}

/// Complete dashboard for one set of filter selections
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct DashboardView {
    pub page: PageInfo,
    pub filter_options: FilterOptions,
    pub applied_filter: AppliedFilter,
    pub summary: DashboardSummary,
    pub metrics: Vec<Metric>,
    pub status_chart: StatusChart,
    pub department_chart: DepartmentChart,
    pub vitals_chart: VitalsChart,
    pub table: PatientTable,
}
