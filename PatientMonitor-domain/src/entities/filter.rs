use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::patient::{Department, ParseLabelError, PatientStatus, VitalSign};

/// Inclusive age range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Row predicates selected by the user
///
/// An empty department or status list means no restriction. Missing age
/// bounds default to the observed bounds of the table being filtered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct PatientFilter {
    pub departments: Vec<Department>,
    pub statuses: Vec<PatientStatus>,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
}

impl PatientFilter {
    pub fn with_departments(mut self, departments: impl IntoIterator<Item = Department>) -> Self {
        self.departments = departments.into_iter().collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PatientStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_age_range(mut self, min: u8, max: u8) -> Self {
        self.age_min = Some(min);
        self.age_max = Some(max);
        self
    }
}

/// Everything one dashboard render depends on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub filter: PatientFilter,

    /// Vital sign shown in the box plot
    pub vital: VitalSign,
}

/// Sortable table columns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    PatientId,
    Age,
    Gender,
    Department,
    AdmissionDate,
    Status,
    HeartRate,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    Temperature,
    OxygenLevel,
    BloodPressure,
    LengthOfStayDays,
}

impl SortColumn {
    /// Columns in table order
    pub const ALL: [SortColumn; 13] = [
        SortColumn::PatientId,
        SortColumn::Age,
        SortColumn::Gender,
        SortColumn::Department,
        SortColumn::AdmissionDate,
        SortColumn::Status,
        SortColumn::HeartRate,
        SortColumn::BloodPressureSystolic,
        SortColumn::BloodPressureDiastolic,
        SortColumn::Temperature,
        SortColumn::OxygenLevel,
        SortColumn::BloodPressure,
        SortColumn::LengthOfStayDays,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::PatientId => "patient_id",
            SortColumn::Age => "age",
            SortColumn::Gender => "gender",
            SortColumn::Department => "department",
            SortColumn::AdmissionDate => "admission_date",
            SortColumn::Status => "status",
            SortColumn::HeartRate => "heart_rate",
            SortColumn::BloodPressureSystolic => "blood_pressure_systolic",
            SortColumn::BloodPressureDiastolic => "blood_pressure_diastolic",
            SortColumn::Temperature => "temperature",
            SortColumn::OxygenLevel => "oxygen_level",
            SortColumn::BloodPressure => "blood_pressure",
            SortColumn::LengthOfStayDays => "length_of_stay_days",
        }
    }
}

impl FromStr for SortColumn {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortColumn::ALL
            .into_iter()
            .find(|column| column.key() == wanted)
            .ok_or_else(|| ParseLabelError {
                kind: "sort column",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseLabelError {
                kind: "sort direction",
                value: s.to_string(),
            }),
        }
    }
}

/// Sorting and paging of the patient table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableQuery {
    /// None keeps generation order
    pub sort_by: Option<SortColumn>,
    pub direction: SortDirection,
    /// None returns every remaining row
    pub limit: Option<usize>,
    pub offset: usize,
}
