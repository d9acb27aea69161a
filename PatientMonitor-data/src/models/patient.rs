use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Patient gender as recorded at admission
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    /// Male
    #[serde(rename = "M")]
    Male,

    /// Female
    #[serde(rename = "F")]
    Female,
}

/// Hospital department a patient is admitted to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    Cardiology,
    Neurology,
    Surgery,
    Therapy,
    #[serde(rename = "Intensive Care")]
    IntensiveCare,
}

impl Department {
    /// Every department, in generation order
    pub const ALL: [Department; 5] = [
        Department::Cardiology,
        Department::Neurology,
        Department::Surgery,
        Department::Therapy,
        Department::IntensiveCare,
    ];
}

/// Severity label of a patient's current condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatientStatus {
    Stable,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Critical,
}

/// Storage model for a generated patient
///
/// Records are produced once per session by the generator and never
/// modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Identifier in the form `P0001`
    pub patient_id: String,

    /// Age in years
    pub age: u8,

    pub gender: Gender,

    pub department: Department,

    /// Date the patient was admitted
    pub admission_date: NaiveDate,

    pub status: PatientStatus,

    /// Heart rate in beats per minute
    pub heart_rate: i32,

    /// Systolic blood pressure (the higher number)
    pub blood_pressure_systolic: i32,

    /// Diastolic blood pressure (the lower number)
    pub blood_pressure_diastolic: i32,

    /// Body temperature in °C, one decimal
    pub temperature: f64,

    /// Blood oxygen saturation in percent
    pub oxygen_level: i32,

    /// Days between admission and the date the table was generated
    pub length_of_stay_days: i64,
}
