use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Error returned when a label does not name a known value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseLabelError {
    /// What was being parsed ("department", "status", ...)
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

/// Lowercase and unify separators so "Needs Attention", "needs_attention"
/// and "needs-attention" compare equal
fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase().replace(['_', '-'], " ")
}

/// Patient gender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Hospital department
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Department {
    Cardiology,
    Neurology,
    Surgery,
    Therapy,
    #[serde(rename = "Intensive Care")]
    IntensiveCare,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Cardiology,
        Department::Neurology,
        Department::Surgery,
        Department::Therapy,
        Department::IntensiveCare,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Neurology => "Neurology",
            Department::Surgery => "Surgery",
            Department::Therapy => "Therapy",
            Department::IntensiveCare => "Intensive Care",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Department::ALL
            .into_iter()
            .find(|d| normalize_label(d.label()) == wanted)
            .ok_or_else(|| ParseLabelError {
                kind: "department",
                value: s.to_string(),
            })
    }
}

/// Severity label of a patient's condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum PatientStatus {
    Stable,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Critical,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 3] = [
        PatientStatus::Stable,
        PatientStatus::NeedsAttention,
        PatientStatus::Critical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Stable => "Stable",
            PatientStatus::NeedsAttention => "Needs Attention",
            PatientStatus::Critical => "Critical",
        }
    }

    /// Fixed chart color for the status
    pub fn color(&self) -> &'static str {
        match self {
            PatientStatus::Stable => "green",
            PatientStatus::NeedsAttention => "orange",
            PatientStatus::Critical => "red",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PatientStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        PatientStatus::ALL
            .into_iter()
            .find(|status| normalize_label(status.label()) == wanted)
            .ok_or_else(|| ParseLabelError {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Vital sign that can be plotted per status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    #[default]
    HeartRate,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    Temperature,
    OxygenLevel,
}

impl VitalSign {
    pub const ALL: [VitalSign; 5] = [
        VitalSign::HeartRate,
        VitalSign::BloodPressureSystolic,
        VitalSign::BloodPressureDiastolic,
        VitalSign::Temperature,
        VitalSign::OxygenLevel,
    ];

    /// Machine key, also the table column key
    pub fn key(&self) -> &'static str {
        match self {
            VitalSign::HeartRate => "heart_rate",
            VitalSign::BloodPressureSystolic => "blood_pressure_systolic",
            VitalSign::BloodPressureDiastolic => "blood_pressure_diastolic",
            VitalSign::Temperature => "temperature",
            VitalSign::OxygenLevel => "oxygen_level",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VitalSign::HeartRate => "Heart rate",
            VitalSign::BloodPressureSystolic => "Systolic BP",
            VitalSign::BloodPressureDiastolic => "Diastolic BP",
            VitalSign::Temperature => "Temperature",
            VitalSign::OxygenLevel => "Oxygen level",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VitalSign::HeartRate => "bpm",
            VitalSign::BloodPressureSystolic | VitalSign::BloodPressureDiastolic => "mmHg",
            VitalSign::Temperature => "°C",
            VitalSign::OxygenLevel => "%",
        }
    }
}

impl FromStr for VitalSign {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        VitalSign::ALL
            .into_iter()
            .find(|v| normalize_label(v.key()) == wanted || normalize_label(v.label()) == wanted)
            .ok_or_else(|| ParseLabelError {
                kind: "vital sign",
                value: s.to_string(),
            })
    }
}

/// Admission dates are shown as DD.MM.YYYY
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d.%m.%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Domain view of a patient, including derived fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Patient {
    /// Identifier in the form `P0001`
    pub patient_id: String,

    pub age: u8,

    pub gender: Gender,

    pub department: Department,

    /// Admission date, DD.MM.YYYY
    #[serde(with = "display_date")]
    #[cfg_attr(feature = "with-api", schema(value_type = String, example = "01.03.2024"))]
    pub admission_date: NaiveDate,

    pub status: PatientStatus,

    /// Beats per minute
    pub heart_rate: i32,

    /// mmHg
    pub blood_pressure_systolic: i32,

    /// mmHg
    pub blood_pressure_diastolic: i32,

    /// °C, one decimal
    pub temperature: f64,

    /// Percent saturation
    pub oxygen_level: i32,

    /// Display form "systolic/diastolic"
    pub blood_pressure: String,

    /// Days from admission to the date the session's table was generated.
    /// Not advanced while the session stays alive.
    pub length_of_stay_days: i64,
}

impl Patient {
    /// Numeric value of a vital sign
    pub fn vital(&self, vital: VitalSign) -> f64 {
        match vital {
            VitalSign::HeartRate => f64::from(self.heart_rate),
            VitalSign::BloodPressureSystolic => f64::from(self.blood_pressure_systolic),
            VitalSign::BloodPressureDiastolic => f64::from(self.blood_pressure_diastolic),
            VitalSign::Temperature => self.temperature,
            VitalSign::OxygenLevel => f64::from(self.oxygen_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_from_label() {
        assert_eq!("Cardiology".parse::<Department>(), Ok(Department::Cardiology));
        assert_eq!("intensive care".parse::<Department>(), Ok(Department::IntensiveCare));
        assert_eq!("intensive_care".parse::<Department>(), Ok(Department::IntensiveCare));
        assert!("Oncology".parse::<Department>().is_err());
    }

    #[test]
    fn test_status_from_label() {
        assert_eq!("Needs Attention".parse::<PatientStatus>(), Ok(PatientStatus::NeedsAttention));
        assert_eq!("needs-attention".parse::<PatientStatus>(), Ok(PatientStatus::NeedsAttention));
        assert_eq!(" critical ".parse::<PatientStatus>(), Ok(PatientStatus::Critical));

        let err = "Dead".parse::<PatientStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown status: Dead");
    }

    #[test]
    fn test_vital_sign_from_key_or_label() {
        assert_eq!("oxygen_level".parse::<VitalSign>(), Ok(VitalSign::OxygenLevel));
        assert_eq!("Systolic BP".parse::<VitalSign>(), Ok(VitalSign::BloodPressureSystolic));
        assert!("pulse".parse::<VitalSign>().is_err());
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(PatientStatus::Stable.color(), "green");
        assert_eq!(PatientStatus::NeedsAttention.color(), "orange");
        assert_eq!(PatientStatus::Critical.color(), "red");
    }

    #[test]
    fn test_patient_serializes_display_date() {
        let patient = Patient {
            patient_id: "P0001".to_string(),
            age: 40,
            gender: Gender::Female,
            department: Department::IntensiveCare,
            admission_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: PatientStatus::NeedsAttention,
            heart_rate: 95,
            blood_pressure_systolic: 130,
            blood_pressure_diastolic: 85,
            temperature: 37.4,
            oxygen_level: 94,
            blood_pressure: "130/85".to_string(),
            length_of_stay_days: 14,
        };

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["admission_date"], "01.03.2024");
        assert_eq!(json["department"], "Intensive Care");
        assert_eq!(json["status"], "Needs Attention");
        assert_eq!(json["gender"], "F");

        let back: Patient = serde_json::from_value(json).unwrap();
        assert_eq!(back, patient);
    }
}
