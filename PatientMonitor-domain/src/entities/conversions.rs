use patient_monitor_data::models::patient as data;
use patient_monitor_data::repository::{SessionLookup, SessionStats};
use uuid::Uuid;

use crate::entities::patient::{Department, Gender, Patient, PatientStatus};
use crate::entities::session::{SessionOverview, SessionTable};

/// Conversion functions between domain entities and data models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Helper function to safely parse a string ID to UUID
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id.trim()).map_err(|_| format!("Invalid UUID format: {}", id))
}

pub fn convert_to_domain_gender(gender: data::Gender) -> Gender {
    match gender {
        data::Gender::Male => Gender::Male,
        data::Gender::Female => Gender::Female,
    }
}

pub fn convert_to_domain_department(department: data::Department) -> Department {
    match department {
        data::Department::Cardiology => Department::Cardiology,
        data::Department::Neurology => Department::Neurology,
        data::Department::Surgery => Department::Surgery,
        data::Department::Therapy => Department::Therapy,
        data::Department::IntensiveCare => Department::IntensiveCare,
    }
}

pub fn convert_to_domain_status(status: data::PatientStatus) -> PatientStatus {
    match status {
        data::PatientStatus::Stable => PatientStatus::Stable,
        data::PatientStatus::NeedsAttention => PatientStatus::NeedsAttention,
        data::PatientStatus::Critical => PatientStatus::Critical,
    }
}

/// Convert from data model to domain entity, deriving the display fields
pub fn convert_to_domain_patient(record: &data::PatientRecord) -> Patient {
    Patient {
        patient_id: record.patient_id.clone(),
        age: record.age,
        gender: convert_to_domain_gender(record.gender),
        department: convert_to_domain_department(record.department),
        admission_date: record.admission_date,
        status: convert_to_domain_status(record.status),
        heart_rate: record.heart_rate,
        blood_pressure_systolic: record.blood_pressure_systolic,
        blood_pressure_diastolic: record.blood_pressure_diastolic,
        temperature: record.temperature,
        oxygen_level: record.oxygen_level,
        blood_pressure: format!(
            "{}/{}",
            record.blood_pressure_systolic, record.blood_pressure_diastolic
        ),
        length_of_stay_days: record.length_of_stay_days,
    }
}

pub fn convert_to_domain_patients(records: &[data::PatientRecord]) -> Vec<Patient> {
    records.iter().map(convert_to_domain_patient).collect()
}

pub fn convert_to_domain_session_table(lookup: &SessionLookup) -> SessionTable {
    SessionTable {
        session_id: lookup.session.id,
        created: lookup.created,
        generated_on: lookup.session.generated_on,
        patients: convert_to_domain_patients(&lookup.session.patients),
    }
}

pub fn convert_to_domain_session_overview(stats: SessionStats) -> SessionOverview {
    SessionOverview {
        active_sessions: stats.active_sessions,
        max_sessions: stats.max_sessions,
        idle_ttl_secs: stats.idle_ttl.as_secs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_convert_to_domain_patient_derives_display_fields() {
        let record = data::PatientRecord {
            patient_id: "P0007".to_string(),
            age: 61,
            gender: data::Gender::Male,
            department: data::Department::IntensiveCare,
            admission_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            status: data::PatientStatus::Critical,
            heart_rate: 120,
            blood_pressure_systolic: 180,
            blood_pressure_diastolic: 105,
            temperature: 39.1,
            oxygen_level: 85,
            length_of_stay_days: 5,
        };

        let patient = convert_to_domain_patient(&record);
        assert_eq!(patient.blood_pressure, "180/105");
        assert_eq!(patient.department, Department::IntensiveCare);
        assert_eq!(patient.status, PatientStatus::Critical);
        assert_eq!(patient.gender, Gender::Male);
        assert_eq!(patient.length_of_stay_days, 5);
    }

    #[test]
    fn test_parse_string_to_uuid() {
        assert!(parse_string_to_uuid("not-a-uuid").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_string_to_uuid(&id.to_string()), Ok(id));
    }
}
