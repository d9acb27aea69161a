// Shared test data: the seeded 100-patient table and hand-built rows

use chrono::NaiveDate;
use patient_monitor_data::generator::{generate_patients, DEFAULT_PATIENT_COUNT, DEFAULT_SEED};
use patient_monitor_data::models::PatientRecord;

use crate::entities::conversions::convert_to_domain_patients;
use crate::entities::patient::{Department, Gender, Patient, PatientStatus};

/// Generation date used by every fixture
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
}

/// Default table (100 patients, seed 42) as stored by the data layer
pub fn sample_records() -> Vec<PatientRecord> {
    generate_patients(DEFAULT_PATIENT_COUNT, DEFAULT_SEED, fixture_date())
}

/// Default table as domain entities
pub fn sample_patients() -> Vec<Patient> {
    convert_to_domain_patients(&sample_records())
}

/// A stable-looking patient with the given filter-relevant fields
pub fn patient(id: &str, age: u8, department: Department, status: PatientStatus) -> Patient {
    let admission_date = fixture_date() - chrono::Duration::days(3);
    Patient {
        patient_id: id.to_string(),
        age,
        gender: Gender::Female,
        department,
        admission_date,
        status,
        heart_rate: 72,
        blood_pressure_systolic: 118,
        blood_pressure_diastolic: 76,
        temperature: 36.6,
        oxygen_level: 98,
        blood_pressure: "118/76".to_string(),
        length_of_stay_days: 3,
    }
}
