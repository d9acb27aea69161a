// Storage models for generated patient data
pub mod patient;

pub use patient::{Department, Gender, PatientRecord, PatientStatus};
