//! Synthetic patient table generation
//!
//! Produces a deterministic table of patients whose vital signs are
//! conditioned on their status. Values are drawn column by column from a
//! single seeded ChaCha20 stream, so the same seed, count and date always
//! yield the same table.

use std::f64::consts::PI;

use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::models::patient::{Department, Gender, PatientRecord, PatientStatus};

/// Number of patients generated when nothing else is configured
pub const DEFAULT_PATIENT_COUNT: usize = 100;

/// Seed used when nothing else is configured
pub const DEFAULT_SEED: u64 = 42;

/// Status weights used for the categorical draw
const STATUS_WEIGHTS: [(PatientStatus, f64); 3] = [
    (PatientStatus::Stable, 0.7),
    (PatientStatus::NeedsAttention, 0.2),
    (PatientStatus::Critical, 0.1),
];

/// Settings for a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Number of patients to generate
    pub patient_count: usize,

    /// Seed for the random stream
    pub seed: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            patient_count: DEFAULT_PATIENT_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

impl GeneratorSettings {
    /// Generate a table relative to `today`
    pub fn generate(&self, today: NaiveDate) -> Vec<PatientRecord> {
        generate_patients(self.patient_count, self.seed, today)
    }
}

/// Generate `count` synthetic patients admitted within the 30 days before `today`
///
/// A count of zero yields an empty table.
pub fn generate_patients(count: usize, seed: u64, today: NaiveDate) -> Vec<PatientRecord> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    // Demographics and admission
    let ages: Vec<u8> = (0..count).map(|_| rng.gen_range(18_i32..=90) as u8).collect();
    let genders: Vec<Gender> = (0..count)
        .map(|_| if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female })
        .collect();
    let departments: Vec<Department> = (0..count)
        .map(|_| Department::ALL[rng.gen_range(0..Department::ALL.len() as u32) as usize])
        .collect();
    let admission_offsets: Vec<i32> = (0..count).map(|_| rng.gen_range(1_i32..=30)).collect();
    let statuses: Vec<PatientStatus> = (0..count).map(|_| weighted_status(&mut rng)).collect();

    // Baseline vitals, independent of status
    let mut heart_rates: Vec<i32> = (0..count).map(|_| normal(&mut rng, 75.0, 15.0) as i32).collect();
    let mut systolic: Vec<i32> = (0..count).map(|_| normal(&mut rng, 120.0, 20.0) as i32).collect();
    let mut diastolic: Vec<i32> = (0..count).map(|_| normal(&mut rng, 80.0, 10.0) as i32).collect();
    let mut temperatures: Vec<f64> = (0..count)
        .map(|_| round_one_decimal(normal(&mut rng, 36.6, 0.8)))
        .collect();
    let mut oxygen_levels: Vec<i32> = (0..count).map(|_| normal(&mut rng, 97.0, 3.0) as i32).collect();

    for i in 0..count {
        match statuses[i] {
            PatientStatus::Critical => {
                heart_rates[i] = rng.gen_range(100..140);
                // Hypotension and hypertension are both dangerous
                systolic[i] = if rng.gen_bool(0.5) {
                    rng.gen_range(90..110)
                } else {
                    rng.gen_range(160..200)
                };
                diastolic[i] = if rng.gen_bool(0.5) {
                    rng.gen_range(50..70)
                } else {
                    rng.gen_range(100..120)
                };
                temperatures[i] = round_one_decimal(38.0 + rng.gen::<f64>() * 2.0);
                oxygen_levels[i] = rng.gen_range(80..92);
            }
            PatientStatus::NeedsAttention => {
                heart_rates[i] = rng.gen_range(90..110);
                systolic[i] = rng.gen_range(110..150);
                diastolic[i] = rng.gen_range(70..95);
                temperatures[i] = round_one_decimal(37.0 + rng.gen::<f64>());
                oxygen_levels[i] = rng.gen_range(92..96);
            }
            PatientStatus::Stable => {}
        }
    }

    let patients: Vec<PatientRecord> = (0..count)
        .map(|i| {
            let admission_date = today - Duration::days(i64::from(admission_offsets[i]));
            PatientRecord {
                patient_id: format!("P{:04}", i + 1),
                age: ages[i],
                gender: genders[i],
                department: departments[i],
                admission_date,
                status: statuses[i],
                heart_rate: heart_rates[i],
                blood_pressure_systolic: systolic[i],
                blood_pressure_diastolic: diastolic[i],
                temperature: temperatures[i],
                oxygen_level: oxygen_levels[i],
                length_of_stay_days: (today - admission_date).num_days(),
            }
        })
        .collect();

    debug!("Generated {} synthetic patients with seed {}", patients.len(), seed);
    patients
}

/// Categorical draw over `STATUS_WEIGHTS`
fn weighted_status<R: Rng + ?Sized>(rng: &mut R) -> PatientStatus {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (status, weight) in STATUS_WEIGHTS {
        cumulative += weight;
        if roll < cumulative {
            return status;
        }
    }
    STATUS_WEIGHTS[STATUS_WEIGHTS.len() - 1].0
}

/// Sample N(mean, std_dev²) with the Box-Muller transform
fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // u1 lies in (0, 1] so ln(u1) stays finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
