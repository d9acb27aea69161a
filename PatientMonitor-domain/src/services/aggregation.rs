use std::collections::HashMap;

use crate::entities::patient::{Department, Patient, PatientStatus};
use crate::entities::view::{DashboardSummary, FiveNumberSummary};

/// Placeholder shown for a mean over no rows
pub const NOT_AVAILABLE: &str = "N/A";

/// Count, status counts and means over the filtered rows
pub fn summarize(patients: &[Patient]) -> DashboardSummary {
    let counts = count_by_status(patients);
    let count = |status: PatientStatus| counts.get(&status).copied().unwrap_or(0);

    DashboardSummary {
        total: patients.len(),
        stable: count(PatientStatus::Stable),
        needs_attention: count(PatientStatus::NeedsAttention),
        critical: count(PatientStatus::Critical),
        mean_age: mean(patients.iter().map(|p| f64::from(p.age))),
        mean_length_of_stay: mean(patients.iter().map(|p| p.length_of_stay_days as f64)),
    }
}

pub fn count_by_status(patients: &[Patient]) -> HashMap<PatientStatus, usize> {
    let mut counts = HashMap::new();
    for patient in patients {
        *counts.entry(patient.status).or_insert(0) += 1;
    }
    counts
}

/// Per-department counts, largest first
///
/// Departments without rows are left out. Equal counts keep the fixed
/// department order.
pub fn count_by_department(patients: &[Patient]) -> Vec<(Department, usize)> {
    let mut counts: Vec<(Department, usize)> = Department::ALL
        .into_iter()
        .map(|department| {
            let count = patients.iter().filter(|p| p.department == department).count();
            (department, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    // sort_by is stable, so ties stay in Department::ALL order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Arithmetic mean, None for an empty sequence
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round half away from zero to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One-decimal display of a mean, "N/A" when undefined
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", round_one_decimal(v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Linear-interpolation quantile of an ascending sample, position p*(n-1)
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Min, quartiles and max of a sample, None when it is empty
pub fn five_number_summary(values: &[f64]) -> Option<FiveNumberSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(FiveNumberSummary {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}
