use crate::entities::filter::{AgeRange, PatientFilter};
use crate::entities::patient::Patient;
use crate::entities::view::AppliedFilter;

/// Youngest and oldest age present, None for an empty table
pub fn observed_age_bounds(patients: &[Patient]) -> Option<AgeRange> {
    let min = patients.iter().map(|p| p.age).min()?;
    let max = patients.iter().map(|p| p.age).max()?;
    Some(AgeRange { min, max })
}

/// Age range a filter selects on `patients`; missing bounds fall back to the
/// observed ones
pub fn resolve_age_range(patients: &[Patient], filter: &PatientFilter) -> Option<AgeRange> {
    let observed = observed_age_bounds(patients)?;
    Some(AgeRange {
        min: filter.age_min.unwrap_or(observed.min),
        max: filter.age_max.unwrap_or(observed.max),
    })
}

/// Whether a single patient passes every active predicate
pub fn matches(patient: &Patient, filter: &PatientFilter, age_range: &AgeRange) -> bool {
    (filter.departments.is_empty() || filter.departments.contains(&patient.department))
        && (filter.statuses.is_empty() || filter.statuses.contains(&patient.status))
        && age_range.contains(patient.age)
}

/// Rows of `patients` that satisfy the filter, in their original order
pub fn filter_patients(patients: &[Patient], filter: &PatientFilter) -> Vec<Patient> {
    apply_filter(patients, filter).1
}

/// Filter the table and report the predicates that were actually applied
pub fn apply_filter(patients: &[Patient], filter: &PatientFilter) -> (AppliedFilter, Vec<Patient>) {
    let age_range = resolve_age_range(patients, filter);

    let rows = match &age_range {
        Some(range) => patients
            .iter()
            .filter(|p| matches(p, filter, range))
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let applied = AppliedFilter {
        departments: filter.departments.clone(),
        statuses: filter.statuses.clone(),
        age_range,
    };

    (applied, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::patient::{Department, PatientStatus};
    use crate::testing::fixtures::{patient, sample_patients};

    #[test]
    fn test_empty_selection_returns_everything() {
        let patients = sample_patients();
        let filtered = filter_patients(&patients, &PatientFilter::default());
        assert_eq!(filtered, patients);
    }

    #[test]
    fn test_empty_selection_keeps_age_bound() {
        let patients = sample_patients();
        let filter = PatientFilter::default().with_age_range(30, 60);

        let filtered = filter_patients(&patients, &filter);
        let expected: Vec<Patient> = patients
            .iter()
            .filter(|p| (30..=60).contains(&p.age))
            .cloned()
            .collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn test_department_and_status_predicates_combine() {
        let patients = sample_patients();
        let filter = PatientFilter::default()
            .with_departments([Department::Cardiology, Department::Surgery])
            .with_statuses([PatientStatus::Critical]);

        let filtered = filter_patients(&patients, &filter);
        assert!(!filtered.is_empty());
        for p in &filtered {
            assert!(matches!(p.department, Department::Cardiology | Department::Surgery));
            assert_eq!(p.status, PatientStatus::Critical);
        }
    }

    #[test]
    fn test_age_range_is_inclusive() {
        let patients = vec![
            patient("P0001", 30, Department::Therapy, PatientStatus::Stable),
            patient("P0002", 40, Department::Therapy, PatientStatus::Stable),
            patient("P0003", 50, Department::Therapy, PatientStatus::Stable),
        ];
        let filter = PatientFilter::default().with_age_range(30, 40);

        let ids: Vec<String> = filter_patients(&patients, &filter)
            .into_iter()
            .map(|p| p.patient_id)
            .collect();
        assert_eq!(ids, vec!["P0001", "P0002"]);
    }

    #[test]
    fn test_missing_bounds_default_to_observed() {
        let patients = vec![
            patient("P0001", 25, Department::Therapy, PatientStatus::Stable),
            patient("P0002", 70, Department::Therapy, PatientStatus::Stable),
        ];
        let filter = PatientFilter {
            age_min: Some(40),
            ..PatientFilter::default()
        };

        let (applied, rows) = apply_filter(&patients, &filter);
        assert_eq!(applied.age_range, Some(AgeRange { min: 40, max: 70 }));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let patients = sample_patients();
        let filter = PatientFilter::default()
            .with_statuses([PatientStatus::Stable, PatientStatus::NeedsAttention])
            .with_age_range(20, 75);

        let once = filter_patients(&patients, &filter);
        let twice = filter_patients(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let patients = sample_patients();
        let before = patients.clone();
        let _ = filter_patients(&patients, &PatientFilter::default().with_age_range(50, 50));
        assert_eq!(patients, before);
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let patients = sample_patients();
        let filter = PatientFilter::default().with_age_range(60, 30);
        assert!(filter_patients(&patients, &filter).is_empty());
    }

    #[test]
    fn test_empty_table() {
        let (applied, rows) = apply_filter(&[], &PatientFilter::default());
        assert!(rows.is_empty());
        assert_eq!(applied.age_range, None);
        assert_eq!(observed_age_bounds(&[]), None);
    }
}
