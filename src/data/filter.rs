use std::collections::{BTreeMap, BTreeSet};

use super::model::{DimValue, Dimension, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state: maps dimension → set of allowed values.
///
/// An empty set means "nothing selected" and matches no record; a set equal
/// to the dimension's full domain means "no effective filter". The two are
/// distinct on purpose: the sidebar defaults to everything selected, and
/// unticking every box is a valid way to blank the dashboard.
pub type FilterSpec = BTreeMap<Dimension, BTreeSet<DimValue>>;

/// Initialise a [`FilterSpec`] with every dimension's full domain selected
/// (i.e., show everything).
pub fn init_filter_spec(dataset: &SalaryDataset) -> FilterSpec {
    dataset
        .domains
        .iter()
        .map(|(dim, vals)| (*dim, vals.clone()))
        .collect()
}

/// Return indices of records that pass all active filters, in dataset order.
///
/// A record passes a dimension filter when:
/// * The dimension is not present in `spec` → passes (no constraint)
/// * The allowed-set for that dimension is empty → nothing selected → fails
/// * The record's value for that dimension is in the allowed-set → passes
///
/// Unknown values in an allowed-set are harmless: they match nothing.
pub fn apply_filters(dataset: &SalaryDataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| record_matches(dataset, rec, spec))
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the records selected by a set of indices, preserving order.
/// The aggregation functions consume this view.
pub fn select_records<'a>(dataset: &'a SalaryDataset, indices: &[usize]) -> Vec<&'a SalaryRecord> {
    indices.iter().map(|&i| &dataset.records[i]).collect()
}

fn record_matches(dataset: &SalaryDataset, rec: &SalaryRecord, spec: &FilterSpec) -> bool {
    for (dim, allowed) in spec {
        if allowed.is_empty() {
            // Nothing selected for this dimension → hide everything
            return false;
        }
        // Every domain value selected → no effective filter. Superset, not
        // cardinality: the allowed-set may carry values the dataset never
        // takes, and those must not stand in for a real domain value.
        if let Some(domain) = dataset.domains.get(dim) {
            if allowed.is_superset(domain) {
                continue;
            }
        }
        if !allowed.contains(&dim.value_of(rec)) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, seniority: &str, role: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: seniority.into(),
            contract_type: "full-time".into(),
            company_size: "medium".into(),
            role: role.into(),
            remote_status: "remote".into(),
            residence_country: "USA".into(),
            salary_usd: usd,
        }
    }

    fn dataset() -> SalaryDataset {
        SalaryDataset::from_records(vec![
            record(2023, "junior", "Data Analyst", 60_000.0),
            record(2024, "senior", "Data Scientist", 150_000.0),
            record(2024, "junior", "Data Engineer", 95_000.0),
            record(2023, "senior", "Data Scientist", 140_000.0),
        ])
    }

    #[test]
    fn full_domain_spec_is_identity() {
        let ds = dataset();
        let spec = init_filter_spec(&ds);
        assert_eq!(apply_filters(&ds, &spec), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_allowed_set_matches_nothing() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        spec.insert(Dimension::Seniority, BTreeSet::new());
        assert!(apply_filters(&ds, &spec).is_empty());
    }

    #[test]
    fn membership_is_anded_across_dimensions() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        spec.insert(
            Dimension::Year,
            BTreeSet::from([DimValue::Year(2024)]),
        );
        spec.insert(
            Dimension::Seniority,
            BTreeSet::from([DimValue::Text("junior".into())]),
        );
        assert_eq!(apply_filters(&ds, &spec), vec![2]);
    }

    #[test]
    fn unknown_allowed_value_matches_nothing() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        spec.insert(
            Dimension::Year,
            BTreeSet::from([DimValue::Year(1999)]),
        );
        assert!(apply_filters(&ds, &spec).is_empty());
    }

    #[test]
    fn unknown_values_do_not_stand_in_for_real_ones() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        // Same cardinality as the year domain, but 1999 is not in it.
        spec.insert(
            Dimension::Year,
            BTreeSet::from([DimValue::Year(2024), DimValue::Year(1999)]),
        );
        assert_eq!(apply_filters(&ds, &spec), vec![1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        spec.insert(
            Dimension::Year,
            BTreeSet::from([DimValue::Year(2024)]),
        );

        let first = apply_filters(&ds, &spec);
        // Re-filter the filtered subsequence as its own dataset.
        let sub = SalaryDataset::from_records(
            select_records(&ds, &first).into_iter().cloned().collect(),
        );
        let second = apply_filters(&sub, &spec);
        assert_eq!(second.len(), first.len());
        assert_eq!(select_records(&sub, &second), select_records(&ds, &first));
    }

    #[test]
    fn reverting_a_dimension_restores_the_view() {
        let ds = dataset();
        let mut spec = init_filter_spec(&ds);
        let original = apply_filters(&ds, &spec);

        let saved = spec[&Dimension::CompanySize].clone();
        spec.insert(Dimension::CompanySize, BTreeSet::new());
        assert!(apply_filters(&ds, &spec).is_empty());

        spec.insert(Dimension::CompanySize, saved);
        assert_eq!(apply_filters(&ds, &spec), original);
    }
}
