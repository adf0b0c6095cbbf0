use std::collections::BTreeSet;

use crate::data::filter::{FilterSpec, apply_filters, init_filter_spec, select_records};
use crate::data::model::{DimValue, Dimension, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Role preselected for the by-country chart when the dataset contains it.
const PREFERRED_COUNTRY_ROLE: &str = "Data Scientist";

/// The full UI state, independent of rendering. Everything the original
/// dashboard kept in page-scope globals lives here explicitly.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalaryDataset>,

    /// Per-dimension filter selections.
    pub filters: FilterSpec,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Role restricting the by-country salary chart.
    pub country_role: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterSpec::default(),
            visible_indices: Vec::new(),
            country_role: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, initialise filters and chart state.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.filters = init_filter_spec(&dataset);
        self.visible_indices = (0..dataset.len()).collect();

        // Default role for the by-country chart: the survey's flagship role
        // if present, otherwise the first role alphabetically.
        let roles = dataset.distinct_roles();
        self.country_role = if roles.iter().any(|r| r == PREFERRED_COUNTRY_ROLE) {
            Some(PREFERRED_COUNTRY_ROLE.to_string())
        } else {
            roles.first().cloned()
        };

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = apply_filters(ds, &self.filters);
        }
    }

    /// Borrow the currently visible records, in dataset order.
    pub fn visible_records(&self) -> Vec<&SalaryRecord> {
        match &self.dataset {
            Some(ds) => select_records(ds, &self.visible_indices),
            None => Vec::new(),
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &DimValue) {
        let selected = self.filters.entry(dim).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select a dimension's full domain.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            if let Some(domain) = ds.domains.get(&dim) {
                let domain = domain.clone();
                self.filters.insert(dim, domain);
                self.refilter();
            }
        }
    }

    /// Deselect every value of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.filters.insert(dim, BTreeSet::new());
        self.refilter();
    }

    /// Change the role restricting the by-country chart.
    pub fn set_country_role(&mut self, role: String) {
        self.country_role = Some(role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, role: &str) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: "senior".into(),
            contract_type: "full-time".into(),
            company_size: "medium".into(),
            role: role.into(),
            remote_status: "remote".into(),
            residence_country: "USA".into(),
            salary_usd: 100_000.0,
        }
    }

    #[test]
    fn set_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![
            record(2023, "Data Engineer"),
            record(2024, "Data Scientist"),
        ]));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.country_role.as_deref(), Some("Data Scientist"));
        assert_eq!(state.filters[&Dimension::Year].len(), 2);
    }

    #[test]
    fn toggle_and_revert_restores_the_view() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![
            record(2023, "Data Engineer"),
            record(2024, "Data Scientist"),
        ]));

        let v2024 = DimValue::Year(2024);
        state.toggle_filter_value(Dimension::Year, &v2024);
        assert_eq!(state.visible_indices, vec![0]);
        state.toggle_filter_value(Dimension::Year, &v2024);
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn select_none_blanks_the_dashboard() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![record(2024, "DS")]));
        state.select_none(Dimension::Seniority);
        assert!(state.visible_indices.is_empty());
        assert!(state.visible_records().is_empty());
        state.select_all(Dimension::Seniority);
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn country_role_falls_back_to_first_role() {
        let mut state = AppState::default();
        state.set_dataset(SalaryDataset::from_records(vec![
            record(2024, "ML Engineer"),
            record(2024, "Analyst"),
        ]));
        assert_eq!(state.country_role.as_deref(), Some("Analyst"));
    }
}
