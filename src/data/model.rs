use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single salary record (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    /// Survey year.
    pub year: i32,
    /// Seniority level (e.g. "junior", "senior").
    pub seniority: String,
    /// Contract type (e.g. "full-time", "contract").
    pub contract_type: String,
    /// Company size bucket (e.g. "small", "medium", "large").
    pub company_size: String,
    /// Job title. Free text, drawn from a bounded set in practice.
    pub role: String,
    /// Remote status (e.g. "remote", "hybrid", "on-site").
    pub remote_status: String,
    /// ISO-3166 alpha-3 country code of residence.
    pub residence_country: String,
    /// Annual salary in USD. Non-negative; validated at load time.
    pub salary_usd: f64,
}

// ---------------------------------------------------------------------------
// Dimension – the filterable columns
// ---------------------------------------------------------------------------

/// The four categorical dimensions a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl Dimension {
    /// All filterable dimensions, in sidebar display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::ContractType,
        Dimension::CompanySize,
    ];

    /// Human-readable label for the filter widgets.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Seniority => "Seniority",
            Dimension::ContractType => "Contract Type",
            Dimension::CompanySize => "Company Size",
        }
    }

    /// The value this dimension takes for a given record.
    pub fn value_of(&self, record: &SalaryRecord) -> DimValue {
        match self {
            Dimension::Year => DimValue::Year(record.year),
            Dimension::Seniority => DimValue::Text(record.seniority.clone()),
            Dimension::ContractType => DimValue::Text(record.contract_type.clone()),
            Dimension::CompanySize => DimValue::Text(record.company_size.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// DimValue – a single categorical value
// ---------------------------------------------------------------------------

/// A value of a filterable dimension. Years are kept as integers so they
/// sort numerically in the sidebar; everything else is text.
/// Using `BTreeSet` downstream so `DimValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimValue {
    Year(i32),
    Text(String),
}

impl fmt::Display for DimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimValue::Year(y) => write!(f, "{y}"),
            DimValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed per-dimension domains.
/// Immutable after construction; one instance lives per session.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    /// All records, in file order.
    pub records: Vec<SalaryRecord>,
    /// For each filterable dimension the sorted set of distinct values.
    pub domains: BTreeMap<Dimension, BTreeSet<DimValue>>,
}

impl SalaryDataset {
    /// Build the per-dimension domains from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut domains: BTreeMap<Dimension, BTreeSet<DimValue>> = BTreeMap::new();
        for dim in Dimension::ALL {
            domains.insert(dim, BTreeSet::new());
        }
        for rec in &records {
            for dim in Dimension::ALL {
                domains.entry(dim).or_default().insert(dim.value_of(rec));
            }
        }
        SalaryDataset { records, domains }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct roles in the dataset. Drives the role selector of
    /// the by-country chart.
    pub fn distinct_roles(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.role.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, role: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: "senior".into(),
            contract_type: "full-time".into(),
            company_size: "medium".into(),
            role: role.into(),
            remote_status: "remote".into(),
            residence_country: "USA".into(),
            salary_usd: usd,
        }
    }

    #[test]
    fn domains_are_sorted_and_distinct() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "Data Scientist", 100.0),
            record(2022, "Data Engineer", 90.0),
            record(2024, "Data Scientist", 120.0),
        ]);
        let years: Vec<DimValue> = ds.domains[&Dimension::Year].iter().cloned().collect();
        assert_eq!(years, vec![DimValue::Year(2022), DimValue::Year(2024)]);
        assert_eq!(ds.domains[&Dimension::Seniority].len(), 1);
        assert_eq!(ds.distinct_roles(), vec!["Data Engineer", "Data Scientist"]);
    }

    #[test]
    fn empty_dataset_has_empty_domains() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert!(ds.domains[&dim].is_empty());
        }
    }
}
