use std::collections::{BTreeMap, HashMap};

use super::model::SalaryRecord;

// ---------------------------------------------------------------------------
// Scalar summary metrics
// ---------------------------------------------------------------------------

/// Default number of groups returned by [`top_roles_by_mean_salary`].
pub const DEFAULT_TOP_ROLES: usize = 10;

/// Default number of intervals used by [`salary_histogram_buckets`].
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 30;

/// The headline numbers shown above the charts.
///
/// An empty view yields zeros and an empty role rather than an error: the
/// metric tiles always render something.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub count: usize,
    pub modal_role: String,
}

impl SummaryMetrics {
    fn empty() -> Self {
        SummaryMetrics {
            mean_salary: 0.0,
            max_salary: 0.0,
            count: 0,
            modal_role: String::new(),
        }
    }
}

/// Compute mean/max salary, record count and the most frequent role over a
/// filtered view. Modal-role ties are broken by first appearance in the view.
pub fn summary_metrics(view: &[&SalaryRecord]) -> SummaryMetrics {
    if view.is_empty() {
        return SummaryMetrics::empty();
    }

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    // role → (occurrences, position of first occurrence)
    let mut role_counts: HashMap<&str, (usize, usize)> = HashMap::new();

    for (pos, rec) in view.iter().enumerate() {
        sum += rec.salary_usd;
        max = max.max(rec.salary_usd);
        role_counts
            .entry(rec.role.as_str())
            .or_insert((0, pos))
            .0 += 1;
    }

    let modal_role = role_counts
        .iter()
        .max_by(|(_, &(count_a, first_a)), (_, &(count_b, first_b))| {
            // Higher count wins; on ties the earlier first occurrence wins.
            (count_a, std::cmp::Reverse(first_a)).cmp(&(count_b, std::cmp::Reverse(first_b)))
        })
        .map(|(role, _)| role.to_string())
        .unwrap_or_default();

    SummaryMetrics {
        mean_salary: sum / view.len() as f64,
        max_salary: max,
        count: view.len(),
        modal_role,
    }
}

// ---------------------------------------------------------------------------
// Grouped projections
// ---------------------------------------------------------------------------

/// Group by role, take the `k` roles with the highest mean salary and return
/// them ascending by mean, so a horizontal bar chart drawn top-down shows
/// the largest bar at the top. Ties on the mean are broken by role name.
pub fn top_roles_by_mean_salary(view: &[&SalaryRecord], k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = group_means(view, |rec| rec.role.as_str())
        .into_iter()
        .collect();
    // Descending by mean to pick the top k, then ascending for display.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked.reverse();
    ranked
}

/// One interval of the salary histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub range_low: f64,
    pub range_high: f64,
    pub count: usize,
}

/// Partition the observed salary range into `bucket_count` equal-width
/// intervals and count records per interval. A salary landing exactly on
/// an interior boundary counts toward the lower interval; the minimum
/// falls in the first and the maximum in the last.
///
/// An empty view yields no buckets; a view where every salary is equal
/// yields a single degenerate bucket holding every record.
pub fn salary_histogram_buckets(view: &[&SalaryRecord], bucket_count: usize) -> Vec<HistogramBucket> {
    if view.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for rec in view {
        min = min.min(rec.salary_usd);
        max = max.max(rec.salary_usd);
    }

    let width = (max - min) / bucket_count as f64;
    if width <= 0.0 {
        return vec![HistogramBucket {
            range_low: min,
            range_high: max,
            count: view.len(),
        }];
    }

    let mut counts = vec![0usize; bucket_count];
    for rec in view {
        let offset = (rec.salary_usd - min) / width;
        let idx = if offset <= 0.0 {
            0
        } else {
            (offset.ceil() as usize - 1).min(bucket_count - 1)
        };
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            range_low: min + i as f64 * width,
            range_high: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Frequency of each remote-status value over the view. Callers impose
/// whatever ordering their chart needs.
pub fn remote_status_distribution(view: &[&SalaryRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for rec in view {
        *counts.entry(rec.remote_status.clone()).or_default() += 1;
    }
    counts
}

/// Mean salary per residence country, restricted to records whose role
/// equals `role_filter`. A role present in zero records yields an empty map.
pub fn mean_salary_by_country(view: &[&SalaryRecord], role_filter: &str) -> BTreeMap<String, f64> {
    let restricted: Vec<&SalaryRecord> = view
        .iter()
        .copied()
        .filter(|rec| rec.role == role_filter)
        .collect();
    group_means(&restricted, |rec| rec.residence_country.as_str())
}

/// Group records by a key and reduce `salary_usd` to its arithmetic mean.
fn group_means<'a, F>(view: &[&'a SalaryRecord], key: F) -> BTreeMap<String, f64>
where
    F: Fn(&'a SalaryRecord) -> &'a str,
{
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in view {
        let entry = sums.entry(key(rec)).or_insert((0.0, 0));
        entry.0 += rec.salary_usd;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k.to_string(), sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: &str, country: &str, remote: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            year: 2024,
            seniority: "senior".into(),
            contract_type: "full-time".into(),
            company_size: "medium".into(),
            role: role.into(),
            remote_status: remote.into(),
            residence_country: country.into(),
            salary_usd: usd,
        }
    }

    fn view(records: &[SalaryRecord]) -> Vec<&SalaryRecord> {
        records.iter().collect()
    }

    #[test]
    fn summary_metrics_on_mixed_roles() {
        let records = vec![
            record("A", "USA", "remote", 100.0),
            record("A", "USA", "remote", 200.0),
            record("B", "DEU", "on-site", 50.0),
        ];
        let m = summary_metrics(&view(&records));
        assert!((m.mean_salary - 116.67).abs() < 0.01);
        assert_eq!(m.max_salary, 200.0);
        assert_eq!(m.count, 3);
        assert_eq!(m.modal_role, "A");
    }

    #[test]
    fn summary_metrics_empty_view_defaults() {
        let m = summary_metrics(&[]);
        assert_eq!(
            m,
            SummaryMetrics {
                mean_salary: 0.0,
                max_salary: 0.0,
                count: 0,
                modal_role: String::new(),
            }
        );
    }

    #[test]
    fn modal_role_tie_breaks_on_first_appearance() {
        let records = vec![
            record("B", "USA", "remote", 1.0),
            record("A", "USA", "remote", 1.0),
            record("A", "USA", "remote", 1.0),
            record("B", "USA", "remote", 1.0),
        ];
        assert_eq!(summary_metrics(&view(&records)).modal_role, "B");
    }

    #[test]
    fn top_roles_ascending_by_mean() {
        let records = vec![
            record("A", "USA", "remote", 100.0),
            record("A", "USA", "remote", 200.0),
            record("B", "DEU", "on-site", 50.0),
        ];
        assert_eq!(
            top_roles_by_mean_salary(&view(&records), 1),
            vec![("A".to_string(), 150.0)]
        );
        assert_eq!(
            top_roles_by_mean_salary(&view(&records), 5),
            vec![("B".to_string(), 50.0), ("A".to_string(), 150.0)]
        );
        assert!(top_roles_by_mean_salary(&[], 10).is_empty());
    }

    #[test]
    fn histogram_final_bucket_is_inclusive() {
        let records = vec![
            record("A", "USA", "remote", 10.0),
            record("A", "USA", "remote", 20.0),
            record("A", "USA", "remote", 30.0),
        ];
        let buckets = salary_histogram_buckets(&view(&records), 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].range_low, 10.0);
        assert_eq!(buckets[0].range_high, 20.0);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].range_low, 20.0);
        assert_eq!(buckets[1].range_high, 30.0);
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn histogram_empty_and_degenerate_views() {
        assert!(salary_histogram_buckets(&[], 30).is_empty());

        let records = vec![
            record("A", "USA", "remote", 75.0),
            record("A", "USA", "remote", 75.0),
        ];
        let buckets = salary_histogram_buckets(&view(&records), 30);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].range_low, 75.0);
        assert_eq!(buckets[0].range_high, 75.0);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn remote_distribution_counts_values() {
        let records = vec![
            record("A", "USA", "remote", 1.0),
            record("A", "USA", "hybrid", 1.0),
            record("A", "USA", "remote", 1.0),
        ];
        let dist = remote_status_distribution(&view(&records));
        assert_eq!(dist.get("remote"), Some(&2));
        assert_eq!(dist.get("hybrid"), Some(&1));
        assert!(remote_status_distribution(&[]).is_empty());
    }

    #[test]
    fn mean_salary_by_country_restricts_to_role() {
        let records = vec![
            record("Data Scientist", "USA", "remote", 100.0),
            record("Data Scientist", "USA", "remote", 200.0),
            record("Data Scientist", "DEU", "remote", 90.0),
            record("Data Engineer", "USA", "remote", 999.0),
        ];
        let by_country = mean_salary_by_country(&view(&records), "Data Scientist");
        assert_eq!(by_country.get("USA"), Some(&150.0));
        assert_eq!(by_country.get("DEU"), Some(&90.0));
        assert_eq!(by_country.len(), 2);

        assert!(mean_salary_by_country(&view(&records), "Missing Role").is_empty());
    }
}
