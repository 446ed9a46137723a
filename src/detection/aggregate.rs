use crate::data::Report;
use crate::detection::windows::BASELINE_SPAN_DAYS;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Per-location, per-UTC-day report counts over the baseline window.
///
/// Only the multiset of daily counts matters downstream; the ordered keys
/// exist to keep iteration deterministic.
pub type BaselineDailyCounts = BTreeMap<String, BTreeMap<NaiveDate, u32>>;

/// Everything accumulated for one location over the current window.
///
/// `symptoms` keeps duplicates and input order - symptom ranking breaks
/// frequency ties by first appearance. `subject_ids` keeps duplicates;
/// deduplication happens at alert assembly. Invariant: `count` equals
/// `subject_ids.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentAggregate {
    pub count: u32,
    pub symptoms: Vec<String>,
    pub subject_ids: Vec<String>,
}

/// Group baseline reports by location, then by UTC calendar day.
pub fn baseline_daily_counts(reports: &[Report]) -> BaselineDailyCounts {
    let mut table = BaselineDailyCounts::new();
    for report in reports {
        let day = report.timestamp.date_naive();
        *table
            .entry(report.location.clone())
            .or_default()
            .entry(day)
            .or_insert(0) += 1;
    }
    table
}

/// Group current-window reports by location.
pub fn aggregate_current(reports: &[Report]) -> BTreeMap<String, CurrentAggregate> {
    let mut table: BTreeMap<String, CurrentAggregate> = BTreeMap::new();
    for report in reports {
        let entry = table.entry(report.location.clone()).or_default();
        entry.count += 1;
        entry.symptoms.extend(report.symptoms.iter().cloned());
        entry.subject_ids.push(report.subject_id.clone());
    }
    table
}

/// The baseline daily-count samples to score a location against.
///
/// A location with no baseline history gets a week of zeros - "no history"
/// means the normal rate is taken to be zero reports/day, so any current
/// activity is maximally anomalous. A sequence with fewer than two samples
/// cannot carry a standard deviation and is replaced by two zeros.
pub fn daily_count_samples(baseline: &BaselineDailyCounts, location: &str) -> Vec<u32> {
    let counts: Vec<u32> = match baseline.get(location) {
        Some(days) => days.values().copied().collect(),
        None => vec![0; BASELINE_SPAN_DAYS as usize],
    };

    if counts.len() < 2 {
        return vec![0, 0];
    }
    counts
}
