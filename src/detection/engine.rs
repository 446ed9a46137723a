use crate::data::{AlertDebug, OutbreakAlert, Report};
use crate::detection::aggregate::{
    aggregate_current, baseline_daily_counts, daily_count_samples, CurrentAggregate,
};
use crate::detection::scoring::{
    risk_score, round2, score_location, severity_for, LocationScore, OUTBREAK_Z_THRESHOLD,
};
use crate::detection::windows::DetectionWindows;
use crate::store::{ReportStore, StoreError};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// How many symptoms an alert surfaces.
pub const TOP_SYMPTOM_LIMIT: usize = 3;

/// Tunables for a detection run.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Z-score a location must exceed (strictly) to alert.
    pub z_threshold: f64,

    /// Attach the raw intermediate statistics to each alert.
    pub emit_debug_stats: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            z_threshold: OUTBREAK_Z_THRESHOLD,
            emit_debug_stats: true,
        }
    }
}

/// The full detection pipeline as a pure function of the two report sets.
///
/// Aggregates the baseline window into per-location daily counts and the
/// current window into per-location totals, scores every location seen in
/// the current window, and assembles ranked alerts for those clearing the
/// threshold. Holds no state; identical inputs yield identical output.
pub fn compute_alerts(
    baseline_reports: &[Report],
    current_reports: &[Report],
    now: DateTime<Utc>,
    config: &DetectionConfig,
) -> Vec<OutbreakAlert> {
    let baseline = baseline_daily_counts(baseline_reports);
    let current = aggregate_current(current_reports);

    let mut scored: Vec<(f64, OutbreakAlert)> = Vec::new();
    for (location, agg) in current {
        let samples = daily_count_samples(&baseline, &location);
        let score = score_location(&samples, agg.count);

        // Locations at or below threshold drop silently
        if score.z_score <= config.z_threshold {
            continue;
        }

        let alert = assemble_alert(location, &agg, &score, now, config);
        scored.push((score.z_score, alert));
    }

    // Strongest deviation first; ties by location for a stable ranking
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.location.cmp(&b.1.location))
    });

    scored.into_iter().map(|(_, alert)| alert).collect()
}

fn assemble_alert(
    location: String,
    agg: &CurrentAggregate,
    score: &LocationScore,
    now: DateTime<Utc>,
    config: &DetectionConfig,
) -> OutbreakAlert {
    // One subject may have submitted several reports
    let affected_subjects = agg
        .subject_ids
        .iter()
        .collect::<HashSet<_>>()
        .len() as u32;

    let debug = config.emit_debug_stats.then(|| AlertDebug {
        baseline_mean: round2(score.mean),
        baseline_std_dev: round2(score.std_dev),
        current_count: score.current_count,
        z_score: round2(score.z_score),
    });

    OutbreakAlert {
        location,
        affected_subjects,
        risk_score: risk_score(score.z_score),
        severity: severity_for(score.z_score),
        top_symptoms: top_symptoms(&agg.symptoms, TOP_SYMPTOM_LIMIT),
        detection_time: now,
        debug,
    }
}

/// Most frequent symptoms, ties broken by first appearance in the input.
fn top_symptoms(symptoms: &[String], limit: usize) -> Vec<String> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<(&str, u32)> = Vec::new();

    for symptom in symptoms {
        match slots.get(symptom.as_str()) {
            Some(&slot) => ranked[slot].1 += 1,
            None => {
                slots.insert(symptom.as_str(), ranked.len());
                ranked.push((symptom.as_str(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal frequencies
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(limit)
        .map(|(symptom, _)| symptom.to_string())
        .collect()
}

/// The outbreak detection engine.
///
/// Stateless across invocations: every `detect` call reads the two windows
/// from the store and recomputes alerts from scratch. The store reads are
/// the only suspension point; either failure aborts the run unmodified.
pub struct OutbreakDetector<S> {
    store: Arc<S>,
    config: DetectionConfig,
}

impl<S: ReportStore> OutbreakDetector<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, DetectionConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: DetectionConfig) -> Self {
        Self { store, config }
    }

    /// Run one detection pass against the wall clock.
    pub async fn detect(&self) -> Result<Vec<OutbreakAlert>, StoreError> {
        self.detect_at(Utc::now()).await
    }

    /// Run one detection pass with an explicit `now` snapshot.
    ///
    /// Both read windows and every alert's `detection_time` derive from this
    /// single instant, so a run is reproducible against an unchanged store.
    pub async fn detect_at(&self, now: DateTime<Utc>) -> Result<Vec<OutbreakAlert>, StoreError> {
        let windows = DetectionWindows::at(now);

        // Independent range queries; issue both at once
        let (baseline_reports, current_reports) = tokio::try_join!(
            self.store
                .read_range(windows.baseline.start, windows.baseline.end),
            self.store
                .read_range(windows.current.start, windows.current.end),
        )?;

        debug!(
            baseline = baseline_reports.len(),
            current = current_reports.len(),
            "detection windows read"
        );

        let alerts = compute_alerts(&baseline_reports, &current_reports, now, &self.config);
        info!(alerts = alerts.len(), "detection pass complete");
        Ok(alerts)
    }
}
