use crate::data::Severity;
use statrs::statistics::Statistics;

/// Detection threshold: a location alerts only when its current count sits
/// more than two baseline standard deviations above the baseline mean
/// (one-sided, ~97.5th percentile of a normal distribution).
pub const OUTBREAK_Z_THRESHOLD: f64 = 2.0;

/// Severity band edges. Strictness at each edge is load-bearing:
/// z = 2.5 is Low, z = 3.5 is Medium.
pub const MEDIUM_Z_THRESHOLD: f64 = 2.5;
pub const HIGH_Z_THRESHOLD: f64 = 3.5;

/// Risk rescaling: z = 2 maps to 40%, z >= 5 saturates at 100%.
pub const RISK_PER_SIGMA: f64 = 20.0;
pub const MAX_RISK_SCORE: f64 = 100.0;

/// Minimum-variability floor applied when every baseline day is identical.
/// Keeps the score finite and stops a tiny real deviation from exploding.
pub const MIN_STD_DEV: f64 = 1.0;

/// Scored statistics for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationScore {
    /// Arithmetic mean of the baseline daily counts.
    pub mean: f64,
    /// Sample standard deviation (n-1 divisor) of the same counts,
    /// floored at `MIN_STD_DEV`.
    pub std_dev: f64,
    /// Total reports at this location in the 24h current window.
    pub current_count: u32,
    /// How many baseline standard deviations the current count lies above
    /// the baseline mean. The current window is treated as one more
    /// day-sized bucket against the per-day baseline distribution.
    pub z_score: f64,
}

/// Score one location's current count against its baseline daily counts.
///
/// `daily_counts` must hold at least two samples - aggregation pads or
/// synthesizes shorter histories before calling in here.
pub fn score_location(daily_counts: &[u32], current_count: u32) -> LocationScore {
    debug_assert!(daily_counts.len() >= 2);

    let samples: Vec<f64> = daily_counts.iter().map(|&c| f64::from(c)).collect();
    let mean = samples.iter().mean();
    let sampled_std = samples.iter().std_dev();

    let std_dev = if sampled_std == 0.0 {
        MIN_STD_DEV
    } else {
        sampled_std
    };

    let z_score = (f64::from(current_count) - mean) / std_dev;

    LocationScore {
        mean,
        std_dev,
        current_count,
        z_score,
    }
}

/// Severity tier for an alerting z-score.
///
/// Callers gate on `OUTBREAK_Z_THRESHOLD` first; the bands here are
/// absolute and first-match-wins from the top.
pub fn severity_for(z_score: f64) -> Severity {
    if z_score > HIGH_Z_THRESHOLD {
        Severity::High
    } else if z_score > MEDIUM_Z_THRESHOLD {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Capped linear rescaling of the z-score into a 0-100 presentation value,
/// rounded to one decimal. Presentation sugar over the z-score, not an
/// independent statistic.
pub fn risk_score(z_score: f64) -> f64 {
    round1((z_score * RISK_PER_SIGMA).min(MAX_RISK_SCORE))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
