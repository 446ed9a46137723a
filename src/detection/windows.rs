use chrono::{DateTime, Duration, Utc};

/// Length of the anomaly window, in hours.
pub const CURRENT_WINDOW_HOURS: i64 = 24;

/// Length of the baseline history period, in days.
pub const BASELINE_SPAN_DAYS: i64 = 7;

/// How far back the baseline period starts, in days. The baseline ends one
/// week before `now` so it never overlaps the current window.
pub const BASELINE_OFFSET_DAYS: i64 = 14;

/// Half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Lower bound inclusive, upper bound exclusive.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// The two read ranges of one detection run, derived from a single `now`
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionWindows {
    /// Stable prior period: `[now - 14d, now - 7d)`.
    pub baseline: TimeWindow,
    /// Trailing day under test: `[now - 24h, now)`.
    pub current: TimeWindow,
}

impl DetectionWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            baseline: TimeWindow::new(
                now - Duration::days(BASELINE_OFFSET_DAYS),
                now - Duration::days(BASELINE_OFFSET_DAYS - BASELINE_SPAN_DAYS),
            ),
            current: TimeWindow::new(now - Duration::hours(CURRENT_WINDOW_HOURS), now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_windows_do_not_overlap() {
        let windows = DetectionWindows::at(now());
        assert!(windows.baseline.end <= windows.current.start);
        assert_eq!(windows.baseline.end - windows.baseline.start, Duration::days(7));
        assert_eq!(windows.current.end - windows.current.start, Duration::hours(24));
    }

    #[test]
    fn test_current_window_boundaries() {
        let now = now();
        let current = DetectionWindows::at(now).current;

        // A report exactly 24h old sits on the inclusive lower bound
        assert!(current.contains(now - Duration::hours(24)));
        // A report stamped exactly `now` is outside the exclusive upper bound
        assert!(!current.contains(now));
        assert!(current.contains(now - Duration::seconds(1)));
        assert!(!current.contains(now - Duration::hours(24) - Duration::seconds(1)));
    }

    #[test]
    fn test_baseline_window_boundaries() {
        let now = now();
        let baseline = DetectionWindows::at(now).baseline;

        assert!(baseline.contains(now - Duration::days(14)));
        assert!(!baseline.contains(now - Duration::days(7)));
        assert!(baseline.contains(now - Duration::days(7) - Duration::seconds(1)));
        assert!(!baseline.contains(now - Duration::days(14) - Duration::seconds(1)));
    }

    #[test]
    fn test_gap_between_baseline_and_current() {
        // Days 7..1 before now belong to neither window
        let now = now();
        let windows = DetectionWindows::at(now);
        let in_gap = now - Duration::days(3);

        assert!(!windows.baseline.contains(in_gap));
        assert!(!windows.current.contains(in_gap));
    }
}
