// Time window domain model
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The timeline selection: full window bounds plus the current pointer.
/// `start <= current <= end` is expected but not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub current: DateTime<Utc>,
}

impl TimeWindow {
    /// 30-day window centered on `now`.
    pub fn centered_on(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(15),
            end: now + Duration::days(15),
            current: now,
        }
    }

    /// Bounds a refresh actually queries: the full window in range mode,
    /// otherwise the single hour at the current pointer.
    pub fn query_bounds(&self, range_mode: bool) -> (DateTime<Utc>, DateTime<Utc>) {
        if range_mode {
            (self.start, self.end)
        } else {
            (self.current, self.current + Duration::hours(1))
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::centered_on(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_centered_window_spans_thirty_days() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = TimeWindow::centered_on(now);
        assert_eq!(window.end - window.start, Duration::days(30));
        assert_eq!(window.current, now);
    }

    #[test]
    fn test_query_bounds_range_mode() {
        let window = TimeWindow::centered_on(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        assert_eq!(window.query_bounds(true), (window.start, window.end));
    }

    #[test]
    fn test_query_bounds_single_hour() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let window = TimeWindow::centered_on(now);
        let (start, end) = window.query_bounds(false);
        assert_eq!(start, now);
        assert_eq!(end, now + Duration::hours(1));
    }
}
