use chrono::{DateTime, Duration, Utc};

/// Half-open time range `[start, end)` that a generator reads context from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The last `minutes` minutes, ending now
    pub fn last_minutes(minutes: i64) -> Self {
        Self::ending_at(Utc::now(), Duration::minutes(minutes.max(0)))
    }

    pub fn ending_at(end: DateTime<Utc>, length: Duration) -> Self {
        Self {
            start: end - length,
            end,
        }
    }

    /// Window from unix-second bounds. Both bounds must be present and valid,
    /// otherwise the default window of `default_secs` ending now is used.
    pub fn from_unix_or_default(
        start_time: Option<i64>,
        end_time: Option<i64>,
        default_secs: i64,
    ) -> Self {
        let explicit = start_time
            .zip(end_time)
            .and_then(|(start, end)| {
                Some(Self::new(
                    DateTime::from_timestamp(start, 0)?,
                    DateTime::from_timestamp(end, 0)?,
                ))
            });

        explicit.unwrap_or_else(|| Self::ending_at(Utc::now(), Duration::seconds(default_secs)))
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_unix_range() {
        let window = TimeWindow::from_unix_or_default(Some(1_700_000_000), Some(1_700_003_600), 60);
        assert_eq!(window.start.timestamp(), 1_700_000_000);
        assert_eq!(window.end.timestamp(), 1_700_003_600);
    }

    #[test]
    fn test_partial_range_falls_back_to_default() {
        let window = TimeWindow::from_unix_or_default(Some(1_700_000_000), None, 86_400);
        assert_eq!(window.duration(), Duration::seconds(86_400));
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(window.end > start);
    }

    #[test]
    fn test_last_minutes() {
        let window = TimeWindow::last_minutes(15);
        assert_eq!(window.duration(), Duration::minutes(15));
        assert_eq!(TimeWindow::last_minutes(-5).duration(), Duration::zero());
    }
}
