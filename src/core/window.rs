//! Trailing reporting window.
//!
//! The dashboard always shows a fixed 7-day window ending today. Buckets are
//! pre-zeroed so a day with no report rows still renders as a zero bar.

use chrono::{Days, NaiveDate};

use crate::core::models::DailyPoint;

/// Number of days in the reporting window.
pub const WINDOW_DAYS: u64 = 7;

/// A trailing window of consecutive calendar days ending today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingWindow {
    today: NaiveDate,
}

impl TrailingWindow {
    /// Create a window ending at the given date.
    #[must_use]
    pub const fn ending_at(today: NaiveDate) -> Self {
        Self { today }
    }

    /// The last day of the window.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// The start of the report request range.
    ///
    /// The request range deliberately starts one day before the first bucket;
    /// rows for that extra day match no bucket and are dropped.
    #[must_use]
    pub fn request_start(&self) -> NaiveDate {
        self.today - Days::new(WINDOW_DAYS)
    }

    /// Build the pre-zeroed bucket sequence.
    ///
    /// Exactly [`WINDOW_DAYS`] buckets, strictly increasing by one calendar
    /// day. The final bucket is labeled `Today`, earlier ones by short month
    /// and day (`Aug 22`).
    #[must_use]
    pub fn buckets(&self) -> Vec<DailyPoint> {
        (0..WINDOW_DAYS)
            .map(|i| {
                let date = self.today - Days::new(WINDOW_DAYS - 1 - i);
                DailyPoint {
                    label: Self::label_for(date, self.today),
                    date,
                    visitors: 0,
                    revenue: 0.0,
                }
            })
            .collect()
    }

    fn label_for(date: NaiveDate, today: NaiveDate) -> String {
        if date == today {
            "Today".to_string()
        } else {
            date.format("%b %-d").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn buckets_cover_seven_consecutive_days() {
        let window = TrailingWindow::ending_at(date(2026, 8, 28));
        let buckets = window.buckets();

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].date, date(2026, 8, 22));
        assert_eq!(buckets[6].date, date(2026, 8, 28));
        for pair in buckets.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Days::new(1));
        }
    }

    #[test]
    fn last_bucket_is_labeled_today() {
        let window = TrailingWindow::ending_at(date(2026, 8, 28));
        let buckets = window.buckets();

        assert_eq!(buckets[6].label, "Today");
        assert_eq!(buckets[5].label, "Aug 27");
        assert_eq!(buckets[0].label, "Aug 22");
    }

    #[test]
    fn buckets_start_zeroed() {
        let window = TrailingWindow::ending_at(date(2026, 1, 3));
        for bucket in window.buckets() {
            assert_eq!(bucket.visitors, 0);
            assert_eq!(bucket.revenue, 0.0);
        }
    }

    #[test]
    fn window_crosses_month_boundary() {
        let window = TrailingWindow::ending_at(date(2026, 3, 2));
        let buckets = window.buckets();

        assert_eq!(buckets[0].label, "Feb 24");
        assert_eq!(buckets[5].label, "Mar 1");
    }

    #[test]
    fn request_range_exceeds_bucket_window() {
        let window = TrailingWindow::ending_at(date(2026, 8, 28));
        assert_eq!(window.request_start(), date(2026, 8, 21));
        assert!(window.request_start() < window.buckets()[0].date);
    }
}
