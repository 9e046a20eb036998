//! Core data models shared across providers, aggregation, and rendering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's traffic and revenue in the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Calendar date of the bucket.
    pub date: NaiveDate,
    /// Display label (`Today` for the final bucket, `Aug 22` otherwise).
    pub label: String,
    /// Active users that day.
    pub visitors: u64,
    /// Revenue that day, in the property's currency.
    pub revenue: f64,
}

/// Aggregated 7-day report for a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReport {
    /// Sum of visitors across all buckets.
    pub total_visitors: u64,
    /// Sum of revenue across all buckets, rounded to 2 decimal places.
    pub total_revenue: f64,
    /// Ordered daily buckets. Empty when the fetch failed.
    pub daily: Vec<DailyPoint>,
}

impl PropertyReport {
    /// The zero-valued report used when a property's fetch fails.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            total_visitors: 0,
            total_revenue: 0.0,
            daily: Vec::new(),
        }
    }
}

/// A discovered analytics property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Numeric property id (last segment of the resource name).
    pub id: String,
    /// Property display name.
    pub name: String,
    /// Site domain, scheme and trailing slash stripped. Empty when the
    /// property was enumerated without domain resolution.
    #[serde(default)]
    pub domain: String,
}

/// A ranked dashboard entry for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsiteStat {
    /// Property display name.
    pub name: String,
    /// Site domain.
    pub domain: String,
    /// Total visitors over the window.
    pub visitors: u64,
    /// Total revenue over the window. `None` when the total is zero.
    pub revenue: Option<f64>,
    /// Daily buckets backing the chart.
    pub data: Vec<DailyPoint>,
}

/// The fully aggregated dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Ranked site entries.
    pub sites: Vec<WebsiteStat>,
    /// Sum of all sites' visitor totals.
    pub total_visitors: u64,
    /// Sum of all sites' revenue totals, absent revenue counted as zero.
    pub total_revenue: f64,
}

/// Which metric the chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Visitors,
    Revenue,
}

impl Metric {
    /// Value of a bucket under this metric.
    #[must_use]
    pub fn of(&self, point: &DailyPoint) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Visitors => point.visitors as f64,
            Self::Revenue => point.revenue,
        }
    }
}
