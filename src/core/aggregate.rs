//! Dashboard aggregation pipeline.
//!
//! Fans out across every connection's selected properties, fetches their
//! 7-day reports concurrently, and merges the results into a single ranked
//! dashboard. A failing property degrades to a zero-valued entry; a failing
//! discovery degrades to an empty property list for that connection only.

use std::cmp::Ordering;

use chrono::NaiveDate;
use futures::future::join_all;

use crate::core::models::{DashboardData, Metric, Property, WebsiteStat};
use crate::core::window::TrailingWindow;
use crate::providers::analytics::AnalyticsClient;
use crate::storage::connections::AnalyticsConnection;

/// Load the aggregated dashboard for all connections.
///
/// Totals are computed only after every fetch has resolved. Per-property and
/// per-connection failures are logged and degraded, never propagated.
pub async fn load_dashboard(
    client: &AnalyticsClient,
    connections: &[AnalyticsConnection],
    today: NaiveDate,
) -> DashboardData {
    let window = TrailingWindow::ending_at(today);

    // Discover each connection's properties concurrently.
    let discoveries = join_all(
        connections
            .iter()
            .map(|conn| client.list_properties(&conn.access_token)),
    )
    .await;

    // Flatten to (token, property) pairs: selected ids that discovery confirmed.
    let mut pairs: Vec<(&str, Property)> = Vec::new();
    for (conn, discovered) in connections.iter().zip(discoveries) {
        let discovered = match discovered {
            Ok(properties) => properties,
            Err(e) => {
                tracing::warn!(account = %conn.account_email, error = %e, "property discovery failed");
                Vec::new()
            }
        };
        for id in &conn.property_ids {
            if let Some(property) = discovered.iter().find(|p| &p.id == id) {
                pairs.push((conn.access_token.as_str(), property.clone()));
            }
        }
    }

    let reports = join_all(
        pairs
            .iter()
            .map(|(token, property)| client.run_daily_report(token, &property.id, &window)),
    )
    .await;

    let mut sites: Vec<WebsiteStat> = pairs
        .into_iter()
        .zip(reports)
        .map(|((_, property), report)| {
            let report = report.unwrap_or_else(|e| {
                tracing::warn!(property = %property.id, error = %e, "report fetch failed");
                crate::core::models::PropertyReport::zeroed()
            });
            WebsiteStat {
                name: property.name,
                domain: property.domain,
                visitors: report.total_visitors,
                revenue: (report.total_revenue != 0.0).then_some(report.total_revenue),
                data: report.daily,
            }
        })
        .collect();

    rank_sites(&mut sites);

    let total_visitors = sites.iter().map(|s| s.visitors).sum();
    let total_revenue = sites.iter().filter_map(|s| s.revenue).sum();

    DashboardData {
        sites,
        total_visitors,
        total_revenue,
    }
}

/// Rank dashboard entries with the preserved comparator.
///
/// The comparator is not a total order (revenue wins only when both sides
/// carry it), and `slice::sort_by` panics on comparators that violate
/// transitivity. A stable insertion sort accepts any pairwise comparator,
/// so mixed revenue/non-revenue sets never crash the dashboard.
pub fn rank_sites(sites: &mut [WebsiteStat]) {
    for i in 1..sites.len() {
        let mut j = i;
        while j > 0 && compare_stats(&sites[j - 1], &sites[j]) == Ordering::Greater {
            sites.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Ranking comparator for dashboard entries.
///
/// When both entries carry nonzero revenue and the revenues differ, higher
/// revenue wins. In every other case, including one-sided revenue, higher
/// visitor count wins. The asymmetry is intentional.
#[must_use]
pub fn compare_stats(a: &WebsiteStat, b: &WebsiteStat) -> Ordering {
    if let (Some(a_rev), Some(b_rev)) = (a.revenue, b.revenue) {
        if a_rev != b_rev {
            return b_rev.partial_cmp(&a_rev).unwrap_or(Ordering::Equal);
        }
    }
    b.visitors.cmp(&a.visitors)
}

/// Shared Y-axis ceiling for the chart: the largest single-bucket value of
/// the selected metric across every site. Zero when there is nothing to plot.
#[must_use]
pub fn chart_ceiling(sites: &[WebsiteStat], metric: Metric) -> f64 {
    sites
        .iter()
        .flat_map(|site| site.data.iter())
        .map(|point| metric.of(point))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DailyPoint;
    use chrono::NaiveDate;

    fn stat(name: &str, visitors: u64, revenue: f64) -> WebsiteStat {
        WebsiteStat {
            name: name.to_string(),
            domain: format!("{name}.example.com"),
            visitors,
            revenue: (revenue != 0.0).then_some(revenue),
            data: Vec::new(),
        }
    }

    fn point(visitors: u64, revenue: f64) -> DailyPoint {
        DailyPoint {
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            label: "Today".to_string(),
            visitors,
            revenue,
        }
    }

    #[test]
    fn revenue_ranks_only_when_both_sides_have_it() {
        // A has more visitors but no revenue; B and C both have revenue.
        let mut sites = vec![
            stat("a", 100, 0.0),
            stat("b", 50, 200.0),
            stat("c", 200, 500.0),
        ];
        rank_sites(&mut sites);

        // C beats B on revenue. A vs B falls through to visitors because A
        // has no revenue, so A (100 visitors) beats B (50 visitors).
        let order: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn equal_revenue_falls_back_to_visitors() {
        let mut sites = vec![stat("low", 10, 75.0), stat("high", 90, 75.0)];
        rank_sites(&mut sites);
        assert_eq!(sites[0].name, "high");
    }

    #[test]
    fn no_revenue_anywhere_ranks_by_visitors() {
        let mut sites = vec![stat("b", 5, 0.0), stat("a", 500, 0.0), stat("c", 50, 0.0)];
        rank_sites(&mut sites);
        let order: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn ranking_survives_cyclic_comparisons() {
        // These three form a cycle under the comparator: high-revenue beats
        // mid-revenue on revenue, mid-revenue beats no-revenue on visitors,
        // and no-revenue beats high-revenue on visitors.
        let mut sites = Vec::new();
        for i in 0u64..100 {
            let jitter = i % 7;
            sites.push(stat(&format!("rev-high-{i}"), 10 + jitter, 500.0));
            sites.push(stat(&format!("rev-mid-{i}"), 50 + jitter, 100.0));
            sites.push(stat(&format!("no-rev-{i}"), 30 + jitter, 0.0));
        }
        let total_before: u64 = sites.iter().map(|s| s.visitors).sum();

        rank_sites(&mut sites);

        assert_eq!(sites.len(), 300);
        let total_after: u64 = sites.iter().map(|s| s.visitors).sum();
        assert_eq!(total_before, total_after);
    }

    #[test]
    fn ceiling_is_max_bucket_value_for_active_metric() {
        let mut a = stat("a", 0, 0.0);
        a.data = vec![point(10, 1.5), point(40, 2.0)];
        let mut b = stat("b", 0, 0.0);
        b.data = vec![point(25, 99.25)];

        assert_eq!(chart_ceiling(&[a.clone(), b.clone()], Metric::Visitors), 40.0);
        assert_eq!(chart_ceiling(&[a, b], Metric::Revenue), 99.25);
    }

    #[test]
    fn ceiling_of_empty_dashboard_is_zero() {
        assert_eq!(chart_ceiling(&[], Metric::Visitors), 0.0);
        assert_eq!(chart_ceiling(&[stat("a", 3, 0.0)], Metric::Revenue), 0.0);
    }
}
