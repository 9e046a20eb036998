//! Human-readable output using rich_rust.
//!
//! Renders the dashboard as one styled panel per site with a 7-day sparkline,
//! plus a greeting line carrying the grand totals.

use crate::core::aggregate::chart_ceiling;
use crate::core::models::{DashboardData, Metric, WebsiteStat};
use crate::error::Result;
use crate::storage::connections::{AnalyticsConnection, StripeConnection};
use crate::util::format::{format_count, format_money};
use rich_rust::prelude::*;
use rich_rust::{Color, ColorSystem, Segment, Style};

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Convert segments to a styled string with ANSI codes.
fn segments_to_string(segments: &[Segment], no_color: bool) -> String {
    let color_system = ColorSystem::TrueColor;

    segments
        .iter()
        .map(|seg| {
            if no_color || seg.style.is_none() {
                seg.text.to_string()
            } else {
                seg.style.as_ref().unwrap().render(&seg.text, color_system)
            }
        })
        .collect()
}

/// Render the aggregated dashboard for human consumption.
pub fn render_dashboard(data: &DashboardData, metric: Metric, no_color: bool) -> Result<String> {
    let mut output = String::new();

    output.push_str(&greeting_line(data, no_color));
    output.push('\n');

    if data.sites.is_empty() {
        output.push_str("No properties selected. Run `beanc connections list` to get started.\n");
        return Ok(output);
    }

    // All charts share one ceiling so bars are comparable across sites.
    let ceiling = chart_ceiling(&data.sites, metric);
    for site in &data.sites {
        output.push_str(&render_site_panel(site, metric, ceiling, no_color));
        output.push('\n');
    }

    Ok(output)
}

fn greeting_line(data: &DashboardData, no_color: bool) -> String {
    let text = format!(
        "You got {} visitors and {} in sales over the last 7 days.",
        format_count(data.total_visitors),
        format_money(data.total_revenue),
    );
    if no_color {
        text
    } else {
        let style = Style::new().bold();
        let segments = vec![Segment::styled(text, style)];
        segments_to_string(&segments, no_color)
    }
}

fn render_site_panel(site: &WebsiteStat, metric: Metric, ceiling: f64, no_color: bool) -> String {
    let mut content_lines: Vec<Vec<Segment>> = Vec::new();

    if site.data.is_empty() {
        let style = if no_color {
            Style::new()
        } else {
            Style::new().dim()
        };
        content_lines.push(vec![Segment::styled("no data", style)]);
    } else {
        let spark = sparkline(site, metric, ceiling);
        let spark_style = if no_color {
            Style::new()
        } else {
            Style::new().color(Color::parse("green").unwrap())
        };
        content_lines.push(vec![Segment::styled(spark, spark_style)]);

        let first = &site.data[0].label;
        let last = &site.data[site.data.len() - 1].label;
        content_lines.push(vec![Segment::plain(format!("{first} .. {last}"))]);
    }

    let mut footer = vec![Segment::plain(format!(
        "visitors: {}",
        format_count(site.visitors)
    ))];
    if let Some(revenue) = site.revenue {
        footer.push(Segment::plain(format!("  sales: {}", format_money(revenue))));
    }
    content_lines.push(footer);

    let title_text = if site.domain.is_empty() {
        site.name.clone()
    } else {
        format!("{} ({})", site.domain, site.name)
    };
    let title = if no_color {
        Text::new(&title_text)
    } else {
        let style = Style::new().bold().color(Color::parse("cyan").unwrap());
        Text::styled(&title_text, style)
    };

    let mut panel = Panel::new(content_lines).title(title).padding((0, 1));
    if !no_color {
        panel = panel.border_style(Style::new().color(Color::parse("blue").unwrap()));
    }

    let segments = panel.render(60);
    segments_to_string(&segments, no_color)
}

/// Scale each bucket against the shared ceiling and map to block characters.
fn sparkline(site: &WebsiteStat, metric: Metric, ceiling: f64) -> String {
    site.data
        .iter()
        .map(|point| {
            let value = metric.of(point);
            if ceiling <= 0.0 || value <= 0.0 {
                SPARK_CHARS[0]
            } else {
                let scaled = (value / ceiling * 7.0).round() as usize;
                SPARK_CHARS[scaled.min(7)]
            }
        })
        .collect()
}

/// Render the connections listing for human consumption.
pub fn render_connections(
    analytics: &[AnalyticsConnection],
    stripe: &[StripeConnection],
    no_color: bool,
) -> Result<String> {
    let mut output = String::new();

    if analytics.is_empty() && stripe.is_empty() {
        output.push_str("No connections. Run `beanc connect google` or `beanc connect stripe`.\n");
        return Ok(output);
    }

    for conn in analytics {
        let mut content_lines: Vec<Vec<Segment>> = Vec::new();
        if conn.available_properties.is_empty() {
            content_lines.push(vec![Segment::plain("no properties discovered")]);
        }
        for property in &conn.available_properties {
            let marker = if conn.property_ids.contains(&property.id) {
                "[x]"
            } else {
                "[ ]"
            };
            content_lines.push(vec![Segment::plain(format!(
                "{marker} {} {}",
                property.id, property.name
            ))]);
        }

        let title_text = format!("Google Analytics: {}", conn.account_email);
        let title = if no_color {
            Text::new(&title_text)
        } else {
            let style = Style::new().bold().color(Color::parse("cyan").unwrap());
            Text::styled(&title_text, style)
        };
        let panel = Panel::new(content_lines).title(title).padding((0, 1));
        output.push_str(&segments_to_string(&panel.render(60), no_color));
        output.push('\n');
    }

    for conn in stripe {
        let mode = if conn.livemode { "live" } else { "test" };
        let content_lines = vec![vec![Segment::plain(format!(
            "{} ({mode} mode)",
            conn.account_id
        ))]];

        let title_text = format!("Stripe: {}", conn.account_name);
        let title = if no_color {
            Text::new(&title_text)
        } else {
            let style = Style::new().bold().color(Color::parse("magenta").unwrap());
            Text::styled(&title_text, style)
        };
        let panel = Panel::new(content_lines).title(title).padding((0, 1));
        output.push_str(&segments_to_string(&panel.render(60), no_color));
        output.push('\n');
    }

    Ok(output)
}
