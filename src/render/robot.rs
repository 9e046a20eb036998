//! Robot-mode output (JSON and Markdown).
//!
//! Provides stable, machine-friendly output for scripts and agents.

use crate::core::models::DashboardData;
use crate::error::Result;
use crate::storage::connections::{AnalyticsConnection, StripeConnection};
use crate::util::format::format_money;
use serde::Serialize;

/// Envelope around robot-mode payloads.
#[derive(Debug, Clone, Serialize)]
pub struct RobotOutput<T: Serialize> {
    pub kind: &'static str,
    pub data: T,
}

impl<T: Serialize> RobotOutput<T> {
    #[must_use]
    pub const fn new(kind: &'static str, data: T) -> Self {
        Self { kind, data }
    }
}

/// Render any payload as JSON.
pub fn render_json<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

/// Render any payload as pretty JSON.
pub fn render_json_pretty<T: Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Render the dashboard as JSON.
pub fn render_dashboard_json(data: &DashboardData, pretty: bool) -> Result<String> {
    let output = RobotOutput::new("dashboard", data);
    if pretty {
        render_json_pretty(&output)
    } else {
        render_json(&output)
    }
}

/// Render the dashboard as Markdown.
pub fn render_dashboard_md(data: &DashboardData) -> Result<String> {
    let mut output = String::new();

    output.push_str("## Dashboard (last 7 days)\n\n");
    output.push_str(&format!("- total_visitors: {}\n", data.total_visitors));
    output.push_str(&format!(
        "- total_revenue: {}\n\n",
        format_money(data.total_revenue)
    ));

    if data.sites.is_empty() {
        output.push_str("No properties selected.\n");
        return Ok(output);
    }

    output.push_str("| site | domain | visitors | revenue |\n");
    output.push_str("|------|--------|----------|---------|\n");
    for site in &data.sites {
        let revenue = site
            .revenue
            .map_or_else(|| "-".to_string(), format_money);
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            site.name, site.domain, site.visitors, revenue
        ));
    }

    Ok(output)
}

/// Serializable connections listing.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionsPayload<'a> {
    pub analytics: &'a [AnalyticsConnection],
    pub stripe: &'a [StripeConnection],
}

/// Render the connections listing as JSON.
pub fn render_connections_json(payload: &ConnectionsPayload<'_>, pretty: bool) -> Result<String> {
    let output = RobotOutput::new("connections", payload);
    if pretty {
        render_json_pretty(&output)
    } else {
        render_json(&output)
    }
}

/// Render the connections listing as Markdown.
pub fn render_connections_md(payload: &ConnectionsPayload<'_>) -> Result<String> {
    let mut output = String::new();

    output.push_str("## Connections\n\n");
    for conn in payload.analytics {
        output.push_str(&format!("### Google Analytics: {}\n", conn.account_email));
        for property in &conn.available_properties {
            let marker = if conn.property_ids.contains(&property.id) {
                "x"
            } else {
                " "
            };
            output.push_str(&format!("- [{marker}] {} {}\n", property.id, property.name));
        }
        output.push('\n');
    }
    for conn in payload.stripe {
        let mode = if conn.livemode { "live" } else { "test" };
        output.push_str(&format!(
            "### Stripe: {} ({}, {mode} mode)\n\n",
            conn.account_name, conn.account_id
        ));
    }

    Ok(output)
}
