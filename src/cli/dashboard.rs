//! Dashboard command implementation.

use std::time::Duration;

use crate::cli::args::{DashboardArgs, OutputFormat};
use crate::core::aggregate::load_dashboard;
use crate::core::http;
use crate::core::models::{DashboardData, Metric};
use crate::error::Result;
use crate::providers::analytics::AnalyticsClient;
use crate::render::{human, robot};
use crate::storage::connections::ConnectionStore;
use crate::storage::paths::AppPaths;

/// Execute the dashboard command.
pub async fn execute(
    args: &DashboardArgs,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<()> {
    let paths = AppPaths::resolve()?;
    let store = ConnectionStore::load(&paths.connections_file())?;

    let timeout = args
        .timeout
        .map_or(http::DEFAULT_TIMEOUT, Duration::from_secs);
    let client = AnalyticsClient::new(http::build_client(timeout)?);

    let today = chrono::Local::now().date_naive();
    tracing::debug!(connections = store.analytics().len(), %today, "loading dashboard");

    let data = load_dashboard(&client, store.analytics(), today).await;

    render_dashboard(&data, args.metric.into(), format, pretty, no_color)
}

pub(crate) fn render_dashboard(
    data: &DashboardData,
    metric: Metric,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let output = human::render_dashboard(data, metric, no_color)?;
            println!("{output}");
        }
        OutputFormat::Json => {
            let output = robot::render_dashboard_json(data, pretty)?;
            println!("{output}");
        }
        OutputFormat::Md => {
            let output = robot::render_dashboard_md(data)?;
            println!("{output}");
        }
    }

    Ok(())
}
