//! beanc - Bean Counter
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use beanc::cli::{Cli, Commands};
use beanc::core::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = cli
        .log_level
        .as_deref()
        .and_then(logging::LogLevel::from_arg)
        .or_else(|| logging::parse_log_level_from_env().map(logging::LogLevel::from_tracing_level))
        .unwrap_or_default();
    let log_format = if cli.json_output {
        logging::LogFormat::Json
    } else {
        logging::parse_log_format_from_env().unwrap_or_default()
    };
    let log_file = logging::parse_log_file_from_env();
    logging::init(log_level, log_format, log_file, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}: {e}", e.category());
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> beanc::Result<()> {
    let format = cli.effective_format();
    let pretty = cli.pretty;
    let no_color = cli.no_color || !beanc::util::env::should_use_color(cli.no_color);

    match cli.command {
        // Default to the dashboard
        None => {
            let args = beanc::cli::args::DashboardArgs::default();
            beanc::cli::dashboard::execute(&args, format, pretty, no_color).await
        }

        Some(Commands::Dashboard(args)) => {
            beanc::cli::dashboard::execute(&args, format, pretty, no_color).await
        }

        Some(Commands::Connections(cmd)) => {
            beanc::cli::connections::execute(&cmd, format, pretty, no_color)
        }

        Some(Commands::Connect(cmd)) => beanc::cli::connect::execute(&cmd).await,
    }
}
