//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::models::Metric;

/// Bean Counter - terminal analytics dashboard.
#[derive(Parser, Debug)]
#[command(name = "beanc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // === Global flags ===
    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the effective output format.
    #[must_use]
    pub const fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

/// Output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable styled output
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the aggregated 7-day dashboard (default command)
    Dashboard(DashboardArgs),

    /// Manage connected accounts
    #[command(subcommand)]
    Connections(ConnectionsCommand),

    /// Connect a provider account via OAuth
    #[command(subcommand)]
    Connect(ConnectCommand),
}

/// Arguments for the `dashboard` command.
#[derive(Parser, Debug, Default)]
pub struct DashboardArgs {
    /// Metric to chart
    #[arg(long, value_enum, default_value = "visitors")]
    pub metric: MetricArg,

    /// Fetch timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Chartable metric.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricArg {
    #[default]
    Visitors,
    Revenue,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Visitors => Self::Visitors,
            MetricArg::Revenue => Self::Revenue,
        }
    }
}

/// Connection management subcommands.
#[derive(Subcommand, Debug)]
pub enum ConnectionsCommand {
    /// List connected accounts and their properties
    List,

    /// Toggle a property in an account's dashboard selection
    Select {
        /// Account email of the analytics connection
        #[arg(long, value_name = "EMAIL")]
        account: String,

        /// Property id to toggle
        #[arg(long, value_name = "ID")]
        property: String,
    },

    /// Remove an analytics connection
    Disconnect {
        /// Account email of the analytics connection
        #[arg(long, value_name = "EMAIL")]
        account: String,
    },

    /// Link a property to a Stripe account for revenue correlation
    LinkStripe {
        /// Property id
        #[arg(long, value_name = "ID")]
        property: String,

        /// Stripe account id
        #[arg(long, value_name = "ACCOUNT")]
        stripe_account: String,
    },
}

/// OAuth connect subcommands.
///
/// Without `--code` the command prints the consent URL. With `--code` (or
/// `--error`, which providers send on denial) it completes the callback.
#[derive(Subcommand, Debug)]
pub enum ConnectCommand {
    /// Connect a Google Analytics account
    Google {
        /// Authorization code from the OAuth redirect
        #[arg(long, value_name = "CODE")]
        code: Option<String>,

        /// Error code from the OAuth redirect
        #[arg(long, value_name = "ERROR")]
        error: Option<String>,
    },

    /// Connect a Stripe account
    Stripe {
        /// Authorization code from the OAuth redirect
        #[arg(long, value_name = "CODE")]
        code: Option<String>,

        /// Error code from the OAuth redirect
        #[arg(long, value_name = "ERROR")]
        error: Option<String>,
    },
}
