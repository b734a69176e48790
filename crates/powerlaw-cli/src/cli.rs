//! CLI argument definitions for powerlaw.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fit` | Fit the power law and print its parameters |
//! | `project` | Fit and print the projected trend |
//! | `chart` | Render linear, log-y and log-log charts to SVG |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--source-url` | bitcoinity export | CSV export URL (`POWERLAW_SOURCE_URL` overrides the default) |
//! | `--input` | none | Read a local CSV export instead of fetching |
//! | `--timeout-ms` | `30000` | Fetch timeout in ms |
//! | `--projection-years` | `5` | Projection horizon in years |
//! | `--cutover-index` | `560` | Row where prices move from column A to column B |
//! | `--epoch` | `2009-01-03` | Reference date for day counts |
//! | `--format` | `table` | Output format (table, json) |
//!
//! # Examples
//!
//! ```bash
//! powerlaw fit
//! powerlaw project --every 365 --format json --pretty
//! powerlaw chart --output btc.svg --projection-years 10
//! powerlaw fit --input export.csv
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::Date;

/// Power-law trend analysis for a daily price series.
#[derive(Debug, Parser)]
#[command(
    name = "powerlaw",
    author,
    version,
    about = "Fit and project a power-law trend through a daily price series",
    long_about = "powerlaw downloads a daily price export, merges its two historical price \
columns, fits price = a * days^b by least squares in log-log space, and projects the \
trend forward.\n\
\n\
Use 'powerlaw <command> --help' for command-specific help."
)]
pub struct Cli {
    /// CSV export URL.
    #[arg(long, global = true)]
    pub source_url: Option<String>,

    /// Read a local CSV export instead of fetching over HTTP.
    #[arg(long, global = true, conflicts_with = "source_url")]
    pub input: Option<PathBuf>,

    /// Fetch timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Projection horizon in years (365 days each).
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_PROJECTION_YEARS, allow_negative_numbers = true)]
    pub projection_years: i64,

    /// Row index at which prices switch from column A to column B.
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_CUTOVER_INDEX)]
    pub cutover_index: usize,

    /// Reference date (YYYY-MM-DD) for day counts.
    #[arg(long, global = true, value_parser = powerlaw_core::parse_date, default_value_t = powerlaw_core::DEFAULT_EPOCH)]
    pub epoch: Date,

    /// Zero-based position of the timestamp column.
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_LAYOUT.timestamp)]
    pub timestamp_column: usize,

    /// Zero-based position of the price column used before the cutover.
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_LAYOUT.column_a)]
    pub column_a: usize,

    /// Zero-based position of the price column used from the cutover on.
    #[arg(long, global = true, default_value_t = powerlaw_core::DEFAULT_LAYOUT.column_b)]
    pub column_b: usize,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log debug details to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the power law and print slope, intercept and r².
    ///
    /// # Examples
    ///
    ///   powerlaw fit
    ///   powerlaw fit --format json --pretty
    Fit,

    /// Fit the power law and print the projected trend.
    ///
    /// # Examples
    ///
    ///   powerlaw project
    ///   powerlaw project --every 30 --projection-years 10
    Project(ProjectArgs),

    /// Render linear, log-y and log-log charts of data and fit to SVG.
    ///
    /// # Examples
    ///
    ///   powerlaw chart --output powerlaw.svg
    Chart(ChartArgs),
}

/// Arguments for the `project` command.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Print every Nth projection point.
    #[arg(long, default_value_t = 365, value_parser = clap::value_parser!(u64).range(1..))]
    pub every: u64,
}

/// Arguments for the `chart` command.
#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Destination SVG file.
    #[arg(long, short, default_value = "powerlaw.svg")]
    pub output: PathBuf,

    /// Chart width in pixels.
    #[arg(long, default_value_t = 1500)]
    pub width: u32,

    /// Chart height in pixels.
    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Series name used in chart titles.
    #[arg(long, default_value = "Bitcoin")]
    pub asset: String,
}
