//! CLI argument definitions for fredrate.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | List the FRED series used for tax-rate analysis |
//! | `fetch` | Fetch one series of observations |
//! | `analyze` | Run the full effective tax rate analysis |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--api-key` | `$FRED_API_KEY` | FRED API credential |
//! | `--format` | `table` | Output format for fetched data |
//! | `--timeout-ms` | `10000` | Per-request timeout in ms |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Effective corporate tax rate analysis backed by FRED data.
///
/// Fetches tax receipt and corporate profit series, aligns them by date,
/// and reports the effective tax rate with statistics, a chart, and CSV
/// exports.
#[derive(Debug, Parser)]
#[command(
    name = "fredrate",
    author,
    version,
    about = "Effective corporate tax rates from FRED data"
)]
pub struct Cli {
    /// FRED API key. Falls back to the FRED_API_KEY environment variable.
    ///
    /// No network call is made without a key; `fredrate series` works
    /// offline.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format for fetched observations.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Per-request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📋 List the FRED series used for corporate tax analysis.
    ///
    /// Prints the series catalog and usage guidance. Needs no API key.
    Series,

    /// 📊 Fetch one series of observations.
    ///
    /// # Examples
    ///
    ///   fredrate fetch FCTAX
    ///   fredrate fetch B075RC1Q027SBEA --start 1950-01-01 --format json
    Fetch(FetchArgs),

    /// 📈 Run the full effective tax rate analysis.
    ///
    /// Fetches quarterly tax receipts and corporate profits, derives the
    /// quarterly and annual effective rates, and prints summary statistics.
    ///
    /// # Examples
    ///
    ///   fredrate analyze
    ///   fredrate analyze --start 1950-01-01 --chart rates.svg
    ///   fredrate analyze --export-prefix corporate_tax_data
    Analyze(AnalyzeArgs),
}

/// Arguments for the `fetch` command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// FRED series identifier (e.g. FCTAX, B075RC1Q027SBEA).
    pub series_id: String,

    /// Earliest observation date, YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<String>,

    /// Latest observation date, YYYY-MM-DD.
    #[arg(long)]
    pub end: Option<String>,
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Earliest observation date for all fetched series, YYYY-MM-DD.
    #[arg(long, default_value = "1950-01-01")]
    pub start: String,

    /// Latest observation date, YYYY-MM-DD.
    #[arg(long)]
    pub end: Option<String>,

    /// Write the two-panel rate chart (SVG) to this path.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Export every series to `{prefix}_{name}.csv`.
    #[arg(long)]
    pub export_prefix: Option<String>,

    /// Directory for CSV exports.
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// First year of the earliest decade bucket in the summary.
    #[arg(long, default_value_t = fredrate_core::DEFAULT_DECADE_BASE_YEAR)]
    pub decade_base_year: i32,
}
