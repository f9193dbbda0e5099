//! Command-line parsing for the inequality report tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the measurement code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    Country, DEFAULT_BUCKETS, DEFAULT_INCOME_VARIABLE, DEFAULT_WEALTH_VARIABLE, MeasureKind, SUPPORTED_YEARS,
};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ineq",
    version,
    about = "Income and wealth inequality metrics from percentile data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Write logs to this file instead of stderr (the TUI logs only when set).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute and print the inequality report for one selection.
    Report(ReportArgs),
    /// Choose country, year and measurement kind interactively, then report.
    Pick(ReportArgs),
    /// Print the report for a previously exported dataset JSON.
    Show(ShowArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `ineq report`, but renders results
    /// (including the Lorenz curve) in a terminal UI using Ratatui.
    Tui(ReportArgs),
}

/// Options shared by `report`, `pick` and `tui`.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// WID-style CSV file (defaults to $INEQ_DATA_CSV, else built-in reference data).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Country (ISO-2 code or name).
    #[arg(short = 'c', long, value_enum, ignore_case = true, default_value_t = Country::Philippines)]
    pub country: Country,

    /// Year of the observation.
    #[arg(short = 'y', long, default_value_t = SUPPORTED_YEARS[0])]
    pub year: i32,

    /// Measure income or wealth.
    #[arg(short = 'k', long, value_enum, ignore_case = true, default_value_t = MeasureKind::Income)]
    pub kind: MeasureKind,

    /// Number of equal-width buckets to reconstruct from the CSV.
    #[arg(short = 'b', long, default_value_t = DEFAULT_BUCKETS)]
    pub buckets: usize,

    /// CSV variable code used for income.
    #[arg(long, default_value = DEFAULT_INCOME_VARIABLE)]
    pub income_variable: String,

    /// CSV variable code used for wealth.
    #[arg(long, default_value = DEFAULT_WEALTH_VARIABLE)]
    pub wealth_variable: String,

    /// Hide the per-percentile share breakdown.
    #[arg(long)]
    pub no_shares: bool,

    /// Render an ASCII bar chart of the shares.
    #[arg(long)]
    pub plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Export the share table to CSV (spreadsheet friendly).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the dataset (series + metrics) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for printing a saved dataset.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Dataset JSON file produced by `ineq report --export-json`.
    #[arg(long, value_name = "JSON")]
    pub dataset: PathBuf,

    /// Hide the per-percentile share breakdown.
    #[arg(long)]
    pub no_shares: bool,

    /// Render an ASCII bar chart of the shares.
    #[arg(long)]
    pub plot: bool,

    /// Bar chart width (columns).
    #[arg(long, default_value_t = 50)]
    pub width: usize,
}
