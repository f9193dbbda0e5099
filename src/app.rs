//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and `.env` defaults
//! - sets up logging
//! - resolves the selection (flags or interactive prompt)
//! - runs the analysis pipeline
//! - prints reports/plots
//! - writes optional exports

use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Command, ReportArgs, ShowArgs};
use crate::domain::{AnalysisConfig, MeasureKind, Selection};
use crate::error::AppError;
use crate::logging::{LogTarget, init_logging};
use crate::metrics::DataSet;

pub mod pipeline;

/// Environment variable naming the default CSV data file.
pub const DATA_CSV_ENV: &str = "INEQ_DATA_CSV";

/// Entry point for the `ineq` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ineq` and `ineq -c TH` to behave like `ineq tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // `.env` only fills in variables that are not already set.
    dotenvy::dotenv().ok();

    let target = match (&cli.command, &cli.log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Command::Tui(_), None) => LogTarget::Off,
        (_, None) => LogTarget::Stderr,
    };
    init_logging(target, &cli.log_level)?;

    match cli.command {
        Command::Report(args) => handle_report(args, false),
        Command::Pick(args) => handle_report(args, true),
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_report(args: ReportArgs, interactive: bool) -> Result<(), AppError> {
    let mut config = config_from_args(&args, default_csv_from_env())?;

    if interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        if config.csv_path.is_none() {
            let files = crate::cli::picker::discover_csv_files();
            config.csv_path = crate::cli::picker::prompt_data_file(&files, &mut input, &mut output)?;
        }
        config.selection = crate::cli::picker::prompt_selection(config.selection, &mut input, &mut output)?;
        println!();
    }

    let run = pipeline::run_analysis(&config)?;

    println!("=== ineq - Inequality Report ===");
    println!("Source: {}", run.provenance);
    if run.skipped_rows > 0 {
        println!("Skipped rows: {}", run.skipped_rows);
    }
    present(&run.dataset, config.selection.kind, config.show_shares, config.plot, config.plot_width);

    // Optional exports.
    if let Some(path) = &config.export_shares {
        crate::io::export::write_shares_csv(path, &run.dataset, config.selection.kind)?;
        println!("Wrote share table: {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::dataset_file::write_dataset_json(path, &run.dataset, config.selection.kind)?;
        println!("Wrote dataset JSON: {}", path.display());
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let (dataset, kind) = crate::io::dataset_file::read_dataset_json(&args.dataset)?;
    present(&dataset, kind, !args.no_shares, args.plot, args.width);
    Ok(())
}

fn handle_tui(args: ReportArgs) -> Result<(), AppError> {
    let config = config_from_args(&args, default_csv_from_env())?;
    crate::tui::run(config)
}

fn present(dataset: &DataSet, kind: MeasureKind, show_shares: bool, plot: bool, width: usize) {
    println!("{}", crate::report::format_report(dataset, kind, show_shares));
    if plot {
        println!("{}", crate::plot::render_share_bars(dataset, width));
    }
}

/// CSV path named by `INEQ_DATA_CSV`, if set and non-empty.
fn default_csv_from_env() -> Option<PathBuf> {
    std::env::var(DATA_CSV_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Resolve CLI flags into the pipeline configuration.
///
/// `default_csv` is used when `--csv` is absent.
pub fn config_from_args(args: &ReportArgs, default_csv: Option<PathBuf>) -> Result<AnalysisConfig, AppError> {
    let csv_path = match args.csv.clone().or(default_csv) {
        Some(path) => Some(crate::cli::picker::validate_csv_path(&path)?),
        None => None,
    };

    if args.buckets == 0 {
        return Err(AppError::new(2, "--buckets must be > 0."));
    }

    let selection = Selection {
        country: args.country,
        year: args.year,
        kind: args.kind,
    };
    pipeline::validate_selection(&selection)?;

    Ok(AnalysisConfig {
        csv_path,
        selection,
        buckets: args.buckets,
        income_variable: args.income_variable.clone(),
        wealth_variable: args.wealth_variable.clone(),
        show_shares: !args.no_shares,
        plot: args.plot,
        plot_width: args.width,
        export_shares: args.export.clone(),
        export_json: args.export_json.clone(),
    })
}

/// Rewrite argv so `ineq` defaults to `ineq tui`.
///
/// Rules:
/// - `ineq`                      -> `ineq tui`
/// - `ineq -c TH ...`            -> `ineq tui -c TH ...`
/// - `ineq --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "pick" | "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::Country;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrite_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["ineq"])), args(&["ineq", "tui"]));
        assert_eq!(
            rewrite_args(args(&["ineq", "-c", "TH"])),
            args(&["ineq", "tui", "-c", "TH"])
        );
        assert_eq!(rewrite_args(args(&["ineq", "--help"])), args(&["ineq", "--help"]));
        assert_eq!(
            rewrite_args(args(&["ineq", "report", "-y", "2015"])),
            args(&["ineq", "report", "-y", "2015"])
        );
    }

    fn report_args(v: &[&str]) -> ReportArgs {
        match Cli::parse_from(v).command {
            Command::Report(a) => a,
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn config_from_flags() {
        let a = report_args(&["ineq", "report", "-c", "MY", "-y", "2018", "--no-shares", "--plot"]);
        let config = config_from_args(&a, None).unwrap();
        assert_eq!(config.selection.country, Country::Malaysia);
        assert_eq!(config.selection.year, 2018);
        assert!(!config.show_shares);
        assert!(config.plot);
    }

    #[test]
    fn config_rejects_bad_year_and_buckets() {
        let a = report_args(&["ineq", "report", "-y", "2001"]);
        assert_eq!(config_from_args(&a, None).unwrap_err().exit_code(), 2);

        let a = report_args(&["ineq", "report", "-b", "0"]);
        assert_eq!(config_from_args(&a, None).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn config_uses_default_csv_unless_flag_given() {
        let dir = tempfile::tempdir().unwrap();
        let from_env = dir.path().join("env.csv");
        let from_flag = dir.path().join("flag.csv");
        std::fs::write(&from_env, "country;variable;percentile;year;value\n").unwrap();
        std::fs::write(&from_flag, "country;variable;percentile;year;value\n").unwrap();

        let a = report_args(&["ineq", "report"]);
        let config = config_from_args(&a, Some(from_env.clone())).unwrap();
        assert_eq!(config.csv_path, Some(from_env.clone()));

        let flag = from_flag.to_string_lossy().to_string();
        let a = report_args(&["ineq", "report", "--csv", flag.as_str()]);
        let config = config_from_args(&a, Some(from_env)).unwrap();
        assert_eq!(config.csv_path, Some(from_flag));

        let a = report_args(&["ineq", "report"]);
        assert_eq!(config_from_args(&a, None).unwrap().csv_path, None);
    }

    #[test]
    fn config_rejects_missing_csv() {
        let a = report_args(&["ineq", "report", "--csv", "definitely/not/here.csv"]);
        assert_eq!(config_from_args(&a, None).unwrap_err().exit_code(), 2);
    }
}
