//! Shared analysis pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! selection check -> income source -> dataset (all five statistics)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::{IncomeSource, source_for};
use crate::domain::{AnalysisConfig, SUPPORTED_YEARS, Selection};
use crate::error::AppError;
use crate::metrics::DataSet;

/// All computed outputs of a single analysis.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub selection: Selection,
    pub dataset: DataSet,
    /// Where the series came from (file + variable, or built-in).
    pub provenance: String,
    pub skipped_rows: usize,
}

/// Run the analysis using the source named by `config`.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let source = source_for(config);
    tracing::info!(
        source = %source.describe(),
        selection = %config.selection.describe(),
        variable = config.variable_code(),
        "running analysis"
    );
    run_with_source(source.as_ref(), &config.selection)
}

/// Run the analysis against an explicit source.
pub fn run_with_source(source: &dyn IncomeSource, selection: &Selection) -> Result<RunOutput, AppError> {
    validate_selection(selection)?;

    let series = source.income_series(selection)?;
    let dataset = DataSet::build(selection.country.display_name(), selection.year, series.income)
        .map_err(|e| AppError::new(3, format!("No usable data for {}: {e}", selection.describe())))?;

    Ok(RunOutput {
        selection: *selection,
        dataset,
        provenance: series.provenance,
        skipped_rows: series.skipped_rows,
    })
}

/// Reject years outside the supported set.
pub fn validate_selection(selection: &Selection) -> Result<(), AppError> {
    if !SUPPORTED_YEARS.contains(&selection.year) {
        let years: Vec<String> = SUPPORTED_YEARS.iter().map(|y| y.to_string()).collect();
        return Err(AppError::new(
            2,
            format!(
                "Unsupported year {}. Choose one of: {}.",
                selection.year,
                years.join(", ")
            ),
        ));
    }
    Ok(())
}
