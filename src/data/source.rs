//! Where income series come from.
//!
//! The pipeline only sees the `IncomeSource` trait, so the built-in reference
//! data and CSV files are interchangeable (and tests can plug in their own).

use std::path::PathBuf;

use crate::data::sample::reference_series;
use crate::domain::{AnalysisConfig, Selection};
use crate::error::AppError;
use crate::io::ingest::{IngestQuery, load_income_series};

/// An ordered series plus a short note on where it came from.
#[derive(Debug, Clone)]
pub struct SourcedSeries {
    /// One value per equal-width bucket, poorest first.
    pub income: Vec<f64>,
    pub provenance: String,
    /// Rows skipped while reading the source (always 0 for built-in data).
    pub skipped_rows: usize,
}

/// Resolves a selection into an income series.
pub trait IncomeSource {
    fn income_series(&self, selection: &Selection) -> Result<SourcedSeries, AppError>;

    /// Short description for status lines and logs.
    fn describe(&self) -> String;
}

/// The reference series compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl IncomeSource for BuiltinSource {
    fn income_series(&self, selection: &Selection) -> Result<SourcedSeries, AppError> {
        let series = reference_series(selection).ok_or_else(|| {
            AppError::new(
                3,
                format!(
                    "No data available for {} in the built-in reference data. Provide a CSV with --csv.",
                    selection.describe()
                ),
            )
        })?;
        Ok(SourcedSeries {
            income: series.income.to_vec(),
            provenance: "built-in reference data".to_string(),
            skipped_rows: 0,
        })
    }

    fn describe(&self) -> String {
        "built-in".to_string()
    }
}

/// A WID-style CSV file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub path: PathBuf,
    pub buckets: usize,
    pub income_variable: String,
    pub wealth_variable: String,
}

impl CsvSource {
    pub fn from_config(path: PathBuf, config: &AnalysisConfig) -> Self {
        Self {
            path,
            buckets: config.buckets,
            income_variable: config.income_variable.clone(),
            wealth_variable: config.wealth_variable.clone(),
        }
    }

    fn variable_for(&self, selection: &Selection) -> &str {
        match selection.kind {
            crate::domain::MeasureKind::Income => &self.income_variable,
            crate::domain::MeasureKind::Wealth => &self.wealth_variable,
        }
    }
}

impl IncomeSource for CsvSource {
    fn income_series(&self, selection: &Selection) -> Result<SourcedSeries, AppError> {
        let query = IngestQuery {
            country_code: selection.country.code(),
            year: selection.year,
            variable: self.variable_for(selection),
            buckets: self.buckets,
        };
        let ingested = load_income_series(&self.path, &query)?;
        Ok(SourcedSeries {
            income: ingested.income,
            provenance: format!("{} ({})", self.path.display(), query.variable),
            skipped_rows: ingested.row_errors.len(),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the source named by the configuration.
pub fn source_for(config: &AnalysisConfig) -> Box<dyn IncomeSource> {
    match &config.csv_path {
        Some(path) => Box::new(CsvSource::from_config(path.clone(), config)),
        None => Box::new(BuiltinSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, MeasureKind};

    fn selection(country: Country, year: i32, kind: MeasureKind) -> Selection {
        Selection { country, year, kind }
    }

    #[test]
    fn builtin_has_philippines_income() {
        let out = BuiltinSource
            .income_series(&selection(Country::Philippines, 2018, MeasureKind::Income))
            .unwrap();
        assert_eq!(out.income[0], 2640.00233);
        assert_eq!(out.skipped_rows, 0);
    }

    #[test]
    fn builtin_reports_no_data() {
        let err = BuiltinSource
            .income_series(&selection(Country::Thailand, 2000, MeasureKind::Income))
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("Thailand 2000 income"));
    }

    #[test]
    fn csv_source_uses_kind_variable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wid.csv");
        std::fs::write(
            &path,
            "country;variable;percentile;year;value\n\
             MY;ahweal992j;p0p50;2015;100\n\
             MY;ahweal992j;p50p100;2015;900\n\
             MY;aptinc992j;p0p50;2015;1\n\
             MY;aptinc992j;p50p100;2015;2\n",
        )
        .unwrap();

        let config = AnalysisConfig {
            buckets: 2,
            ..AnalysisConfig::default()
        };
        let source = CsvSource::from_config(path, &config);
        let out = source
            .income_series(&selection(Country::Malaysia, 2015, MeasureKind::Wealth))
            .unwrap();
        assert_eq!(out.income, vec![100.0, 900.0]);
        assert!(out.provenance.contains("ahweal992j"));
    }

    #[test]
    fn source_for_follows_csv_path() {
        let config = AnalysisConfig::default();
        assert_eq!(source_for(&config).describe(), "built-in");

        let config = AnalysisConfig {
            csv_path: Some(PathBuf::from("data.csv")),
            ..AnalysisConfig::default()
        };
        assert_eq!(source_for(&config).describe(), "data.csv");
    }
}
