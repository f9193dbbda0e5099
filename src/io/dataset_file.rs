//! Read/write dataset JSON files.
//!
//! The JSON file is the portable form of an analysed distribution: metadata,
//! the bucket series and the statistics computed from it. On read the
//! statistics are recomputed from the stored series, so a hand-edited file can
//! never carry metrics that disagree with its values.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::MeasureKind;
use crate::error::AppError;
use crate::metrics::{DataSet, InequalityMetrics};

/// On-disk schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSetFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub label: String,
    pub period: i32,
    pub kind: MeasureKind,
    pub income: Vec<f64>,
    pub metrics: InequalityMetrics,
}

impl DataSetFile {
    pub fn from_dataset(dataset: &DataSet, kind: MeasureKind) -> Self {
        Self {
            tool: "ineq".to_string(),
            generated_at: Utc::now(),
            label: dataset.label().to_string(),
            period: dataset.period(),
            kind,
            income: dataset.income().to_vec(),
            metrics: *dataset.metrics(),
        }
    }
}

/// Write a dataset JSON file.
pub fn write_dataset_json(path: &Path, dataset: &DataSet, kind: MeasureKind) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create dataset JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &DataSetFile::from_dataset(dataset, kind))
        .map_err(|e| AppError::new(4, format!("Failed to write dataset JSON: {e}")))?;

    tracing::info!(path = %path.display(), label = dataset.label(), "exported dataset JSON");
    Ok(())
}

/// Read a dataset JSON file and rebuild the dataset from its series.
pub fn read_dataset_json(path: &Path) -> Result<(DataSet, MeasureKind), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open dataset JSON '{}': {e}", path.display())))?;
    let stored: DataSetFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid dataset JSON: {e}")))?;

    let dataset = DataSet::build(stored.label, stored.period, stored.income)?;
    if !metrics_agree(dataset.metrics(), &stored.metrics) {
        tracing::warn!(
            path = %path.display(),
            "stored metrics differ from recomputed values; using recomputed"
        );
    }
    Ok((dataset, stored.kind))
}

fn metrics_agree(a: &InequalityMetrics, b: &InequalityMetrics) -> bool {
    let close = |x: f64, y: f64| (x - y).abs() <= 1e-9 * x.abs().max(1.0);
    close(a.log_variance, b.log_variance)
        && close(a.mean_deviation, b.mean_deviation)
        && close(a.gini, b.gini)
        && close(a.theil_t, b.theil_t)
        && close(a.theil_l, b.theil_l)
}
