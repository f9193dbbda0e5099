//! A labelled income series together with its inequality statistics.

use serde::Serialize;

use crate::error::MetricsError;
use crate::metrics::characterize::{PopulationSubset, characterize};
use crate::metrics::inequality::InequalityMetrics;

/// An analysed distribution.
///
/// Built in one step by [`DataSet::build`]; there is no way to change the
/// series or the statistics afterwards, so a `DataSet` can be shared freely
/// between threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSet {
    label: String,
    period: i32,
    income: Vec<f64>,
    subsets: Vec<PopulationSubset>,
    metrics: InequalityMetrics,
}

impl DataSet {
    /// Compute all statistics for `income` and bundle them with the metadata.
    ///
    /// Fails as a whole if any statistic cannot be computed.
    pub fn build(label: impl Into<String>, period: i32, income: Vec<f64>) -> Result<Self, MetricsError> {
        let label = label.into();
        let metrics = InequalityMetrics::compute(&income)?;
        let subsets = characterize(&income)?;
        tracing::debug!(
            label = %label,
            period,
            buckets = income.len(),
            gini = metrics.gini,
            "built dataset"
        );
        Ok(Self {
            label,
            period,
            income,
            subsets,
            metrics,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn period(&self) -> i32 {
        self.period
    }

    /// The source series, poorest bucket first.
    pub fn income(&self) -> &[f64] {
        &self.income
    }

    pub fn metrics(&self) -> &InequalityMetrics {
        &self.metrics
    }

    pub fn bucket_count(&self) -> usize {
        self.income.len()
    }

    /// Per-bucket shares of the stored series, index-aligned with `income`.
    pub fn subsets(&self) -> &[PopulationSubset] {
        &self.subsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_keeps_metadata_and_series() {
        let ds = DataSet::build("The Philippines", 2015, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ds.label(), "The Philippines");
        assert_eq!(ds.period(), 2015);
        assert_eq!(ds.income(), &[1.0, 2.0, 3.0]);
        assert_eq!(ds.bucket_count(), 3);
        assert_eq!(ds.metrics(), &InequalityMetrics::compute(&[1.0, 2.0, 3.0]).unwrap());
        assert_eq!(ds.subsets(), characterize(&[1.0, 2.0, 3.0]).unwrap().as_slice());
        assert!((ds.subsets()[2].income_share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn build_fails_without_partial_result() {
        let err = DataSet::build("Nowhere", 2000, vec![]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));

        let err = DataSet::build("Nowhere", 2000, vec![0.0, 0.0]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));

        let err = DataSet::build("Nowhere", 2000, vec![-1e308, 1e308, 1e-300]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));
    }

    #[test]
    fn datasets_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataSet>();
    }
}
