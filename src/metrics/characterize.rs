//! Per-bucket population characteristics.
//!
//! For a series of `N` equal-width buckets ordered from poorest to richest:
//!
//! - `population_share = 1/N`
//! - `income_share = income[i] / Σ income`
//! - `cumulative_population_share = (i + 1)/N`
//!
//! No sorting happens here. Unsorted input yields shares that are internally
//! consistent but make the Gini coefficient meaningless.

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// Shares describing one percentile bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationSubset {
    /// Fraction of the population in this bucket.
    pub population_share: f64,
    /// Fraction of total income held by this bucket.
    pub income_share: f64,
    /// Fraction of the population in this bucket and every poorer one.
    pub cumulative_population_share: f64,
}

/// Compute one `PopulationSubset` per bucket, index-aligned with `income`.
pub fn characterize(income: &[f64]) -> Result<Vec<PopulationSubset>, MetricsError> {
    let total = checked_total(income)?;
    let n = income.len() as f64;
    let population_share = 1.0 / n;

    income
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let income_share = value / total;
            if !income_share.is_finite() {
                return Err(MetricsError::invalid(format!(
                    "income share of bucket {i} is not finite (total {total})"
                )));
            }
            Ok(PopulationSubset {
                population_share,
                income_share,
                cumulative_population_share: (i + 1) as f64 / n,
            })
        })
        .collect()
}

/// Lorenz curve vertices `(cumulative population, cumulative income)`,
/// starting at `(0, 0)` and ending at `(1, 1)`.
pub fn lorenz_curve(subsets: &[PopulationSubset]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(subsets.len() + 1);
    points.push((0.0, 0.0));
    let mut cumulative_income = 0.0;
    for s in subsets {
        cumulative_income += s.income_share;
        points.push((s.cumulative_population_share, cumulative_income));
    }
    points
}

/// Sum of the series, rejecting inputs that would divide by zero or poison the
/// result with NaN/Infinity.
pub(crate) fn checked_total(income: &[f64]) -> Result<f64, MetricsError> {
    if income.is_empty() {
        return Err(MetricsError::invalid("income series is empty"));
    }
    if let Some(idx) = income.iter().position(|v| !v.is_finite()) {
        return Err(MetricsError::invalid(format!(
            "income series has a non-finite value at bucket {idx}"
        )));
    }

    let total: f64 = income.iter().sum();
    if !total.is_finite() {
        return Err(MetricsError::invalid("income series total overflows"));
    }
    if total <= 0.0 {
        return Err(MetricsError::invalid(format!(
            "income series total must be positive (got {total})"
        )));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::LogNormal;

    #[test]
    fn shares_for_quintiles() {
        let subsets = characterize(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(subsets.len(), 4);

        assert!((subsets[0].population_share - 0.25).abs() < 1e-12);
        assert!((subsets[0].income_share - 0.1).abs() < 1e-12);
        assert!((subsets[0].cumulative_population_share - 0.25).abs() < 1e-12);

        assert!((subsets[3].income_share - 0.4).abs() < 1e-12);
        assert!((subsets[3].cumulative_population_share - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shares_sum_to_one_and_cumulative_is_increasing() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = LogNormal::new(8.0, 1.0).unwrap();

        for n in 1..=20 {
            let income: Vec<f64> = (0..n).map(|_| dist.sample(&mut rng)).collect();
            let subsets = characterize(&income).unwrap();

            let pop: f64 = subsets.iter().map(|s| s.population_share).sum();
            let inc: f64 = subsets.iter().map(|s| s.income_share).sum();
            assert!((pop - 1.0).abs() < 1e-9, "population shares sum to {pop} for n={n}");
            assert!((inc - 1.0).abs() < 1e-9, "income shares sum to {inc} for n={n}");

            for pair in subsets.windows(2) {
                assert!(pair[1].cumulative_population_share > pair[0].cumulative_population_share);
            }
            let last = subsets.last().unwrap().cumulative_population_share;
            assert!((last - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_value_bucket_has_zero_share() {
        let subsets = characterize(&[0.0, 10.0, 20.0]).unwrap();
        assert_eq!(subsets[0].income_share, 0.0);
        assert!((subsets[2].income_share - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn lorenz_curve_spans_unit_square() {
        let subsets = characterize(&[1.0, 1.0, 2.0]).unwrap();
        let curve = lorenz_curve(&subsets);
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0], (0.0, 0.0));
        assert!((curve[1].0 - 1.0 / 3.0).abs() < 1e-12);
        assert!((curve[1].1 - 0.25).abs() < 1e-12);
        assert!((curve[2].1 - 0.5).abs() < 1e-12);
        let (x, y) = curve[3];
        assert!((x - 1.0).abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_empty_and_zero_total() {
        assert!(matches!(characterize(&[]), Err(MetricsError::InvalidInput(_))));
        assert!(matches!(characterize(&[0.0, 0.0]), Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = characterize(&[1.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("bucket 1"));
    }

    #[test]
    fn rejects_overflowing_total_and_shares() {
        let err = characterize(&[1e308, 1e308]).unwrap_err();
        assert!(err.to_string().contains("overflows"), "{err}");

        // Total is a tiny positive number, so the shares blow up.
        let err = characterize(&[-1e308, 1e308, 1e-300]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));
    }
}
