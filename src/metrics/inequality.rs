//! Scalar inequality statistics over a bucketed income series.
//!
//! All functions take the series ordered from poorest to richest bucket and
//! share the same preconditions: at least one bucket, finite values, and a
//! positive total (hence a positive mean).
//!
//! Non-positive buckets are handled differently per statistic:
//!
//! - log variance uses `|v|`, and a zero bucket contributes 0
//! - Theil T and Theil L skip `v <= 0` in the sum but still divide by the full
//!   bucket count, which biases both indices downward for such series
//!
//! The two policies are intentionally not unified.

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;
use crate::metrics::characterize::{characterize, checked_total};

/// The five summary statistics computed for every dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InequalityMetrics {
    pub log_variance: f64,
    pub mean_deviation: f64,
    /// Gini coefficient in percent (0 = perfect equality).
    pub gini: f64,
    /// Theil T index, scaled by 100.
    pub theil_t: f64,
    /// Theil L index, scaled by 100.
    pub theil_l: f64,
}

impl InequalityMetrics {
    /// Compute every statistic; fails if any of them fails or is not finite.
    pub fn compute(income: &[f64]) -> Result<Self, MetricsError> {
        let metrics = Self {
            log_variance: log_variance(income)?,
            mean_deviation: relative_mean_deviation(income)?,
            gini: gini(income)?,
            theil_t: theil_t(income)?,
            theil_l: theil_l(income)?,
        };

        let named = [
            ("log variance", metrics.log_variance),
            ("mean deviation", metrics.mean_deviation),
            ("gini", metrics.gini),
            ("theil T", metrics.theil_t),
            ("theil L", metrics.theil_l),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MetricsError::invalid(format!("{name} is not finite ({value})")));
        }
        Ok(metrics)
    }
}

/// Arithmetic mean of the series.
pub fn mean(income: &[f64]) -> Result<f64, MetricsError> {
    let total = checked_total(income)?;
    Ok(total / income.len() as f64)
}

/// Mean of `ln(|v|/μ)^2` over all buckets.
pub fn log_variance(income: &[f64]) -> Result<f64, MetricsError> {
    let mu = mean(income)?;
    let sum: f64 = income
        .iter()
        .map(|&v| {
            if v == 0.0 {
                0.0
            } else {
                (v.abs() / mu).ln().powi(2)
            }
        })
        .sum();
    Ok(sum / income.len() as f64)
}

/// Mean absolute deviation from the mean, divided by the mean.
pub fn relative_mean_deviation(income: &[f64]) -> Result<f64, MetricsError> {
    let mu = mean(income)?;
    let n = income.len() as f64;
    let abs_dev: f64 = income.iter().map(|&v| (v - mu).abs()).sum();
    Ok((abs_dev / n) / mu)
}

/// Gini coefficient in percent.
///
/// `G = (1 - Σ sᵢ (pᵢ + 2 (1 - Fᵢ))) × 100` where `sᵢ` is the income share,
/// `pᵢ` the population share and `Fᵢ` the cumulative population share.
pub fn gini(income: &[f64]) -> Result<f64, MetricsError> {
    let subsets = characterize(income)?;
    let score: f64 = subsets
        .iter()
        .map(|s| s.income_share * (s.population_share + 2.0 * (1.0 - s.cumulative_population_share)))
        .sum();
    Ok((1.0 - score) * 100.0)
}

/// Theil T index (income-weighted), scaled by 100.
pub fn theil_t(income: &[f64]) -> Result<f64, MetricsError> {
    let mu = mean(income)?;
    let sum: f64 = income
        .iter()
        .filter(|&&v| v > 0.0)
        .map(|&v| {
            let ratio = v / mu;
            ratio * ratio.ln()
        })
        .sum();
    Ok(sum / income.len() as f64 * 100.0)
}

/// Theil L index (mean log deviation), scaled by 100.
pub fn theil_l(income: &[f64]) -> Result<f64, MetricsError> {
    let mu = mean(income)?;
    let sum: f64 = income.iter().filter(|&&v| v > 0.0).map(|&v| (mu / v).ln()).sum();
    Ok(sum / income.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::LogNormal;

    const PH_2000: [f64; 5] = [1135.707949, 1892.846582, 2828.135482, 4453.756665, 11958.33664];

    fn round_to(v: f64, decimals: i32) -> f64 {
        let p = 10f64.powi(decimals);
        (v * p).round() / p
    }

    #[test]
    fn equal_buckets_have_no_inequality() {
        let m = InequalityMetrics::compute(&[10.0, 10.0, 10.0, 10.0]).unwrap();
        assert!(m.log_variance.abs() < 1e-12);
        assert!(m.mean_deviation.abs() < 1e-12);
        assert!(m.gini.abs() < 1e-9);
        assert!(m.theil_t.abs() < 1e-12);
        assert!(m.theil_l.abs() < 1e-12);
    }

    #[test]
    fn equal_buckets_any_length() {
        for n in 1..=12 {
            let income = vec![3.5; n];
            let m = InequalityMetrics::compute(&income).unwrap();
            assert!(m.gini.abs() < 1e-9, "gini={} for n={n}", m.gini);
            assert!(m.theil_t.abs() < 1e-12);
            assert!(m.theil_l.abs() < 1e-12);
        }
    }

    #[test]
    fn philippines_2000_reference_values() {
        let m = InequalityMetrics::compute(&PH_2000).unwrap();
        assert_eq!(round_to(m.gini, 1), 43.5);
        assert_eq!(round_to(m.log_variance, 2), 0.76);
        assert_eq!(round_to(m.mean_deviation, 2), 0.67);
        assert_eq!(round_to(m.theil_t, 2), 33.03);
        assert_eq!(round_to(m.theil_l, 2), 33.77);
    }

    #[test]
    fn gini_matches_trapezoid_lorenz_area() {
        // For equal-width buckets the share formula equals 1 - Σ p (L_{i-1} + L_i).
        let subsets = characterize(&PH_2000).unwrap();
        let mut prev = 0.0;
        let mut area = 0.0;
        for s in &subsets {
            let cur = prev + s.income_share;
            area += s.population_share * (prev + cur);
            prev = cur;
        }
        let expected = (1.0 - area) * 100.0;
        assert!((gini(&PH_2000).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_bucket_policies() {
        let income = [0.0, 10.0, 20.0];
        let mu = 10.0;

        // Zero contributes nothing to log variance.
        let lv = log_variance(&income).unwrap();
        let expected_lv = ((10.0f64 / mu).ln().powi(2) + (20.0f64 / mu).ln().powi(2)) / 3.0;
        assert!((lv - expected_lv).abs() < 1e-12);

        // Theil sums skip the zero but still divide by N = 3.
        let tt = theil_t(&income).unwrap();
        let expected_tt = (2.0 * 2.0f64.ln()) / 3.0 * 100.0;
        assert!((tt - expected_tt).abs() < 1e-9);

        let tl = theil_l(&income).unwrap();
        let expected_tl = (0.5f64).ln() / 3.0 * 100.0;
        assert!((tl - expected_tl).abs() < 1e-9);
    }

    #[test]
    fn negative_bucket_policies() {
        let income = [-5.0, 10.0, 25.0];
        let mu = 10.0;
        let expected = ((5.0f64 / mu).ln().powi(2) + 0.0 + (25.0f64 / mu).ln().powi(2)) / 3.0;
        assert!((log_variance(&income).unwrap() - expected).abs() < 1e-12);

        // Both Theil sums skip the negative bucket but divide by N = 3.
        let t = |v: f64| (v / mu) * (v / mu).ln();
        let expected_tt = (t(10.0) + t(25.0)) / 3.0 * 100.0;
        assert!((theil_t(&income).unwrap() - expected_tt).abs() < 1e-9);

        let expected_tl = ((mu / 10.0f64).ln() + (mu / 25.0f64).ln()) / 3.0 * 100.0;
        assert!((theil_l(&income).unwrap() - expected_tl).abs() < 1e-9);
    }

    #[test]
    fn huge_values_fail_instead_of_overflowing() {
        let err = InequalityMetrics::compute(&[1e308, 1e308]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));

        let err = InequalityMetrics::compute(&[-1e308, 1e308, 1e-300]).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidInput(_)));
    }

    #[test]
    fn relative_mean_deviation_simple() {
        // mean = 20, |dev| = 10, 0, 10 -> 20/3 / 20
        let rmd = relative_mean_deviation(&[10.0, 20.0, 30.0]).unwrap();
        assert!((rmd - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scale_invariance() {
        let mut rng = StdRng::seed_from_u64(42);
        let dist = LogNormal::new(9.0, 0.8).unwrap();

        for _ in 0..50 {
            let n = rng.gen_range(2..=10);
            let mut income: Vec<f64> = (0..n).map(|_| dist.sample(&mut rng)).collect();
            income.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let k = rng.gen_range(0.01..1000.0);
            let scaled: Vec<f64> = income.iter().map(|v| v * k).collect();

            let a = InequalityMetrics::compute(&income).unwrap();
            let b = InequalityMetrics::compute(&scaled).unwrap();
            assert!((a.gini - b.gini).abs() < 1e-8);
            assert!((a.theil_t - b.theil_t).abs() < 1e-8);
            assert!((a.theil_l - b.theil_l).abs() < 1e-8);
            assert!((a.log_variance - b.log_variance).abs() < 1e-10);
            assert!((a.mean_deviation - b.mean_deviation).abs() < 1e-10);
        }
    }

    #[test]
    fn empty_and_all_zero_series_fail() {
        for income in [&[][..], &[0.0, 0.0, 0.0][..]] {
            assert!(matches!(mean(income), Err(MetricsError::InvalidInput(_))));
            assert!(matches!(log_variance(income), Err(MetricsError::InvalidInput(_))));
            assert!(matches!(relative_mean_deviation(income), Err(MetricsError::InvalidInput(_))));
            assert!(matches!(gini(income), Err(MetricsError::InvalidInput(_))));
            assert!(matches!(theil_t(income), Err(MetricsError::InvalidInput(_))));
            assert!(matches!(theil_l(income), Err(MetricsError::InvalidInput(_))));
        }
    }

    #[test]
    fn negative_total_fails() {
        assert!(InequalityMetrics::compute(&[-10.0, 5.0]).is_err());
    }
}
