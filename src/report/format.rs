//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the metric code stays free of presentation concerns
//! - output changes are localized (and covered by golden tests)
//!
//! Precision: log variance, mean deviation and both Theil indices are shown
//! with 2 decimals, the Gini coefficient with 1, shares as percent with 2.

use crate::domain::MeasureKind;
use crate::metrics::DataSet;

/// English ordinal for a 1-based rank: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// A share in `[0, 1]` as a percentage with 2 decimals (`0.051` -> `5.10`).
pub fn share_percent(share: f64) -> String {
    fmt_fixed(share * 100.0, 2)
}

/// Fixed-point formatting that never prints `-0.00` for values that round to zero.
pub fn fmt_fixed(value: f64, decimals: usize) -> String {
    let s = format!("{value:.decimals$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

/// Format the full report for one dataset.
pub fn format_report(dataset: &DataSet, kind: MeasureKind, show_shares: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Inequality data for {} for the year {}\n",
        dataset.label(),
        dataset.period()
    ));
    out.push_str("---------------------------------------------\n");

    if show_shares {
        out.push_str(&format_shares(dataset, kind));
    }

    out.push_str("--Measurements--\n");
    out.push_str(&format_metrics(dataset));
    out
}

/// Per-bucket share lines.
pub fn format_shares(dataset: &DataSet, kind: MeasureKind) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Dividing the population into {} percentiles:\n",
        dataset.bucket_count()
    ));
    for (idx, subset) in dataset.subsets().iter().enumerate() {
        out.push_str(&format!(
            "{} percentile owns {}% of total {}\n",
            ordinal(idx + 1),
            share_percent(subset.income_share),
            kind.noun()
        ));
    }
    out
}

/// The five statistics, one per line.
pub fn format_metrics(dataset: &DataSet) -> String {
    let m = dataset.metrics();
    let mut out = String::new();
    let rows = [
        ("Log variance:", fmt_fixed(m.log_variance, 2)),
        ("Relative mean deviation:", fmt_fixed(m.mean_deviation, 2)),
        ("Gini coefficient:", fmt_fixed(m.gini, 1)),
        ("Theil T index:", fmt_fixed(m.theil_t, 2)),
        ("Theil L index:", fmt_fixed(m.theil_l, 2)),
    ];
    for (name, value) in rows {
        out.push_str(&format!("{name:<25}{value}\n"));
    }
    out
}
