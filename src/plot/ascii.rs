//! ASCII bar chart of per-bucket shares.
//!
//! This is intentionally "dumb" (fixed-width bars), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The largest share fills the whole bar; others are scaled to it.

use crate::metrics::DataSet;
use crate::report::{ordinal, share_percent};

/// Render one bar per bucket, poorest first.
pub fn render_share_bars(dataset: &DataSet, width: usize) -> String {
    let width = width.max(10);
    let subsets = dataset.subsets();

    let max_share = subsets
        .iter()
        .map(|s| s.income_share)
        .fold(0.0_f64, f64::max);
    let labels: Vec<String> = (1..=subsets.len()).map(ordinal).collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(
        "Shares by percentile (full bar = {}%)\n",
        share_percent(max_share)
    ));

    for (label, subset) in labels.iter().zip(subsets.iter()) {
        let len = bar_len(subset.income_share, max_share, width);
        let bar = "#".repeat(len);
        out.push_str(&format!(
            "{label:>label_width$} |{bar:<width$}| {:>6}%\n",
            share_percent(subset.income_share)
        ));
    }

    out
}

fn bar_len(share: f64, max_share: f64, width: usize) -> usize {
    if max_share <= 0.0 || share <= 0.0 {
        return 0;
    }
    ((share / max_share) * width as f64).round().clamp(0.0, width as f64) as usize
}
