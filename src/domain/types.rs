//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be
//! used for CLI parsing, the TUI settings panel and JSON exports alike.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Years for which selections are accepted.
pub const SUPPORTED_YEARS: [i32; 3] = [2000, 2015, 2018];

/// Default number of equal-width buckets reconstructed from a CSV (quintiles).
pub const DEFAULT_BUCKETS: usize = 5;

/// Default WID variable code for average pre-tax national income per adult.
pub const DEFAULT_INCOME_VARIABLE: &str = "aptinc992j";

/// Default WID variable code for average net personal wealth per adult.
pub const DEFAULT_WEALTH_VARIABLE: &str = "ahweal992j";

/// Countries that can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Country {
    #[value(name = "PH", alias = "philippines")]
    Philippines,
    #[value(name = "ID", alias = "indonesia")]
    Indonesia,
    #[value(name = "MY", alias = "malaysia")]
    Malaysia,
    #[value(name = "TH", alias = "thailand")]
    Thailand,
    #[value(name = "VN", alias = "vietnam")]
    Vietnam,
}

impl Country {
    pub const ALL: [Country; 5] = [
        Country::Philippines,
        Country::Indonesia,
        Country::Malaysia,
        Country::Thailand,
        Country::Vietnam,
    ];

    /// ISO 3166-1 alpha-2 code, as used in the `country` CSV column.
    pub fn code(self) -> &'static str {
        match self {
            Country::Philippines => "PH",
            Country::Indonesia => "ID",
            Country::Malaysia => "MY",
            Country::Thailand => "TH",
            Country::Vietnam => "VN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Country::Philippines => "The Philippines",
            Country::Indonesia => "Indonesia",
            Country::Malaysia => "Malaysia",
            Country::Thailand => "Thailand",
            Country::Vietnam => "Vietnam",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the bucket values measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Income,
    Wealth,
}

impl MeasureKind {
    /// Lowercase noun used in sentences ("percent of total income").
    pub fn noun(self) -> &'static str {
        match self {
            MeasureKind::Income => "income",
            MeasureKind::Wealth => "wealth",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            MeasureKind::Income => "Income",
            MeasureKind::Wealth => "Wealth",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            MeasureKind::Income => MeasureKind::Wealth,
            MeasureKind::Wealth => MeasureKind::Income,
        }
    }
}

/// A resolved (country, year, kind) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub country: Country,
    pub year: i32,
    pub kind: MeasureKind,
}

impl Selection {
    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.country.display_name(),
            self.year,
            self.kind.noun()
        )
    }
}

/// Next supported year after `year` (wrapping), used by selection UIs.
pub fn next_year(year: i32) -> i32 {
    let idx = SUPPORTED_YEARS.iter().position(|y| *y == year).unwrap_or(0);
    SUPPORTED_YEARS[(idx + 1) % SUPPORTED_YEARS.len()]
}

/// Previous supported year before `year` (wrapping).
pub fn prev_year(year: i32) -> i32 {
    let idx = SUPPORTED_YEARS.iter().position(|y| *y == year).unwrap_or(0);
    SUPPORTED_YEARS[(idx + SUPPORTED_YEARS.len() - 1) % SUPPORTED_YEARS.len()]
}

/// A population bracket `[lower, upper)` in percent, parsed from labels like
/// `p20p40` or `p90`.
///
/// A single bound `pN` means the top `100 - N` percent, i.e. `[N, 100)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBracket {
    pub lower: f64,
    pub upper: f64,
}

impl PercentileBracket {
    pub fn parse(label: &str) -> Result<Self, String> {
        let label = label.trim();
        let rest = label
            .strip_prefix('p')
            .or_else(|| label.strip_prefix('P'))
            .ok_or_else(|| format!("Invalid percentile label '{label}': expected `pXpY` or `pX`."))?;

        let (lower, upper) = match rest.split_once(['p', 'P']) {
            Some((lo, hi)) => (parse_bound(label, lo)?, parse_bound(label, hi)?),
            None => (parse_bound(label, rest)?, 100.0),
        };

        if upper <= lower || upper > 100.0 {
            return Err(format!(
                "Invalid percentile label '{label}': bounds must satisfy 0 <= lower < upper <= 100."
            ));
        }
        Ok(Self { lower, upper })
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

fn parse_bound(label: &str, s: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid percentile label '{label}': '{s}' is not a number."))?;
    if !(0.0..=100.0).contains(&v) {
        return Err(format!("Invalid percentile label '{label}': bound {v} outside 0..100."));
    }
    Ok(v)
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags, `.env` defaults and (for `pick`/`tui`) the
/// interactive selection.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// CSV data file; `None` means the built-in reference datasets.
    pub csv_path: Option<PathBuf>,
    pub selection: Selection,
    pub buckets: usize,
    pub income_variable: String,
    pub wealth_variable: String,

    pub show_shares: bool,
    pub plot: bool,
    pub plot_width: usize,

    pub export_shares: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Variable code matching the selected measurement kind.
    pub fn variable_code(&self) -> &str {
        match self.selection.kind {
            MeasureKind::Income => &self.income_variable,
            MeasureKind::Wealth => &self.wealth_variable,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            selection: Selection {
                country: Country::Philippines,
                year: SUPPORTED_YEARS[0],
                kind: MeasureKind::Income,
            },
            buckets: DEFAULT_BUCKETS,
            income_variable: DEFAULT_INCOME_VARIABLE.to_string(),
            wealth_variable: DEFAULT_WEALTH_VARIABLE.to_string(),
            show_shares: true,
            plot: false,
            plot_width: 50,
            export_shares: None,
            export_json: None,
        }
    }
}
