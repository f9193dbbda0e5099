//! CSV ingest for percentile-bracketed distribution tables.
//!
//! The expected layout follows the World Inequality Database bulk exports:
//!
//! ```text
//! country;variable;percentile;year;value;age;pop
//! PH;aptinc992j;p0p20;2000;1135.707949;992;j
//! ```
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic reconstruction** of the bucket order from bracket labels
//! - **Separation of concerns**: no statistics here

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use crate::domain::PercentileBracket;
use crate::error::AppError;

/// Tolerance when matching bracket bounds (labels can carry decimals).
const BOUND_EPS: f64 = 1e-6;

const REQUIRED_COLUMNS: [&str; 5] = ["country", "variable", "percentile", "year", "value"];

/// Which rows to keep and how to bucket them.
#[derive(Debug, Clone)]
pub struct IngestQuery<'a> {
    /// ISO-2 country code, compared case-insensitively.
    pub country_code: &'a str,
    pub year: i32,
    /// Variable code, compared case-insensitively.
    pub variable: &'a str,
    /// Number of equal-width buckets to reconstruct.
    pub buckets: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the ordered series plus bookkeeping about skipped rows.
#[derive(Debug, Clone)]
pub struct IngestedSeries {
    /// One value per bucket, poorest first.
    pub income: Vec<f64>,
    /// The bracket each value came from (index-aligned with `income`).
    pub brackets: Vec<PercentileBracket>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows matching country/variable/year (before bracket selection).
    pub rows_matched: usize,
}

/// Load the series for `query` from a CSV file.
pub fn load_income_series(path: &Path, query: &IngestQuery<'_>) -> Result<IngestedSeries, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = parse_income_series(&content, query)?;

    if !ingested.row_errors.is_empty() {
        tracing::warn!(
            path = %path.display(),
            skipped = ingested.row_errors.len(),
            first = %ingested.row_errors[0].message,
            "skipped invalid CSV rows"
        );
    }
    tracing::info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_matched = ingested.rows_matched,
        buckets = ingested.income.len(),
        "loaded income series"
    );
    Ok(ingested)
}

/// Parse CSV text (delimiter detected from the header line).
pub fn parse_income_series(content: &str, query: &IngestQuery<'_>) -> Result<IngestedSeries, AppError> {
    if query.buckets == 0 {
        return Err(AppError::new(2, "Bucket count must be > 0."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut found: Vec<(PercentileBracket, f64)> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_matched = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, query) {
            Ok(Some((bracket, value))) => {
                rows_matched += 1;
                if found.iter().any(|(b, _)| same_bracket(b, &bracket)) {
                    row_errors.push(RowError {
                        line,
                        message: format!(
                            "Duplicate bracket p{}p{}; keeping the first value.",
                            bracket.lower, bracket.upper
                        ),
                    });
                    continue;
                }
                found.push((bracket, value));
            }
            Ok(None) => {} // other country/variable/year
            Err(message) => {
                rows_matched += 1;
                row_errors.push(RowError { line, message });
            }
        }
    }

    let (brackets, income) = select_partition(&found, query)?;

    Ok(IngestedSeries {
        income,
        brackets,
        row_errors,
        rows_read,
        rows_matched,
    })
}

/// Pick the `N` brackets of width `100/N` that tile `[0, 100]`, poorest first.
fn select_partition(
    found: &[(PercentileBracket, f64)],
    query: &IngestQuery<'_>,
) -> Result<(Vec<PercentileBracket>, Vec<f64>), AppError> {
    if found.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No data available for country `{}`, year {}, variable `{}`.",
                query.country_code, query.year, query.variable
            ),
        ));
    }

    let width = 100.0 / query.buckets as f64;
    let mut brackets = Vec::with_capacity(query.buckets);
    let mut income = Vec::with_capacity(query.buckets);

    for k in 0..query.buckets {
        let wanted = PercentileBracket {
            lower: k as f64 * width,
            upper: (k + 1) as f64 * width,
        };
        let Some((bracket, value)) = found.iter().find(|(b, _)| same_bracket(b, &wanted)) else {
            return Err(AppError::new(
                3,
                format!(
                    "No data available for country `{}`, year {}, variable `{}`: bracket p{}p{} is missing for {} buckets.",
                    query.country_code,
                    query.year,
                    query.variable,
                    fmt_bound(wanted.lower),
                    fmt_bound(wanted.upper),
                    query.buckets
                ),
            ));
        };
        brackets.push(*bracket);
        income.push(*value);
    }

    Ok((brackets, income))
}

/// Same start and same width, within `BOUND_EPS`.
fn same_bracket(a: &PercentileBracket, b: &PercentileBracket) -> bool {
    (a.lower - b.lower).abs() < BOUND_EPS && (a.width() - b.width()).abs() < BOUND_EPS
}

fn fmt_bound(v: f64) -> String {
    let rounded = (v * 1e6).round() / 1e6;
    format!("{rounded}")
}

/// Prefer `;` (WID bulk exports) and fall back to `,`.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    if header.matches(';').count() >= header.matches(',').count() && header.contains(';') {
        b';'
    } else {
        b','
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so schema validation sees the real name.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

/// Returns `Ok(None)` for rows belonging to another selection.
fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    query: &IngestQuery<'_>,
) -> Result<Option<(PercentileBracket, f64)>, String> {
    let country = get_required(record, header_map, "country")?;
    let variable = get_required(record, header_map, "variable")?;
    if !country.eq_ignore_ascii_case(query.country_code) || !variable.eq_ignore_ascii_case(query.variable) {
        return Ok(None);
    }

    let year_raw = get_required(record, header_map, "year")?;
    let year = year_raw
        .parse::<i32>()
        .map_err(|_| format!("Invalid year '{year_raw}'."))?;
    if year != query.year {
        return Ok(None);
    }

    let bracket = PercentileBracket::parse(get_required(record, header_map, "percentile")?)?;

    let value_raw = get_required(record, header_map, "value")?;
    let value = value_raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid value '{value_raw}'."))?;

    Ok(Some((bracket, value)))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}
