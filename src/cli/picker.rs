//! Interactive selection prompt.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `ineq pick` and choose from lists" UX
//!
//! Each question lists numbered options; an empty answer keeps the default,
//! `q` cancels. When no CSV path is configured, `*.csv` files under the
//! current directory are offered alongside the built-in reference data.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::domain::{Country, MeasureKind, SUPPORTED_YEARS, Selection};
use crate::error::AppError;

/// Default directory recursion depth for finding CSV files.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Ask for country, year and measurement kind.
pub fn prompt_selection<R: BufRead, W: Write>(
    defaults: Selection,
    input: &mut R,
    output: &mut W,
) -> Result<Selection, AppError> {
    let countries: Vec<(Country, String)> = Country::ALL
        .iter()
        .map(|c| (*c, format!("{} ({})", c.display_name(), c.code())))
        .collect();
    let country = prompt_from_list("Country", &countries, defaults.country, input, output)?;

    let years: Vec<(i32, String)> = SUPPORTED_YEARS.iter().map(|y| (*y, y.to_string())).collect();
    let year = prompt_from_list("Year", &years, defaults.year, input, output)?;

    let kinds = [
        (MeasureKind::Income, MeasureKind::Income.display_name().to_string()),
        (MeasureKind::Wealth, MeasureKind::Wealth.display_name().to_string()),
    ];
    let kind = prompt_from_list("Measure", &kinds, defaults.kind, input, output)?;

    Ok(Selection { country, year, kind })
}

/// Offer discovered CSV files; `None` selects the built-in reference data.
pub fn prompt_data_file<R: BufRead, W: Write>(
    files: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<Option<PathBuf>, AppError> {
    if files.is_empty() {
        return Ok(None);
    }
    let mut options: Vec<(Option<usize>, String)> = vec![(None, "built-in reference data".to_string())];
    options.extend(files.iter().enumerate().map(|(idx, p)| (Some(idx), pretty_path(p))));

    let choice = prompt_from_list("Data source", &options, None, input, output)?;
    Ok(choice.map(|idx| files[idx].clone()))
}

/// Print a numbered list and read a choice.
///
/// Behavior:
/// - a number picks that entry
/// - an empty line keeps `default`
/// - `q` cancels
/// - anything else re-prompts
fn prompt_from_list<T: Copy + PartialEq, R: BufRead, W: Write>(
    title: &str,
    options: &[(T, String)],
    default: T,
    input: &mut R,
    output: &mut W,
) -> Result<T, AppError> {
    let write_err = |e: std::io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(output, "{title}:").map_err(write_err)?;
    let mut default_idx = 1;
    for (idx, (value, label)) in options.iter().enumerate() {
        let marker = if *value == default {
            default_idx = idx + 1;
            "*"
        } else {
            " "
        };
        writeln!(output, "{marker}{:>3}) {label}", idx + 1).map_err(write_err)?;
    }

    loop {
        write!(
            output,
            "Select {} (1-{}, Enter for {default_idx}, q to quit): ",
            title.to_lowercase(),
            options.len()
        )
        .map_err(write_err)?;
        output.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Use `ineq report` with flags for non-interactive runs.",
            ));
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        match answer.parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(options[choice - 1].0),
            _ => {
                writeln!(output, "Invalid choice: {answer}. Enter a number between 1 and {}.", options.len())
                    .map_err(write_err)?;
            }
        }
    }
}

/// Validate the provided path points to a `.csv` file.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("CSV file not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file (got: {}).", path.display()),
        ));
    }

    Ok(path.to_path_buf())
}

/// Discover `*.csv` files under the current directory (deterministic order).
pub fn discover_csv_files() -> Vec<PathBuf> {
    find_csv_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_csv_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_csv_files_inner(root, 0, max_depth, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn find_csv_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            if !should_skip_dir(&path) {
                find_csv_files_inner(&path, depth + 1, max_depth, out);
            }
            continue;
        }

        if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        == Some(true)
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn defaults() -> Selection {
        Selection {
            country: Country::Philippines,
            year: 2000,
            kind: MeasureKind::Income,
        }
    }

    #[test]
    fn numbered_answers_pick_entries() {
        let mut input = Cursor::new("4\n3\n2\n");
        let mut output = Vec::new();
        let sel = prompt_selection(defaults(), &mut input, &mut output).unwrap();
        assert_eq!(sel.country, Country::Thailand);
        assert_eq!(sel.year, 2018);
        assert_eq!(sel.kind, MeasureKind::Wealth);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("*  1) The Philippines (PH)"));
    }

    #[test]
    fn empty_answers_keep_defaults_and_invalid_reprompts() {
        let mut input = Cursor::new("\n9\nabc\n2\n\n");
        let mut output = Vec::new();
        let sel = prompt_selection(defaults(), &mut input, &mut output).unwrap();
        assert_eq!(sel.country, Country::Philippines);
        assert_eq!(sel.year, 2015);
        assert_eq!(sel.kind, MeasureKind::Income);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Invalid choice: 9."));
        assert!(shown.contains("Invalid choice: abc."));
    }

    #[test]
    fn quit_and_eof_cancel() {
        let err = prompt_selection(defaults(), &mut Cursor::new("q\n"), &mut Vec::new()).unwrap_err();
        assert_eq!(err.message(), "Canceled.");
        let err = prompt_selection(defaults(), &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn data_file_prompt() {
        let files = vec![PathBuf::from("./data/a.csv"), PathBuf::from("./data/b.csv")];
        let picked = prompt_data_file(&files, &mut Cursor::new("3\n"), &mut Vec::new()).unwrap();
        assert_eq!(picked, Some(PathBuf::from("./data/b.csv")));
        let picked = prompt_data_file(&files, &mut Cursor::new("\n"), &mut Vec::new()).unwrap();
        assert_eq!(picked, None);
        assert_eq!(prompt_data_file(&[], &mut Cursor::new(""), &mut Vec::new()).unwrap(), None);
    }

    #[test]
    fn csv_discovery_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::create_dir_all(dir.path().join("target")).unwrap();
        std::fs::write(dir.path().join("b.CSV"), "x").unwrap();
        std::fs::write(dir.path().join("nested").join("a.csv"), "x").unwrap();
        std::fs::write(dir.path().join("target").join("skip.csv"), "x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let found = find_csv_files(dir.path(), DEFAULT_SEARCH_DEPTH);
        assert_eq!(found.len(), 2);

        assert!(validate_csv_path(&dir.path().join("b.CSV")).is_ok());
        assert!(validate_csv_path(&dir.path().join("notes.txt")).is_err());
        assert!(validate_csv_path(&dir.path().join("nested")).is_err());
        assert!(validate_csv_path(&dir.path().join("missing.csv")).is_err());
    }
}
