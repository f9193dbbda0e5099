//! Export the per-bucket share table to CSV.
//!
//! Two columns, one row per bucket, meant to be opened directly in a
//! spreadsheet:
//!
//! ```text
//! Population Percentile,Income Share
//! 1st,5.10
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::MeasureKind;
use crate::error::AppError;
use crate::metrics::DataSet;
use crate::report::{ordinal, share_percent};

/// Write the share table for `dataset` to `path`.
pub fn write_shares_csv(path: &Path, dataset: &DataSet, kind: MeasureKind) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_shares(&mut file, dataset, kind)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), rows = dataset.bucket_count(), "exported share table");
    Ok(())
}

fn write_shares<W: Write>(out: &mut W, dataset: &DataSet, kind: MeasureKind) -> std::io::Result<()> {
    writeln!(out, "Population Percentile,{} Share", kind.display_name())?;
    for (idx, subset) in dataset.subsets().iter().enumerate() {
        writeln!(out, "{},{}", ordinal(idx + 1), share_percent(subset.income_share))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_table_rows() {
        let dataset = DataSet::build("Test", 2000, vec![10.0, 30.0, 60.0]).unwrap();
        let mut buf = Vec::new();
        write_shares(&mut buf, &dataset, MeasureKind::Wealth).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        assert_eq!(
            txt,
            "Population Percentile,Wealth Share\n1st,10.00\n2nd,30.00\n3rd,60.00\n"
        );
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inequality_data.csv");
        let dataset = DataSet::build(
            "The Philippines",
            2000,
            vec![1135.707949, 1892.846582, 2828.135482, 4453.756665, 11958.33664],
        )
        .unwrap();
        write_shares_csv(&path, &dataset, MeasureKind::Income).unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Population Percentile,Income Share");
        assert_eq!(lines[1], "1st,5.10");
        assert_eq!(lines[5], "5th,53.70");
    }

    #[test]
    fn unwritable_path_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let dataset = DataSet::build("Test", 2000, vec![1.0]).unwrap();
        let err = write_shares_csv(&path, &dataset, MeasureKind::Income).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
