//! Export computed tables to CSV and snapshots/comparisons to JSON.
//!
//! Exports are meant to be easy to consume in spreadsheets or by the
//! rendering layer. Absent values are written as empty CSV cells / JSON `null`.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{RealWageEntry, VariationRow};
use crate::error::AppError;

/// Write real-wage rows to CSV (`year,nominal,real,base_year`).
pub fn write_real_wages_csv(path: &Path, rows: &[RealWageEntry]) -> Result<(), AppError> {
    write_csv(path, rows)
}

/// Write variation rows to CSV.
pub fn write_variations_csv(path: &Path, rows: &[VariationRow]) -> Result<(), AppError> {
    write_csv(path, rows)
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value).map_err(|e| AppError::new(2, format!("Failed to write JSON: {e}")))
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variations_csv_leaves_absent_values_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("var.csv");
        let rows = [VariationRow {
            year: 2012,
            income_share: 55.5,
            inflation_rate: 2.4,
            income_variation: None,
            inflation_variation: Some(-0.5),
        }];
        write_variations_csv(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("year,income_share,inflation_rate,income_variation,inflation_variation")
        );
        assert_eq!(lines.next(), Some("2012,55.5,2.4,,-0.5"));
    }
}
