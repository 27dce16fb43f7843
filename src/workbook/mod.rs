//! Parsing of the filled workbook returned by the evaluation engine.
//!
//! The curve view only needs one thing from the workbook: the
//! `Deflection (microns)` column of the `Data` sheet, truncated to
//! `length + 1` rows. Sheet and column names are part of the string contract
//! with the external template (see `domain::types`).

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::domain::{BeamParams, DATA_SHEET, DEFLECTION_COLUMN};
use crate::error::AppError;

/// Read the deflection series for the curve view.
///
/// Returns exactly `params.curve_rows()` values, or an error when the sheet,
/// the column, or enough rows are missing.
pub fn read_deflection_series(workbook: &[u8], params: &BeamParams) -> Result<Vec<f64>, AppError> {
    let rows = params.curve_rows();
    let series = read_column(workbook, DATA_SHEET, DEFLECTION_COLUMN)?;
    if series.len() < rows {
        return Err(AppError::engine(format!(
            "'{DATA_SHEET}' sheet has {} deflection rows, need {rows} for length {}.",
            series.len(),
            params.length
        )));
    }
    Ok(series[..rows].to_vec())
}

/// Read one named column of a tabular sheet (header in the first row).
fn read_column(workbook: &[u8], sheet: &str, column: &str) -> Result<Vec<f64>, AppError> {
    let mut book = Xlsx::new(Cursor::new(workbook))
        .map_err(|e| AppError::engine(format!("Failed to open filled workbook: {e}")))?;

    let range = book
        .worksheet_range(sheet)
        .map_err(|e| AppError::engine(format!("Missing '{sheet}' sheet in filled workbook: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| AppError::engine(format!("'{sheet}' sheet is empty.")))?;

    let col_idx = header
        .iter()
        .position(|cell| matches!(cell, Data::String(s) if s.as_str() == column))
        .ok_or_else(|| {
            AppError::engine(format!("'{sheet}' sheet has no '{column}' column."))
        })?;

    let mut out = Vec::new();
    for row in rows {
        match row.get(col_idx) {
            Some(Data::Float(v)) => out.push(*v),
            Some(Data::Int(v)) => out.push(*v as f64),
            // Blank cells end the series; the sheet pads unused rows.
            Some(Data::Empty) | None => break,
            Some(other) => {
                return Err(AppError::engine(format!(
                    "Non-numeric cell {other:?} in '{column}' column."
                )));
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Workbook fixtures standing in for the engine's filled file.

    use rust_xlsxwriter::Workbook;

    use crate::domain::{DATA_SHEET, DEFLECTION_COLUMN};

    /// A `Data` sheet with a header row and `n_rows` deflection values.
    ///
    /// Values follow a simple parabola so tests can assert on specific cells.
    pub fn deflection_workbook(n_rows: usize) -> Vec<u8> {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name(DATA_SHEET).unwrap();
        sheet.write_string(0, 0, "Position (mm)").unwrap();
        sheet.write_string(0, 1, DEFLECTION_COLUMN).unwrap();
        for i in 0..n_rows {
            let x = i as f64;
            sheet.write_number((i + 1) as u32, 0, x).unwrap();
            sheet.write_number((i + 1) as u32, 1, x * (100.0 - x)).unwrap();
        }
        book.save_to_buffer().unwrap()
    }

    /// A workbook whose only sheet is not the expected `Data` sheet.
    pub fn wrong_sheet_workbook() -> Vec<u8> {
        let mut book = Workbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name("Summary").unwrap();
        sheet.write_string(0, 0, DEFLECTION_COLUMN).unwrap();
        book.save_to_buffer().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_LENGTH_MM;

    fn params_with_length(length: f64) -> BeamParams {
        BeamParams {
            length,
            ..BeamParams::default()
        }
    }

    #[test]
    fn reads_length_plus_one_rows() {
        let bytes = fixtures::deflection_workbook(101);
        let series = read_deflection_series(&bytes, &params_with_length(10.0)).unwrap();
        assert_eq!(series.len(), 11);
        assert_eq!(series[0], 0.0);
        assert_eq!(series[1], 99.0);
    }

    #[test]
    fn boundary_length_uses_the_full_series() {
        let bytes = fixtures::deflection_workbook(101);
        let series = read_deflection_series(&bytes, &params_with_length(MAX_LENGTH_MM)).unwrap();
        assert_eq!(series.len(), 101);
    }

    #[test]
    fn errors_when_length_exceeds_available_rows() {
        let bytes = fixtures::deflection_workbook(50);
        let err = read_deflection_series(&bytes, &params_with_length(60.0)).unwrap_err();
        assert!(err.to_string().contains("need 61"));
    }

    #[test]
    fn errors_on_missing_data_sheet() {
        let bytes = fixtures::wrong_sheet_workbook();
        let err = read_deflection_series(&bytes, &params_with_length(10.0)).unwrap_err();
        assert!(err.to_string().contains("Data"));
    }

    #[test]
    fn errors_on_garbage_bytes() {
        let err = read_deflection_series(b"not an xlsx file", &params_with_length(10.0)).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
