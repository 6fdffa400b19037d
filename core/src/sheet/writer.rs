use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::{RESULTS_HEADER, RESULTS_SHEET_NAME};
use crate::error::SheetError;
use crate::verify::VerificationResult;

const COLUMN_WIDTHS: [f64; 3] = [14.0, 48.0, 16.0];

/// Serialize results into a single-sheet workbook.
///
/// All cells are strings so identifiers with leading zeros survive.
pub fn write_results(results: &[VerificationResult]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(RESULTS_SHEET_NAME)?;

        for (col, (title, width)) in RESULTS_HEADER.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            sheet.write_string_with_format(0, col, *title, &header_format)?;
            sheet.set_column_width(col, width)?;
        }

        for (idx, result) in results.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, value) in result.as_row().iter().enumerate() {
                sheet.write_string(row, col as u16, *value)?;
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(target: "vatcheck.sheet", rows = results.len(), bytes = bytes.len());
    Ok(bytes)
}

pub fn write_results_to_path(results: &[VerificationResult], path: &Path) -> Result<(), SheetError> {
    let bytes = write_results(results)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
