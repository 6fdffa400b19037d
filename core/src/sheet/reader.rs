use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use crate::error::SheetError;

/// Read raw identifiers from column 1 of the first worksheet, rows 2..N.
///
/// Row 1 is a header. Empty cells (or cells that are blank after trimming)
/// are skipped; everything else is returned in row order.
pub fn read_identifiers(bytes: &[u8]) -> Result<Vec<String>, SheetError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    let Some((last_row, _)) = range.end() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for row in 1..=last_row {
        if let Some(value) = range.get_value((row, 0)).and_then(cell_text) {
            out.push(value);
        }
    }

    tracing::debug!(target: "vatcheck.sheet", rows = last_row, identifiers = out.len());
    Ok(out)
}

pub fn read_identifiers_from_path(path: &Path) -> Result<Vec<String>, SheetError> {
    let bytes = std::fs::read(path)?;
    read_identifiers(&bytes)
}

fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        // 数字单元格：整数值不带小数部分输出
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
