//! XLS/XLSX statement parsing

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use super::{normalize_key, RawRecord};
use crate::error::{Error, Result};

/// Parse workbook bytes into records keyed by normalized header
///
/// Only the first sheet is read. The first row is treated as the header
/// row, matching how the supported banks lay out their exports.
pub fn parse(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let cursor = Cursor::new(bytes);
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::MalformedFile(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::MalformedFile("Workbook contains no sheets".to_string()))?
        .map_err(|e| Error::MalformedFile(format!("Failed to read sheet: {}", e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| normalize_key(&cell_to_string(cell)))
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if !header.is_empty() {
                record.insert(header.clone(), cell_to_string(cell).trim());
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Render a cell the way it would appear in a CSV export
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // Whole amounts come back as floats; avoid a spurious ".0"
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{:?}", e),
    }
}
