//! FILENAME: core/persistence/src/xlsx_reader.rs
//! PURPOSE: Ingestion - turns the first worksheet of an upload into headers and rows.

use crate::{PersistenceError, SourceTable};
use calamine::{open_workbook, Data, Reader, Xlsx};
use engine::CellValue;
use log::debug;
use std::path::Path;

/// Reads the first worksheet of an xlsx workbook.
pub fn read_dataset(path: &Path) -> Result<SourceTable, PersistenceError> {
    read_sheet_by(path, None)
}

/// Reads the named worksheet of an xlsx workbook.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<SourceTable, PersistenceError> {
    read_sheet_by(path, Some(sheet_name))
}

fn read_sheet_by(path: &Path, sheet_name: Option<&str>) -> Result<SourceTable, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(PersistenceError::InvalidFormat(
            "Workbook contains no sheets".to_string(),
        ));
    }

    let sheet_name = match sheet_name {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| PersistenceError::SheetNotFound(name.to_string()))?,
        None => sheet_names[0].clone(),
    };

    let range = workbook.worksheet_range(&sheet_name)?;

    // The range starts at the first used cell; blank leading columns still count.
    let leading_blank = range.start().map_or(0, |(_, col)| col as usize);
    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| {
            std::iter::repeat(CellValue::Empty)
                .take(leading_blank)
                .chain(row.iter().map(normalize_cell))
                .collect::<Vec<_>>()
        })
        .collect();

    let table = table_from_grid(grid);
    debug!(
        "read sheet '{}' from {:?}: {} columns, {} rows",
        sheet_name,
        path,
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

/// Converts a raw cell to the value shown in the spreadsheet.
/// Dates become `YYYY-MM-DD` text; booleans and errors become text.
pub(crate) fn normalize_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::text(if *b { "TRUE" } else { "FALSE" }),
        Data::Error(e) => CellValue::text(e.to_string()),
        Data::DateTime(dt) => {
            if dt.is_datetime() {
                match dt.as_datetime() {
                    Some(value) => CellValue::text(value.date().to_string()),
                    None => CellValue::Number(dt.as_f64()),
                }
            } else {
                CellValue::Number(dt.as_f64())
            }
        }
        Data::DateTimeIso(s) => {
            CellValue::from(s.split('T').next().unwrap_or(s.as_str()))
        }
        Data::DurationIso(s) => CellValue::from(s.as_str()),
    }
}

/// Index of the row with the most non-empty cells. Ties go to the earliest row.
pub fn detect_header_row(grid: &[Vec<CellValue>]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for (idx, row) in grid.iter().enumerate() {
        let filled = row.iter().filter(|c| !c.is_empty()).count();
        match best {
            Some((_, max_filled)) if filled <= max_filled => {}
            _ => best = Some((idx, filled)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Splits a sheet grid into headers and data rows. Rows above the detected
/// header row are dropped.
pub fn table_from_grid(grid: Vec<Vec<CellValue>>) -> SourceTable {
    let header_row = match detect_header_row(&grid) {
        Some(idx) => idx,
        None => return SourceTable::default(),
    };

    let mut grid = grid.into_iter().skip(header_row);
    let headers = grid
        .next()
        .map(|row| row.iter().map(CellValue::display_value).collect::<Vec<String>>())
        .unwrap_or_default();
    let rows = grid.collect();

    SourceTable { headers, rows }
}
