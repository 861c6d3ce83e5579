//! FILENAME: core/engine/src/export.rs
//! PURPOSE: Projects the staged dataset into the table handed to document generation.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::columns::ColumnRegistry;
use crate::error::{StagingError, StagingResult};
use crate::rows::RowStore;

/// Final header/row set, selected columns only, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ExportTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Rows rendered as display strings.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellValue::display_value).collect::<Vec<_>>())
            .collect()
    }
}

/// Builds the export table. The aggregate row is included like any other row
/// so a completed sum ends up in the document.
pub fn project(columns: &ColumnRegistry, rows: &RowStore) -> StagingResult<ExportTable> {
    let selected = columns.selected_in_order();
    let headers: Vec<String> = selected.clone().map(|c| c.name.clone()).collect();
    if headers.is_empty() {
        return Err(StagingError::EmptySelection);
    }

    let matrix: Vec<Vec<CellValue>> = rows
        .iter()
        .map(|row| {
            selected
                .clone()
                .map(|c| row.get(c.index).clone())
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(ExportTable {
        headers,
        rows: matrix,
    })
}
