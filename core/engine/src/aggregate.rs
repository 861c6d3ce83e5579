//! FILENAME: core/engine/src/aggregate.rs
//! PURPOSE: Computes the column sum stored in the shared aggregate row.
//! CONTEXT: Every computation rescans all data rows. Totals written earlier
//! for other columns stay in the aggregate row until recomputed.

use log::debug;

use crate::cell::CellValue;
use crate::columns::ColumnRegistry;
use crate::error::{StagingError, StagingResult};
use crate::rows::RowStore;

/// Sums the numeric cells of one column across all non-aggregate rows.
/// Returns `None` when the column holds no numeric cell at all.
pub fn column_total(rows: &RowStore, column_index: usize) -> Option<f64> {
    let mut total = 0.0;
    let mut has_number = false;

    for row in rows.data_rows() {
        if let Some(value) = row.get(column_index).as_number() {
            total += value;
            has_number = true;
        }
    }

    has_number.then_some(total)
}

/// Sums column `column_index` and writes the result into the aggregate row.
///
/// Fails with `EmptyAggregate` (leaving the store untouched) when no numeric
/// value exists in that column.
pub fn compute_sum(
    columns: &ColumnRegistry,
    rows: &mut RowStore,
    column_index: usize,
) -> StagingResult<f64> {
    if columns.by_index(column_index).is_none() {
        return Err(StagingError::column_index(column_index, columns.len()));
    }

    let total = column_total(rows, column_index).ok_or(StagingError::EmptyAggregate {
        column: column_index,
    })?;

    rows.upsert_aggregate_row(column_index, CellValue::Number(total), columns.len());
    debug!("aggregate row column {} = {}", column_index, total);
    Ok(total)
}
