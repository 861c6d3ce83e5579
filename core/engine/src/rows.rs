//! FILENAME: core/engine/src/rows.rs
//! PURPOSE: The Row Store - ordered data rows plus at most one aggregate row.
//! CONTEXT: Cells inside a row are addressed by the column's stable index,
//! never by its display position. Every row gets a `RowId` when inserted so
//! a delayed deletion can be completed idempotently.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{StagingError, StagingResult};

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Identity of a row within one store. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// One cell per source column, indexed by `ColumnDescriptor::index`.
    pub cells: Vec<CellValue>,
    /// Marks the synthetic row holding computed sums.
    pub aggregate: bool,
}

impl Row {
    /// Cell at a stable column index, or `Empty` if the row is short.
    pub fn get(&self, column_index: usize) -> &CellValue {
        self.cells.get(column_index).unwrap_or(&EMPTY_CELL)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
    next_id: u64,
}

impl RowStore {
    pub fn new() -> Self {
        RowStore {
            rows: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replaces every row with fresh copies of `rows`, none marked aggregate.
    /// Rows shorter than `column_count` are padded with `Empty`.
    pub fn load(&mut self, rows: &[Vec<CellValue>], column_count: usize) {
        self.rows.clear();
        for source in rows {
            let mut cells = source.clone();
            if cells.len() < column_count {
                cells.resize(column_count, CellValue::Empty);
            }
            let id = self.allocate_id();
            self.rows.push(Row {
                id,
                cells,
                aggregate: false,
            });
        }
    }

    /// The id the next inserted row will receive.
    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Gives every row a fresh id numbered from at least `floor`.
    /// Used after a restore so ids handed out earlier cannot match restored rows.
    pub(crate) fn renumber_from(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor);
        for position in 0..self.rows.len() {
            let id = self.allocate_id();
            self.rows[position].id = id;
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    pub fn position_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Rows that are not the aggregate row, in order.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.aggregate)
    }

    pub fn aggregate_row(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.aggregate)
    }

    /// Cell value at (row position, stable column index).
    /// Returns `Empty` for absent rows or cells.
    pub fn get(&self, position: usize, column_index: usize) -> &CellValue {
        self.rows
            .get(position)
            .map(|r| r.get(column_index))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Deletes the row at `position` and returns it.
    pub fn remove(&mut self, position: usize) -> StagingResult<Row> {
        if position >= self.rows.len() {
            return Err(StagingError::row_position(position, self.rows.len()));
        }
        Ok(self.rows.remove(position))
    }

    /// Deletes the row with the given identity if it is still present.
    /// A second call for the same id is a no-op and returns false.
    pub fn remove_by_id(&mut self, id: RowId) -> bool {
        match self.position_of(id) {
            Some(position) => {
                self.rows.remove(position);
                true
            }
            None => false,
        }
    }

    /// Writes `value` into the aggregate row at `column_index`, appending a
    /// blank aggregate row first if none exists. Other cells of an existing
    /// aggregate row are left untouched.
    pub fn upsert_aggregate_row(&mut self, column_index: usize, value: CellValue, column_count: usize) {
        let position = match self.rows.iter().position(|r| r.aggregate) {
            Some(position) => position,
            None => {
                let id = self.allocate_id();
                self.rows.push(Row {
                    id,
                    cells: vec![CellValue::Empty; column_count],
                    aggregate: true,
                });
                self.rows.len() - 1
            }
        };

        let row = &mut self.rows[position];
        if row.cells.len() <= column_index {
            row.cells.resize(column_index + 1, CellValue::Empty);
        }
        row.cells[column_index] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn sample() -> RowStore {
        let mut store = RowStore::new();
        store.load(&[vec![n(1.0), n(2.0), n(3.0)], vec![n(4.0), n(5.0), n(6.0)]], 3);
        store
    }

    #[test]
    fn load_copies_rows_without_aggregate() {
        let store = sample();
        assert_eq!(store.len(), 2);
        assert!(store.aggregate_row().is_none());
        assert_eq!(store.get(1, 2), &n(6.0));
    }

    #[test]
    fn load_pads_short_rows() {
        let mut store = RowStore::new();
        store.load(&[vec![n(1.0)]], 3);
        assert_eq!(store.row(0).unwrap().cells.len(), 3);
        assert_eq!(store.get(0, 2), &CellValue::Empty);
    }

    #[test]
    fn get_returns_empty_for_absent_cells() {
        let store = sample();
        assert_eq!(store.get(0, 10), &CellValue::Empty);
        assert_eq!(store.get(10, 0), &CellValue::Empty);
    }

    #[test]
    fn remove_deletes_by_position() {
        let mut store = sample();
        let removed = store.remove(0).unwrap();
        assert_eq!(removed.cells[0], n(1.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0, 0), &n(4.0));
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut store = sample();
        assert!(matches!(
            store.remove(2),
            Err(StagingError::OutOfRangePosition { position: 2, len: 2, .. })
        ));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_by_id_is_idempotent() {
        let mut store = sample();
        let id = store.row(0).unwrap().id;
        assert!(store.remove_by_id(id));
        assert!(!store.remove_by_id(id));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0, 0), &n(4.0));
    }

    #[test]
    fn ids_are_not_reused_after_reload() {
        let mut store = sample();
        let first = store.row(0).unwrap().id;
        store.load(&[vec![n(9.0)]], 1);
        assert_ne!(store.row(0).unwrap().id, first);
        assert!(!store.remove_by_id(first));
    }

    #[test]
    fn renumbering_issues_fresh_ids() {
        let mut store = sample();
        let old: Vec<RowId> = store.iter().map(|r| r.id).collect();
        store.renumber_from(100);
        let new: Vec<RowId> = store.iter().map(|r| r.id).collect();
        assert_eq!(new, vec![RowId(100), RowId(101)]);
        assert!(old.iter().all(|id| store.position_of(*id).is_none()));
        assert_eq!(store.next_id(), 102);
    }

    #[test]
    fn upsert_appends_once_then_updates_in_place() {
        let mut store = sample();
        store.upsert_aggregate_row(0, n(5.0), 3);
        store.upsert_aggregate_row(2, n(9.0), 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.iter().filter(|r| r.aggregate).count(), 1);
        let aggregate = store.aggregate_row().unwrap();
        assert_eq!(aggregate.cells, vec![n(5.0), CellValue::Empty, n(9.0)]);
        assert!(store.row(2).unwrap().aggregate);
        assert_eq!(store.data_rows().count(), 2);
    }
}
