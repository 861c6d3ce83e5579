//! FILENAME: core/engine/src/snapshot.rs
//! PURPOSE: Holds the originally loaded dataset for a full reset.
//! CONTEXT: The snapshot owns value copies of the registry and row store.
//! Nothing outside this module can reach into them, so later edits to the
//! live structures never leak into the restored state.

use crate::columns::ColumnRegistry;
use crate::error::{StagingError, StagingResult};
use crate::rows::RowStore;

#[derive(Debug, Clone)]
struct Snapshot {
    columns: ColumnRegistry,
    rows: RowStore,
}

#[derive(Debug, Default)]
pub struct SnapshotManager {
    original: Option<Snapshot>,
}

impl SnapshotManager {
    pub fn new() -> Self {
        SnapshotManager { original: None }
    }

    /// Stores a deep copy of the freshly loaded state, replacing any prior one.
    pub fn capture(&mut self, columns: &ColumnRegistry, rows: &RowStore) {
        self.original = Some(Snapshot {
            columns: columns.clone(),
            rows: rows.clone(),
        });
    }

    pub fn has_snapshot(&self) -> bool {
        self.original.is_some()
    }

    /// Returns fresh copies of the captured state for the caller to install.
    pub fn restore(&self) -> StagingResult<(ColumnRegistry, RowStore)> {
        let snapshot = self.original.as_ref().ok_or(StagingError::NoSnapshot)?;
        Ok((snapshot.columns.clone(), snapshot.rows.clone()))
    }
}
