//! FILENAME: core/engine/src/session.rs
//! PURPOSE: The staging session - one loaded dataset and every edit made to it.
//! CONTEXT: Owns the Column Registry, Row Store, Snapshot and Preference
//! Bridge. Each successful edit saves the column layout afterwards; a failed
//! edit changes nothing and saves nothing.

use log::{debug, info, warn};

use crate::aggregate;
use crate::cell::CellValue;
use crate::columns::ColumnRegistry;
use crate::error::{StagingError, StagingResult};
use crate::export::{self, ExportTable};
use crate::preferences::{MemoryPreferenceStore, PreferenceBridge, PreferenceStore};
use crate::rows::{Row, RowId, RowStore};
use crate::snapshot::SnapshotManager;

/// Question shown before a reset discards all edits.
pub const RESET_PROMPT: &str = "This will reset all changes. Continue?";

/// What happened during [`StagingSession::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub column_count: usize,
    pub row_count: usize,
    /// True when a stored column layout was overlaid.
    pub preference_applied: bool,
}

#[derive(Debug)]
pub struct StagingSession {
    columns: ColumnRegistry,
    rows: RowStore,
    snapshot: SnapshotManager,
    preferences: PreferenceBridge,
}

impl StagingSession {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        StagingSession {
            columns: ColumnRegistry::new(),
            rows: RowStore::new(),
            snapshot: SnapshotManager::new(),
            preferences: PreferenceBridge::new(store),
        }
    }

    /// Session backed by a throwaway in-memory preference store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryPreferenceStore::new()))
    }

    pub fn columns(&self) -> &ColumnRegistry {
        &self.columns
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn has_dataset(&self) -> bool {
        self.snapshot.has_snapshot()
    }

    // ========================================================================
    // LOAD
    // ========================================================================

    /// Installs a freshly ingested dataset, captures the snapshot, then
    /// overlays the stored column layout if it fits.
    pub fn load<S: AsRef<str>>(&mut self, headers: &[S], rows: &[Vec<CellValue>]) -> LoadOutcome {
        self.columns.load(headers);
        self.rows.load(rows, headers.len());
        self.snapshot.capture(&self.columns, &self.rows);

        let preference_applied = match self.preferences.load(self.columns.len()) {
            Ok(Some(layout)) => {
                self.columns.replace(layout);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("could not read stored column layout: {}", e);
                false
            }
        };

        self.persist_layout();

        info!(
            "loaded dataset: {} columns, {} rows, stored layout applied: {}",
            self.columns.len(),
            self.rows.len(),
            preference_applied
        );

        LoadOutcome {
            column_count: self.columns.len(),
            row_count: self.rows.len(),
            preference_applied,
        }
    }

    // ========================================================================
    // COLUMN EDITS
    // ========================================================================

    pub fn toggle_column(&mut self, position: usize) -> StagingResult<bool> {
        let selected = self.columns.toggle_selected(position)?;
        self.persist_layout();
        Ok(selected)
    }

    pub fn rename_column(&mut self, position: usize, name: impl Into<String>) -> StagingResult<()> {
        self.columns.rename(position, name)?;
        self.persist_layout();
        Ok(())
    }

    pub fn move_column_up(&mut self, position: usize) -> StagingResult<bool> {
        let moved = self.columns.move_up(position)?;
        if moved {
            self.persist_layout();
        }
        Ok(moved)
    }

    pub fn move_column_down(&mut self, position: usize) -> StagingResult<bool> {
        let moved = self.columns.move_down(position)?;
        if moved {
            self.persist_layout();
        }
        Ok(moved)
    }

    pub fn select_all_columns(&mut self) {
        self.columns.select_all();
        self.persist_layout();
    }

    pub fn deselect_all_columns(&mut self) {
        self.columns.deselect_all();
        self.persist_layout();
    }

    // ========================================================================
    // ROW EDITS
    // ========================================================================

    /// Removes the row at `position` immediately.
    pub fn remove_row(&mut self, position: usize) -> StagingResult<Row> {
        let row = self.rows.remove(position)?;
        debug!("removed row {:?} at position {}", row.id, position);
        self.persist_layout();
        Ok(row)
    }

    /// First half of a delayed deletion: resolves the row's identity while
    /// leaving it in place.
    pub fn begin_row_removal(&self, position: usize) -> StagingResult<RowId> {
        self.rows
            .row(position)
            .map(|r| r.id)
            .ok_or(StagingError::row_position(position, self.rows.len()))
    }

    /// Second half of a delayed deletion. Removing a row that is already gone
    /// is ignored and returns false.
    pub fn complete_row_removal(&mut self, id: RowId) -> bool {
        let removed = self.rows.remove_by_id(id);
        if removed {
            self.persist_layout();
        } else {
            debug!("row {:?} already removed", id);
        }
        removed
    }

    // ========================================================================
    // AGGREGATE
    // ========================================================================

    /// Sums the column with stable index `column_index` into the aggregate row.
    pub fn calculate_sum(&mut self, column_index: usize) -> StagingResult<f64> {
        let total = aggregate::compute_sum(&self.columns, &mut self.rows, column_index)?;
        self.persist_layout();
        Ok(total)
    }

    /// Columns offered for summation: the selected ones, in display order,
    /// as `(stable index, name)` pairs.
    pub fn sum_candidates(&self) -> Vec<(usize, String)> {
        self.columns
            .selected_in_order()
            .map(|c| (c.index, c.name.clone()))
            .collect()
    }

    // ========================================================================
    // RESET & EXPORT
    // ========================================================================

    /// Discards every edit and the stored layout, after `confirm` approves
    /// [`RESET_PROMPT`]. Returns false when the confirmation was declined.
    pub fn reset_all<F>(&mut self, confirm: F) -> StagingResult<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !self.snapshot.has_snapshot() {
            return Err(StagingError::NoSnapshot);
        }
        if !confirm(RESET_PROMPT) {
            debug!("reset declined");
            return Ok(false);
        }

        let id_floor = self.rows.next_id();
        let (columns, mut rows) = self.snapshot.restore()?;
        rows.renumber_from(id_floor);
        self.columns = columns;
        self.rows = rows;

        if let Err(e) = self.preferences.clear() {
            warn!("could not clear stored column layout: {}", e);
        }
        // Rendering the restored table writes the layout again.
        self.persist_layout();

        info!("reset to original dataset");
        Ok(true)
    }

    /// Final table for document generation.
    pub fn project(&self) -> StagingResult<ExportTable> {
        export::project(&self.columns, &self.rows)
    }

    fn persist_layout(&mut self) {
        if let Err(e) = self.preferences.save(&self.columns) {
            warn!("could not save column layout: {}", e);
        }
    }
}
