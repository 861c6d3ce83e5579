//! FILENAME: core/engine/src/columns.rs
//! PURPOSE: The Column Registry - ordered column descriptors.
//! CONTEXT: A descriptor's `index` is the stable identity used to address
//! cells in every row. Its position inside the registry is only the display
//! order, which the user may change freely.

use serde::{Deserialize, Serialize};

use crate::error::{StagingError, StagingResult};

/// Metadata record for one source column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// 0-based source column. Never changes after load.
    pub index: usize,
    pub selected: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        ColumnDescriptor {
            name: name.into(),
            index,
            selected: true,
        }
    }
}

/// Ordered sequence of column descriptors (display order).
///
/// The set of `index` values is always exactly `0..len`; only positions,
/// names and selection flags change after [`ColumnRegistry::load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnRegistry {
    pub fn new() -> Self {
        ColumnRegistry {
            columns: Vec::new(),
        }
    }

    /// Builds one selected descriptor per header, in source order.
    pub fn load<S: AsRef<str>>(&mut self, headers: &[S]) {
        self.columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| ColumnDescriptor::new(h.as_ref(), i))
            .collect();
    }

    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut registry = ColumnRegistry::new();
        registry.load(headers);
        registry
    }

    /// Replaces the descriptors wholesale, e.g. with a stored layout.
    /// The caller is responsible for having validated the index set.
    pub(crate) fn replace(&mut self, columns: Vec<ColumnDescriptor>) {
        self.columns = columns;
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }

    pub fn as_slice(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Display position of the column with the given stable index.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.columns.iter().position(|c| c.index == index)
    }

    /// Descriptor for a stable index, wherever it currently sits.
    pub fn by_index(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.index == index)
    }

    fn get_mut(&mut self, position: usize) -> StagingResult<&mut ColumnDescriptor> {
        let len = self.columns.len();
        self.columns
            .get_mut(position)
            .ok_or(StagingError::column_position(position, len))
    }

    /// Flips the selection flag of the column at `position`.
    /// Returns the new flag.
    pub fn toggle_selected(&mut self, position: usize) -> StagingResult<bool> {
        let column = self.get_mut(position)?;
        column.selected = !column.selected;
        Ok(column.selected)
    }

    pub fn rename(&mut self, position: usize, new_name: impl Into<String>) -> StagingResult<()> {
        self.get_mut(position)?.name = new_name.into();
        Ok(())
    }

    /// Swaps the column with its left neighbor. Returns false at the boundary.
    pub fn move_up(&mut self, position: usize) -> StagingResult<bool> {
        if position >= self.columns.len() {
            return Err(StagingError::column_position(position, self.columns.len()));
        }
        if position == 0 {
            return Ok(false);
        }
        self.columns.swap(position - 1, position);
        Ok(true)
    }

    /// Swaps the column with its right neighbor. Returns false at the boundary.
    pub fn move_down(&mut self, position: usize) -> StagingResult<bool> {
        if position >= self.columns.len() {
            return Err(StagingError::column_position(position, self.columns.len()));
        }
        if position + 1 == self.columns.len() {
            return Ok(false);
        }
        self.columns.swap(position, position + 1);
        Ok(true)
    }

    pub fn select_all(&mut self) {
        self.set_all_selected(true);
    }

    pub fn deselect_all(&mut self) {
        self.set_all_selected(false);
    }

    fn set_all_selected(&mut self, selected: bool) {
        for column in &mut self.columns {
            column.selected = selected;
        }
    }

    /// Selected descriptors in current display order.
    /// Pure read; call again to restart.
    pub fn selected_in_order(&self) -> impl Iterator<Item = &ColumnDescriptor> + Clone + '_ {
        self.columns.iter().filter(|c| c.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_in_order().count()
    }

    /// True when `columns` holds every index in `0..columns.len()` exactly once.
    pub fn is_permutation(columns: &[ColumnDescriptor]) -> bool {
        let mut seen = vec![false; columns.len()];
        for column in columns {
            match seen.get_mut(column.index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}
