//! FILENAME: core/engine/src/preferences.rs
//! PURPOSE: Persists the column layout (order, names, selection) between sessions.
//! CONTEXT: The layout is written as JSON to an external key-value store after
//! every edit, and overlaid on a freshly loaded dataset only when its shape
//! matches. A mismatched or unreadable payload is ignored silently.

use std::collections::HashMap;

use log::{debug, warn};

use crate::columns::{ColumnDescriptor, ColumnRegistry};
use crate::error::{StagingError, StagingResult};

/// Fixed key under which the column layout is stored.
pub const PREFERENCE_KEY: &str = "sheetstage_columns";

pub type PreferenceStoreError = Box<dyn std::error::Error + Send + Sync>;

/// Key-value collaborator holding serialized preferences.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceStoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceStoreError>;
    fn delete(&mut self, key: &str) -> Result<(), PreferenceStoreError>;
}

/// In-memory store, used by tests and headless sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceStoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), PreferenceStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

pub struct PreferenceBridge {
    store: Box<dyn PreferenceStore>,
    key: String,
}

impl PreferenceBridge {
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        PreferenceBridge {
            store,
            key: PREFERENCE_KEY.to_string(),
        }
    }

    pub fn with_key(store: Box<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        PreferenceBridge {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes the whole registry in display order.
    pub fn save(&mut self, columns: &ColumnRegistry) -> StagingResult<()> {
        let payload = serde_json::to_string(columns.as_slice())
            .map_err(|e| StagingError::Preference(e.to_string()))?;
        self.store
            .set(&self.key, &payload)
            .map_err(|e| StagingError::Preference(e.to_string()))
    }

    /// Reads the stored layout if it fits a dataset of `current_column_count`
    /// columns. Absent, unreadable or mismatched payloads yield `Ok(None)`.
    pub fn load(&self, current_column_count: usize) -> StagingResult<Option<Vec<ColumnDescriptor>>> {
        let payload = match self.store.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Ok(None),
            Err(e) => return Err(StagingError::Preference(e.to_string())),
        };

        match parse_layout(&payload, current_column_count) {
            Ok(columns) => Ok(Some(columns)),
            Err(err @ StagingError::InvalidPreferenceShape { .. }) => {
                debug!("ignoring stored column layout: {}", err);
                Ok(None)
            }
            Err(err) => {
                warn!("ignoring unreadable column layout: {}", err);
                Ok(None)
            }
        }
    }

    pub fn clear(&mut self) -> StagingResult<()> {
        self.store
            .delete(&self.key)
            .map_err(|e| StagingError::Preference(e.to_string()))
    }
}

impl std::fmt::Debug for PreferenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceBridge").field("key", &self.key).finish()
    }
}

/// Decodes a stored layout and checks it against the loaded column count.
/// The indices must also cover `0..count` exactly once, otherwise cells
/// could no longer be addressed.
pub fn parse_layout(payload: &str, expected: usize) -> StagingResult<Vec<ColumnDescriptor>> {
    let columns: Vec<ColumnDescriptor> =
        serde_json::from_str(payload).map_err(|e| StagingError::Preference(e.to_string()))?;

    if columns.len() != expected || !ColumnRegistry::is_permutation(&columns) {
        return Err(StagingError::InvalidPreferenceShape {
            expected,
            found: columns.len(),
        });
    }

    Ok(columns)
}
