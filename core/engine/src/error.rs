//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StagingError {
    /// Export attempted with zero selected columns.
    #[error("Please select at least one column")]
    EmptySelection,

    /// Sum requested on a column without a single numeric cell.
    #[error("No numeric values found in column {column}")]
    EmptyAggregate { column: usize },

    /// Stored column layout does not fit the loaded dataset.
    #[error("Stored column layout has {found} columns, dataset has {expected}")]
    InvalidPreferenceShape { expected: usize, found: usize },

    /// A caller passed a position or index outside the current bounds.
    #[error("{what} {position} out of range (len {len})")]
    OutOfRangePosition {
        what: &'static str,
        position: usize,
        len: usize,
    },

    #[error("No snapshot has been captured")]
    NoSnapshot,

    #[error("Preference store error: {0}")]
    Preference(String),
}

impl StagingError {
    pub(crate) fn column_position(position: usize, len: usize) -> Self {
        StagingError::OutOfRangePosition {
            what: "Column position",
            position,
            len,
        }
    }

    pub(crate) fn column_index(position: usize, len: usize) -> Self {
        StagingError::OutOfRangePosition {
            what: "Column index",
            position,
            len,
        }
    }

    pub(crate) fn row_position(position: usize, len: usize) -> Self {
        StagingError::OutOfRangePosition {
            what: "Row position",
            position,
            len,
        }
    }

    /// True for errors the user can fix by changing their input.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            StagingError::EmptySelection | StagingError::EmptyAggregate { .. }
        )
    }
}

pub type StagingResult<T> = Result<T, StagingError>;
