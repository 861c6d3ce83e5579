//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the staging engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod aggregate;
pub mod cell;
pub mod columns;
pub mod error;
pub mod export;
pub mod preferences;
pub mod rows;
pub mod session;
pub mod snapshot;

// Re-export commonly used types at the crate root
pub use aggregate::{column_total, compute_sum};
pub use cell::{format_plain_number, CellValue};
pub use columns::{ColumnDescriptor, ColumnRegistry};
pub use error::{StagingError, StagingResult};
pub use export::{project, ExportTable};
pub use preferences::{
    MemoryPreferenceStore, PreferenceBridge, PreferenceStore, PreferenceStoreError, PREFERENCE_KEY,
};
pub use rows::{Row, RowId, RowStore};
pub use session::{LoadOutcome, StagingSession, RESET_PROMPT};
pub use snapshot::SnapshotManager;

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    #[test]
    fn integration_test_full_staging_workflow() {
        let mut session = StagingSession::in_memory();
        session.load(
            &["Item", "Qty", "Price"],
            &[
                vec![CellValue::text("Bolt"), n(10.0), n(0.25)],
                vec![CellValue::text("Nut"), n(20.0), n(0.1)],
                vec![CellValue::text("Washer"), CellValue::text("n/a"), n(0.05)],
            ],
        );

        session.remove_row(2).unwrap();
        session.rename_column(1, "Quantity").unwrap();
        session.move_column_up(2).unwrap();
        session.calculate_sum(1).unwrap();

        let table = session.project().unwrap();
        assert_eq!(table.headers, vec!["Item", "Price", "Quantity"]);
        assert_eq!(
            table.display_rows(),
            vec![
                vec!["Bolt", "0.25", "10"],
                vec!["Nut", "0.1", "20"],
                vec!["", "", "30"],
            ]
        );
    }

    #[test]
    fn integration_test_renaming_keeps_cell_association() {
        let mut session = StagingSession::in_memory();
        session.load(&["A", "B"], &[vec![n(1.0), n(2.0)]]);
        session.rename_column(0, "B").unwrap();
        session.rename_column(1, "A").unwrap();
        session.move_column_down(0).unwrap();

        let table = session.project().unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec![n(2.0), n(1.0)]]);
        assert_eq!(session.columns().get(1).map(|c| c.index), Some(0));
    }
}
