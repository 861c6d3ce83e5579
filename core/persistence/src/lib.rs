//! FILENAME: core/persistence/src/lib.rs
//! SheetStage Persistence Module
//!
//! File collaborators of the staging engine: reading uploaded xlsx workbooks,
//! writing the final report, storing preferences and resolving artifacts.

mod artifacts;
mod error;
mod preference_store;
mod report_writer;
mod xlsx_reader;

pub use artifacts::{resolve_artifact, stage_upload, write_report, ArtifactId, REPORT_EXTENSION};
pub use error::PersistenceError;
pub use preference_store::FilePreferenceStore;
pub use report_writer::{column_widths, write_report_to_path, USABLE_PAGE_WIDTH};
pub use xlsx_reader::{detect_header_row, read_dataset, read_sheet, table_from_grid};

use engine::CellValue;
use serde::{Deserialize, Serialize};

// ============================================================================
// SOURCE TABLE
// ============================================================================

/// Result of ingestion: the detected header row and every row below it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SourceTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{ExportTable, StagingSession};
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};

    #[test]
    fn reads_data_below_detected_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xlsx");

        let mut xlsx = XlsxWorkbook::new();
        let sheet = xlsx.add_worksheet();
        sheet.write_string(0, 0, "Quarterly report").unwrap();
        sheet.write_string(2, 0, "Region").unwrap();
        sheet.write_string(2, 1, "Units").unwrap();
        sheet.write_string(2, 2, "Note").unwrap();
        sheet.write_string(3, 0, "North").unwrap();
        sheet.write_number(3, 1, 12.0).unwrap();
        sheet.write_string(4, 0, "South").unwrap();
        sheet.write_number(4, 1, 7.5).unwrap();
        sheet.write_string(4, 2, "late").unwrap();
        xlsx.save(&path).unwrap();

        let table = read_dataset(&path).unwrap();
        assert_eq!(table.headers, vec!["Region", "Units", "Note"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], CellValue::text("North"));
        assert_eq!(table.rows[0][1], CellValue::Number(12.0));
        assert_eq!(table.rows[0][2], CellValue::Empty);
        assert_eq!(table.rows[1][2], CellValue::text("late"));
    }

    #[test]
    fn dates_and_booleans_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates.xlsx");

        let mut xlsx = XlsxWorkbook::new();
        let sheet = xlsx.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let date = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
        sheet.write_string(0, 0, "Shipped").unwrap();
        sheet.write_string(0, 1, "Paid").unwrap();
        sheet.write_datetime_with_format(1, 0, &date, &date_format).unwrap();
        sheet.write_boolean(1, 1, true).unwrap();
        xlsx.save(&path).unwrap();

        let table = read_dataset(&path).unwrap();
        assert_eq!(
            table.rows,
            vec![vec![CellValue::text("2024-03-01"), CellValue::text("TRUE")]]
        );
    }

    #[test]
    fn blank_leading_columns_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut xlsx = XlsxWorkbook::new();
        let sheet = xlsx.add_worksheet();
        sheet.write_string(0, 1, "H1").unwrap();
        sheet.write_string(0, 2, "H2").unwrap();
        sheet.write_number(1, 1, 5.0).unwrap();
        xlsx.save(&path).unwrap();

        let table = read_dataset(&path).unwrap();
        assert_eq!(table.headers, vec!["", "H1", "H2"]);
        assert_eq!(
            table.rows,
            vec![vec![CellValue::Empty, CellValue::Number(5.0), CellValue::Empty]]
        );
    }

    #[test]
    fn unknown_sheet_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xlsx");
        let mut xlsx = XlsxWorkbook::new();
        xlsx.add_worksheet().write_string(0, 0, "A").unwrap();
        xlsx.save(&path).unwrap();

        assert!(read_sheet(&path, "Sheet1").is_ok());
        assert!(matches!(
            read_sheet(&path, "Missing"),
            Err(PersistenceError::SheetNotFound(_))
        ));
    }

    #[test]
    fn generated_report_reads_back_as_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let table = ExportTable {
            headers: vec!["Item".to_string(), "Qty".to_string()],
            rows: vec![
                vec![CellValue::text("Bolt"), CellValue::Number(10.0)],
                vec![CellValue::Empty, CellValue::Number(10.0)],
            ],
        };

        let id = write_report(dir.path(), &table).unwrap();
        let path = resolve_artifact(dir.path(), id.as_str()).unwrap();
        let read_back = read_dataset(&path).unwrap();

        assert_eq!(read_back.headers, table.headers);
        assert_eq!(read_back.rows, table.rows);
    }

    #[test]
    fn file_preferences_survive_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let headers = ["A", "B", "C"];

        let mut first = StagingSession::new(Box::new(FilePreferenceStore::new(dir.path())));
        first.load(&headers, &[]);
        first.toggle_column(1).unwrap();
        first.move_column_down(0).unwrap();

        let mut second = StagingSession::new(Box::new(FilePreferenceStore::new(dir.path())));
        let outcome = second.load(&headers, &[]);
        assert!(outcome.preference_applied);
        assert_eq!(second.columns(), first.columns());
    }
}
