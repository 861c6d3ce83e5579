//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for SheetStage integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook as XlsxWorkbook;
use sheetstage_lib::persistence::upload_file;
use sheetstage_lib::{create_app_state, AppConfig, AppState, LoadResult, TableView};
use std::path::PathBuf;
use tempfile::TempDir;

/// Cell written into a fixture workbook.
pub enum Fixture {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// Test harness owning a temporary root for uploads, output and preferences.
pub struct TestHarness {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestHarness {
    /// Create a new test harness with no dataset loaded.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::rooted_at(dir.path());
        config.ensure_dirs().unwrap();
        TestHarness {
            state: create_app_state(config),
            dir,
        }
    }

    /// Create a harness with the inventory sample uploaded.
    ///
    /// Columns: Item, Qty, Price, Note. A title line sits above the header.
    pub fn with_sample_data() -> Self {
        let harness = Self::new();
        let path = harness.write_sample_workbook();
        harness.upload(&path);
        harness
    }

    /// Fresh application state sharing this harness's directories, as after
    /// a restart.
    pub fn reopen(&self) -> AppState {
        create_app_state(self.state.config.clone())
    }

    pub fn write_sample_workbook(&self) -> PathBuf {
        use Fixture::*;
        self.write_workbook(
            "inventory.xlsx",
            &[vec![Text("Inventory")], vec![]],
            &["Item", "Qty", "Price", "Note"],
            &[
                vec![Text("Bolt"), Number(10.0), Number(0.25), Blank],
                vec![Text("Nut"), Number(20.0), Number(0.1), Text("bulk")],
                vec![Text("Washer"), Text("n/a"), Number(0.05), Blank],
            ],
        )
    }

    /// Writes a workbook with `preamble` lines, a header row and data rows.
    pub fn write_workbook(
        &self,
        name: &str,
        preamble: &[Vec<Fixture>],
        headers: &[&str],
        rows: &[Vec<Fixture>],
    ) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut xlsx = XlsxWorkbook::new();
        let sheet = xlsx.add_worksheet();

        let mut row_num = 0u32;
        for line in preamble.iter() {
            write_line(sheet, row_num, line);
            row_num += 1;
        }
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(row_num, col as u16, *header).unwrap();
        }
        row_num += 1;
        for line in rows {
            write_line(sheet, row_num, line);
            row_num += 1;
        }

        xlsx.save(&path).unwrap();
        path
    }

    pub fn upload(&self, path: &PathBuf) -> LoadResult {
        upload_file(&self.state, path).unwrap()
    }

    pub fn view(&self) -> TableView {
        sheetstage_lib::commands::get_table_view(&self.state).unwrap()
    }

    /// Position of the column currently named `name`.
    pub fn position(&self, name: &str) -> usize {
        self.view()
            .columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.position)
            .unwrap()
    }

    /// Display values of every row, selected columns only.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.view().rows.into_iter().map(|r| r.cells).collect()
    }
}

fn write_line(sheet: &mut rust_xlsxwriter::Worksheet, row: u32, line: &[Fixture]) {
    for (col, cell) in line.iter().enumerate() {
        match cell {
            Fixture::Text(s) => {
                sheet.write_string(row, col as u16, *s).unwrap();
            }
            Fixture::Number(n) => {
                sheet.write_number(row, col as u16, *n).unwrap();
            }
            Fixture::Blank => {}
        }
    }
}
