//! FILENAME: app/src/api_types.rs
// PURPOSE: View model handed to the presentation layer.
// CONTEXT: Built fresh from the session after every command. Cells are
// already rendered to display strings; only selected columns appear in rows.

use engine::StagingSession;
use serde::{Deserialize, Serialize};

/// Label shown in the sum picker when no column is selected.
pub const NO_COLUMN_LABEL: &str = "No column selected";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub position: usize,
    pub name: String,
    pub index: usize,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub position: usize,
    pub id: u64,
    pub aggregate: bool,
    /// The aggregate row offers no delete action.
    pub deletable: bool,
    pub cells: Vec<String>,
}

/// One entry of the sum picker. `index` is None for the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SumOption {
    pub index: Option<usize>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub sum_options: Vec<SumOption>,
}

impl TableView {
    pub fn from_session(session: &StagingSession) -> Self {
        let columns = session
            .columns()
            .iter()
            .enumerate()
            .map(|(position, c)| ColumnView {
                position,
                name: c.name.clone(),
                index: c.index,
                selected: c.selected,
            })
            .collect();

        let rows = session
            .rows()
            .iter()
            .enumerate()
            .map(|(position, row)| RowView {
                position,
                id: row.id.0,
                aggregate: row.aggregate,
                deletable: !row.aggregate,
                cells: session
                    .columns()
                    .selected_in_order()
                    .map(|c| row.get(c.index).display_value())
                    .collect(),
            })
            .collect();

        let mut sum_options: Vec<SumOption> = session
            .sum_candidates()
            .into_iter()
            .map(|(index, label)| SumOption {
                index: Some(index),
                label,
            })
            .collect();
        if sum_options.is_empty() {
            sum_options.push(SumOption {
                index: None,
                label: NO_COLUMN_LABEL.to_string(),
            });
        }

        TableView {
            columns,
            rows,
            sum_options,
        }
    }

    /// Headers of the selected columns, as rendered above the rows.
    pub fn visible_headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// Result of loading a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub column_count: usize,
    pub row_count: usize,
    pub preference_applied: bool,
    pub view: TableView,
}

/// Result of generating a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    pub artifact: String,
    pub path: String,
}
