//! FILENAME: tests/test_columns.rs
//! Integration tests for column selection, renaming and ordering.

mod common;

use common::TestHarness;
use sheetstage_lib::api_types::NO_COLUMN_LABEL;
use sheetstage_lib::commands::{
    deselect_all_columns, move_column_down, move_column_up, rename_column, select_all_columns,
    toggle_column,
};

// ============================================================================
// LOAD
// ============================================================================

#[test]
fn test_upload_detects_header_below_title() {
    let harness = TestHarness::with_sample_data();
    let view = harness.view();

    assert_eq!(view.visible_headers(), vec!["Item", "Qty", "Price", "Note"]);
    assert_eq!(view.rows.len(), 3);
    assert_eq!(harness.cells()[0], vec!["Bolt", "10", "0.25", ""]);
    assert_eq!(harness.cells()[2], vec!["Washer", "n/a", "0.05", ""]);
    assert!(view.columns.iter().enumerate().all(|(i, c)| c.index == i && c.selected));
}

// ============================================================================
// SELECTION
// ============================================================================

#[test]
fn test_toggle_hides_column_cells() {
    let harness = TestHarness::with_sample_data();
    let view = toggle_column(&harness.state, harness.position("Note")).unwrap();

    assert_eq!(view.visible_headers(), vec!["Item", "Qty", "Price"]);
    assert_eq!(view.rows[1].cells, vec!["Nut", "20", "0.1"]);
    assert_eq!(view.sum_options.len(), 3);
}

#[test]
fn test_toggle_twice_restores_selection() {
    let harness = TestHarness::with_sample_data();
    toggle_column(&harness.state, 0).unwrap();
    let view = toggle_column(&harness.state, 0).unwrap();
    assert!(view.columns[0].selected);
}

#[test]
fn test_deselect_all_shows_placeholder() {
    let harness = TestHarness::with_sample_data();
    let view = deselect_all_columns(&harness.state).unwrap();

    assert!(view.visible_headers().is_empty());
    assert!(view.rows.iter().all(|r| r.cells.is_empty()));
    assert_eq!(view.sum_options.len(), 1);
    assert_eq!(view.sum_options[0].index, None);
    assert_eq!(view.sum_options[0].label, NO_COLUMN_LABEL);

    let view = select_all_columns(&harness.state).unwrap();
    assert_eq!(view.visible_headers().len(), 4);
}

#[test]
fn test_toggle_out_of_range_fails_without_change() {
    let harness = TestHarness::with_sample_data();
    let before = harness.view();
    assert!(toggle_column(&harness.state, 4).is_err());
    assert_eq!(harness.view(), before);
}

// ============================================================================
// RENAME & ORDER
// ============================================================================

#[test]
fn test_rename_keeps_cell_association() {
    let harness = TestHarness::with_sample_data();
    let view = rename_column(&harness.state, 1, "Quantity".to_string()).unwrap();

    assert_eq!(view.columns[1].name, "Quantity");
    assert_eq!(view.columns[1].index, 1);
    assert_eq!(view.rows[0].cells[1], "10");
}

#[test]
fn test_move_up_reorders_cells() {
    let harness = TestHarness::with_sample_data();
    let view = move_column_up(&harness.state, harness.position("Price")).unwrap();

    assert_eq!(view.visible_headers(), vec!["Item", "Price", "Qty", "Note"]);
    assert_eq!(view.rows[0].cells, vec!["Bolt", "0.25", "10", ""]);
    assert_eq!(view.columns[1].index, 2);
}

#[test]
fn test_move_at_boundary_is_noop() {
    let harness = TestHarness::with_sample_data();
    let before = harness.view();

    assert_eq!(move_column_up(&harness.state, 0).unwrap(), before);
    assert_eq!(move_column_down(&harness.state, 3).unwrap(), before);
    assert!(move_column_down(&harness.state, 4).is_err());
}

#[test]
fn test_reorder_keeps_index_permutation() {
    let harness = TestHarness::with_sample_data();
    for position in [0, 2, 1, 0, 2, 2, 1] {
        move_column_down(&harness.state, position).unwrap();
    }

    let mut indices: Vec<usize> = harness.view().columns.iter().map(|c| c.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}
