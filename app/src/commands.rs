//! FILENAME: app/src/commands.rs
// PURPOSE: Commands exposed to the presentation layer.
// CONTEXT: Each command locks the session, applies one edit and returns the
// refreshed view. Errors are mapped to the message shown to the user.

use crate::api_types::{TableView, NO_COLUMN_LABEL};
use crate::logging::{log_debug, log_enter, log_error, log_exit, log_warn};
use crate::AppState;
use engine::{StagingError, StagingSession};
use std::sync::MutexGuard;

/// Message shown when the sum is requested without a column chosen.
pub const SELECT_COLUMN_MESSAGE: &str = "Please select a column";

// ============================================================================
// HELPERS
// ============================================================================

fn lock_session(state: &AppState) -> Result<MutexGuard<'_, StagingSession>, String> {
    state.session.lock().map_err(|e| e.to_string())
}

/// Programming errors (stale positions) are logged as errors; everything the
/// user can fix is a warning.
pub(crate) fn report_error(func: &str, err: StagingError) -> String {
    if err.is_user_recoverable() {
        log_warn!("CMD", "{} rejected: {}", func, err);
    } else {
        log_error!("CMD", "{} failed: {}", func, err);
    }
    err.to_string()
}

// ============================================================================
// VIEW
// ============================================================================

pub fn get_table_view(state: &AppState) -> Result<TableView, String> {
    let session = lock_session(state)?;
    Ok(TableView::from_session(&session))
}

// ============================================================================
// COLUMN COMMANDS
// ============================================================================

pub fn toggle_column(state: &AppState, position: usize) -> Result<TableView, String> {
    log_enter!("CMD", "toggle_column", "position={}", position);
    let mut session = lock_session(state)?;
    let selected = session
        .toggle_column(position)
        .map_err(|e| report_error("toggle_column", e))?;
    log_exit!("CMD", "toggle_column", "selected={}", selected);
    Ok(TableView::from_session(&session))
}

pub fn rename_column(state: &AppState, position: usize, name: String) -> Result<TableView, String> {
    log_enter!("CMD", "rename_column", "position={} name={:?}", position, name);
    let mut session = lock_session(state)?;
    session
        .rename_column(position, name)
        .map_err(|e| report_error("rename_column", e))?;
    Ok(TableView::from_session(&session))
}

pub fn move_column_up(state: &AppState, position: usize) -> Result<TableView, String> {
    let mut session = lock_session(state)?;
    let moved = session
        .move_column_up(position)
        .map_err(|e| report_error("move_column_up", e))?;
    if !moved {
        log_debug!("CMD", "move_column_up: position {} already first", position);
    }
    Ok(TableView::from_session(&session))
}

pub fn move_column_down(state: &AppState, position: usize) -> Result<TableView, String> {
    let mut session = lock_session(state)?;
    let moved = session
        .move_column_down(position)
        .map_err(|e| report_error("move_column_down", e))?;
    if !moved {
        log_debug!("CMD", "move_column_down: position {} already last", position);
    }
    Ok(TableView::from_session(&session))
}

pub fn select_all_columns(state: &AppState) -> Result<TableView, String> {
    let mut session = lock_session(state)?;
    session.select_all_columns();
    Ok(TableView::from_session(&session))
}

pub fn deselect_all_columns(state: &AppState) -> Result<TableView, String> {
    let mut session = lock_session(state)?;
    session.deselect_all_columns();
    Ok(TableView::from_session(&session))
}

// ============================================================================
// ROW COMMANDS
// ============================================================================

pub fn remove_row(state: &AppState, position: usize) -> Result<TableView, String> {
    log_enter!("CMD", "remove_row", "position={}", position);
    let mut session = lock_session(state)?;
    session
        .remove_row(position)
        .map_err(|e| report_error("remove_row", e))?;
    Ok(TableView::from_session(&session))
}

/// Starts a delayed deletion (the row fades out before it goes). Returns the
/// row id to pass to [`finish_remove_row`].
pub fn begin_remove_row(state: &AppState, position: usize) -> Result<u64, String> {
    let session = lock_session(state)?;
    let id = session
        .begin_row_removal(position)
        .map_err(|e| report_error("begin_remove_row", e))?;
    Ok(id.0)
}

/// Completes a delayed deletion. A row that is already gone is ignored.
pub fn finish_remove_row(state: &AppState, row_id: u64) -> Result<TableView, String> {
    let mut session = lock_session(state)?;
    if !session.complete_row_removal(engine::RowId(row_id)) {
        log_debug!("CMD", "finish_remove_row: row {} already removed", row_id);
    }
    Ok(TableView::from_session(&session))
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// Sums the chosen column (by stable index) into the aggregate row.
/// `None` is the "No column selected" placeholder.
pub fn calculate_sum(state: &AppState, column_index: Option<usize>) -> Result<TableView, String> {
    let Some(column_index) = column_index else {
        log_warn!("CMD", "calculate_sum: {}", NO_COLUMN_LABEL);
        return Err(SELECT_COLUMN_MESSAGE.to_string());
    };

    log_enter!("CMD", "calculate_sum", "column={}", column_index);
    let mut session = lock_session(state)?;
    let total = session
        .calculate_sum(column_index)
        .map_err(|e| report_error("calculate_sum", e))?;
    log_exit!("CMD", "calculate_sum", "total={}", total);
    Ok(TableView::from_session(&session))
}

// ============================================================================
// RESET
// ============================================================================

/// Restores the dataset as loaded, once `confirm` approves the prompt.
/// Returns the view and whether the reset happened.
pub fn reset_all<F>(state: &AppState, confirm: F) -> Result<(TableView, bool), String>
where
    F: FnOnce(&str) -> bool,
{
    log_enter!("CMD", "reset_all");
    let mut session = lock_session(state)?;
    let reset = session
        .reset_all(confirm)
        .map_err(|e| report_error("reset_all", e))?;
    log_exit!("CMD", "reset_all", "reset={}", reset);
    Ok((TableView::from_session(&session), reset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use engine::CellValue;

    fn state() -> AppState {
        let mut session = StagingSession::in_memory();
        session.load(
            &["Name", "Qty"],
            &[
                vec![CellValue::text("a"), CellValue::Number(2.0)],
                vec![CellValue::text("b"), CellValue::Number(3.0)],
            ],
        );
        AppState::with_session(session, crate::config::AppConfig::default())
    }

    #[test]
    fn missing_sum_column_is_rejected() {
        let state = state();
        assert_eq!(calculate_sum(&state, None), Err(SELECT_COLUMN_MESSAGE.to_string()));
    }

    #[test]
    fn stale_position_reports_message() {
        let state = state();
        let err = toggle_column(&state, 7).unwrap_err();
        assert!(err.contains('7'));
    }

    #[test]
    fn delayed_removal_round_trip() {
        let state = state();
        let id = begin_remove_row(&state, 0).unwrap();
        let view = finish_remove_row(&state, id).unwrap();
        assert_eq!(view.rows.len(), 1);
        let view = finish_remove_row(&state, id).unwrap();
        assert_eq!(view.rows.len(), 1);
    }
}
