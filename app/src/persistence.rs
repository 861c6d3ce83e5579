//! FILENAME: app/src/persistence.rs
// PURPOSE: File commands - upload a workbook, generate the report, locate a download.

use crate::api_types::{LoadResult, ReportResult, TableView};
use crate::commands::report_error;
use crate::logging::{log_enter, log_exit, log_info};
use crate::AppState;
use persistence::{read_dataset, resolve_artifact, stage_upload, write_report};
use std::path::{Path, PathBuf};

/// Copies the workbook into the upload directory, parses it and loads it
/// into the session. Any stored column layout is applied.
pub fn upload_file(state: &AppState, path: &Path) -> Result<LoadResult, String> {
    log_enter!("FILE", "upload_file", "path={:?}", path);

    let staged = stage_upload(&state.config.upload_dir, path).map_err(|e| e.to_string())?;
    let table = read_dataset(&staged).map_err(|e| e.to_string())?;

    let mut session = state.session.lock().map_err(|e| e.to_string())?;
    let outcome = session.load(&table.headers, &table.rows);

    log_exit!(
        "FILE",
        "upload_file",
        "columns={} rows={} layout_applied={}",
        outcome.column_count,
        outcome.row_count,
        outcome.preference_applied
    );

    Ok(LoadResult {
        column_count: outcome.column_count,
        row_count: outcome.row_count,
        preference_applied: outcome.preference_applied,
        view: TableView::from_session(&session),
    })
}

/// Projects the staged table and writes it as a report into the output
/// directory.
pub fn generate_report(state: &AppState) -> Result<ReportResult, String> {
    log_enter!("FILE", "generate_report");

    let table = {
        let session = state.session.lock().map_err(|e| e.to_string())?;
        session
            .project()
            .map_err(|e| report_error("generate_report", e))?
    };

    let id = write_report(&state.config.output_dir, &table).map_err(|e| e.to_string())?;
    let path = state.config.output_dir.join(id.as_str());
    *state.last_artifact.lock().map_err(|e| e.to_string())? = Some(id.to_string());

    log_info!("FILE", "report written to {:?}", path);
    Ok(ReportResult {
        artifact: id.to_string(),
        path: path.to_string_lossy().into_owned(),
    })
}

/// Location of a previously generated report.
pub fn download_path(state: &AppState, artifact: &str) -> Result<PathBuf, String> {
    resolve_artifact(&state.config.output_dir, artifact).map_err(|e| e.to_string())
}
