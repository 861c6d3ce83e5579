//! FILENAME: core/persistence/src/artifacts.rs
//! PURPOSE: Names, stores and resolves uploaded and generated files.
//! CONTEXT: Every file gets a fresh UUID name so concurrent uploads and
//! reports never collide. Artifact ids are plain file names; anything that
//! could escape the directory is rejected.

use crate::report_writer::write_report_to_path;
use crate::PersistenceError;
use engine::ExportTable;
use log::info;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const REPORT_EXTENSION: &str = "xlsx";

/// File name of a generated, downloadable document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn generate(extension: &str) -> Self {
        ArtifactId(format!("{}.{}", Uuid::new_v4(), extension))
    }

    /// Accepts a bare file name only.
    pub fn parse(id: &str) -> Result<Self, PersistenceError> {
        let valid = !id.is_empty()
            && id != "."
            && !id.contains("..")
            && !id.contains('/')
            && !id.contains('\\')
            && !id.contains('\0');
        if valid {
            Ok(ArtifactId(id.to_string()))
        } else {
            Err(PersistenceError::ArtifactNotFound(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates the report for `table` inside `output_dir`.
pub fn write_report(output_dir: &Path, table: &ExportTable) -> Result<ArtifactId, PersistenceError> {
    fs::create_dir_all(output_dir)?;
    let id = ArtifactId::generate(REPORT_EXTENSION);
    let path = output_dir.join(id.as_str());
    write_report_to_path(table, &path)?;
    info!(
        "generated report {} ({} columns, {} rows)",
        id,
        table.column_count(),
        table.rows.len()
    );
    Ok(id)
}

/// Path of an existing artifact inside `output_dir`.
pub fn resolve_artifact(output_dir: &Path, id: &str) -> Result<PathBuf, PersistenceError> {
    let id = ArtifactId::parse(id)?;
    let path = output_dir.join(id.as_str());
    if path.is_file() {
        Ok(path)
    } else {
        Err(PersistenceError::ArtifactNotFound(id.to_string()))
    }
}

/// Copies an uploaded file into `upload_dir` under a fresh name.
pub fn stage_upload(upload_dir: &Path, source: &Path) -> Result<PathBuf, PersistenceError> {
    fs::create_dir_all(upload_dir)?;
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or(REPORT_EXTENSION);
    let target = upload_dir.join(format!("{}.{}", Uuid::new_v4(), extension));
    fs::copy(source, &target)?;
    Ok(target)
}
