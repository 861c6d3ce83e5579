//! FILENAME: app/src/config.rs
// PURPOSE: Application configuration (directories and log file).
// CONTEXT: Defaults, then an optional JSON file, then environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_UPLOAD_DIR: &str = "SHEETSTAGE_UPLOAD_DIR";
pub const ENV_OUTPUT_DIR: &str = "SHEETSTAGE_OUTPUT_DIR";
pub const ENV_PREFERENCES_DIR: &str = "SHEETSTAGE_PREFERENCES_DIR";
pub const ENV_LOG_FILE: &str = "SHEETSTAGE_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Where uploaded workbooks are copied before parsing
    pub upload_dir: PathBuf,
    /// Where generated reports are written
    pub output_dir: PathBuf,
    /// Where the column layout preference is kept
    pub preferences_dir: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("output"),
            preferences_dir: PathBuf::from("preferences"),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// All directories placed under one root. Used by tests and portable installs.
    pub fn rooted_at(root: &Path) -> Self {
        AppConfig {
            upload_dir: root.join("uploads"),
            output_dir: root.join("output"),
            preferences_dir: root.join("preferences"),
            log_file: None,
        }
    }

    /// Reads the config file (if given) and applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config {:?}: {}", path, e))?;
                Self::from_json(&text)?
            }
            None => AppConfig::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Applies overrides looked up by variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_UPLOAD_DIR) {
            self.upload_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_PREFERENCES_DIR) {
            self.preferences_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(PathBuf::from(file));
        }
        self
    }

    pub fn ensure_dirs(&self) -> Result<(), String> {
        for dir in [&self.upload_dir, &self.output_dir, &self.preferences_dir] {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create directory {:?}: {}", dir, e))?;
        }
        Ok(())
    }
}
