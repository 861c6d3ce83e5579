//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (application host).
// CONTEXT: Owns the staging session behind a Mutex and wires configuration,
// logging and the file-backed preference store around it.

use clap::Parser;
use engine::StagingSession;
use ::persistence::FilePreferenceStore;
use std::sync::Mutex;

pub mod api_types;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod persistence;

pub use api_types::{ColumnView, LoadResult, ReportResult, RowView, SumOption, TableView};
pub use config::AppConfig;
pub use logging::{get_log_path, init_log_file, next_seq, write_log};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    pub session: Mutex<StagingSession>,
    pub config: AppConfig,
    /// Most recently generated report
    pub last_artifact: Mutex<Option<String>>,
}

impl AppState {
    pub fn with_session(session: StagingSession, config: AppConfig) -> Self {
        AppState {
            session: Mutex::new(session),
            config,
            last_artifact: Mutex::new(None),
        }
    }
}

pub fn create_app_state(config: AppConfig) -> AppState {
    log_info!("SYS", "Creating AppState (preferences in {:?})", config.preferences_dir);
    let store = FilePreferenceStore::new(config.preferences_dir.clone());
    AppState::with_session(StagingSession::new(Box::new(store)), config)
}

// ============================================================================
// ENTRY POINT
// ============================================================================

pub fn run() -> Result<(), String> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    logging::install_log_bridge(level);

    let config = AppConfig::load(cli.config.as_deref())?;
    if let Some(log_file) = &config.log_file {
        init_log_file(log_file)?;
    }
    config.ensure_dirs()?;

    let state = create_app_state(config);
    let loaded = persistence::upload_file(&state, &cli.input)?;
    log_info!(
        "SYS",
        "Loaded {:?}: {} columns, {} rows",
        cli.input,
        loaded.column_count,
        loaded.row_count
    );

    if let Err(e) = cli::apply_edits(&state, &cli) {
        log_error!("SYS", "Edit failed: {}", e);
        return Err(e);
    }

    let report = persistence::generate_report(&state)?;
    println!("{}", report.path);
    Ok(())
}
