//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line front end - load a workbook, apply edits, write the report.

use crate::api_types::TableView;
use crate::commands;
use crate::logging::log_info;
use crate::AppState;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetstage")]
#[command(about = "Stage spreadsheet columns and rows, then export a report", long_about = None)]
pub struct Cli {
    /// Workbook to load (first worksheet is used)
    pub input: PathBuf,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide a column by name (repeatable)
    #[arg(long, value_name = "NAME")]
    pub deselect: Vec<String>,

    /// Rename a column (repeatable)
    #[arg(long, value_name = "OLD=NEW", value_parser = parse_rename)]
    pub rename: Vec<(String, String)>,

    /// Add the total of a column to the aggregate row
    #[arg(long, value_name = "NAME")]
    pub sum: Option<String>,

    /// Discard the stored column layout before editing
    #[arg(long)]
    pub reset: bool,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_rename(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((old, new)) if !old.is_empty() => Ok((old.to_string(), new.to_string())),
        _ => Err(format!("expected OLD=NEW, got {:?}", arg)),
    }
}

fn column_position(view: &TableView, name: &str) -> Result<usize, String> {
    view.columns
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.position)
        .ok_or_else(|| format!("No column named {:?}", name))
}

/// Applies the requested edits through the command layer, in the order:
/// reset, deselect, rename, sum.
pub fn apply_edits(state: &AppState, cli: &Cli) -> Result<TableView, String> {
    let mut view = commands::get_table_view(state)?;

    if cli.reset {
        // Passing --reset is the confirmation.
        let (restored, _) = commands::reset_all(state, |prompt| {
            log_info!("CLI", "{} yes", prompt);
            true
        })?;
        view = restored;
    }

    for name in &cli.deselect {
        let position = column_position(&view, name)?;
        if view.columns[position].selected {
            view = commands::toggle_column(state, position)?;
        }
    }

    for (old, new) in &cli.rename {
        let position = column_position(&view, old)?;
        view = commands::rename_column(state, position, new.clone())?;
    }

    if let Some(name) = &cli.sum {
        let index = view
            .columns
            .iter()
            .find(|c| &c.name == name && c.selected)
            .map(|c| c.index);
        view = commands::calculate_sum(state, index)?;
    }

    Ok(view)
}
