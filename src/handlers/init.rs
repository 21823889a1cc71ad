//! Handler for the `init` command.

use anyhow::Result;
use colored::Colorize;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::db::Db;

/// Creates the data directory and database, seeding sample tasks if empty.
///
/// # Errors
/// Returns error if database initialization fails.
pub fn handle(config: &StoreConfig) -> Result<()> {
    Db::init(config)?;
    let board = super::open_board(config)?;
    println!(
        "{} Initialized {} ({} tasks)",
        "✓".green(),
        config.db_path().display(),
        board.tasks().len()
    );
    Ok(())
}
