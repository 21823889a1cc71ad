//! Command handlers. Each opens the board, runs one operation and prints.

pub mod add;
pub mod edit;
pub mod init;
pub mod list;
pub mod move_task;
pub mod remove;
pub mod render;
pub mod show;
pub mod stats;

use anyhow::{Context, Result};
use render::TerminalView;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::db::Db;
use taskboard::engine::resolver::TaskResolver;
use taskboard::engine::store::SqliteStore;
use taskboard::engine::TaskManager;

pub type Board = TaskManager<SqliteStore, TerminalView>;

/// Opens the board with a silent view; handlers pick the render mode.
///
/// # Errors
/// Returns error if the database is missing or seeding cannot be saved.
pub fn open_board(config: &StoreConfig) -> Result<Board> {
    let conn = Db::connect(config)?;
    TaskManager::open(SqliteStore::new(conn), TerminalView::silent(), config)
        .context("Failed to open task board")
}

/// Resolves a task reference to an owned id.
///
/// # Errors
/// Returns error if no task matches.
pub fn resolve_id(board: &Board, task_ref: &str, strict: bool) -> Result<String> {
    let resolver = if strict {
        TaskResolver::strict(board.tasks())
    } else {
        TaskResolver::new(board.tasks())
    };
    let result = resolver.resolve(task_ref)?;
    if result.confidence < 1.0 {
        tracing::info!(
            query = task_ref,
            confidence = result.confidence,
            "fuzzy match: {}",
            result.task.title()
        );
    }
    Ok(result.task.id().to_string())
}
