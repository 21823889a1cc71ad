//! Handler for the `rm` command.

use super::render::RenderMode;
use anyhow::Result;
use colored::Colorize;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::resolver::short_id;

/// Deletes one task.
///
/// # Errors
/// Returns error if the reference does not resolve or saving fails.
pub fn handle(config: &StoreConfig, task_ref: &str, strict: bool) -> Result<()> {
    let mut board = super::open_board(config)?;
    let id = super::resolve_id(&board, task_ref, strict)?;

    board.view_mut().set_mode(RenderMode::Summary);
    let task = board.remove(&id)?;
    println!(
        "{} Removed task [{}] {}",
        "✗".red(),
        short_id(task.id()).dimmed(),
        task.title()
    );
    Ok(())
}
