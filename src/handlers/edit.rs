//! Handler for the `edit` command.

use super::render::RenderMode;
use anyhow::{bail, Result};
use colored::Colorize;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::resolver::short_id;
use taskboard::engine::TaskPatch;

/// Applies a partial edit to one task.
///
/// # Errors
/// Returns error if nothing was requested, the reference does not resolve,
/// or the edit is rejected.
pub fn handle(config: &StoreConfig, task_ref: &str, patch: &TaskPatch, strict: bool) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to change. Pass --title, --description, --status or --priority.");
    }

    let mut board = super::open_board(config)?;
    let id = super::resolve_id(&board, task_ref, strict)?;

    board.view_mut().set_mode(RenderMode::Summary);
    board.update(&id, patch)?;
    println!("{} Updated task [{}]", "✓".green(), short_id(&id).yellow());
    Ok(())
}
