//! Handler for the `move` command.

use super::render::RenderMode;
use anyhow::Result;
use colored::Colorize;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::resolver::short_id;

/// Swaps two tasks in the stored order and shows the board in manual order.
///
/// # Errors
/// Returns error if a reference does not resolve or saving fails.
pub fn handle(config: &StoreConfig, dragged: &str, target: &str, strict: bool) -> Result<()> {
    let mut board = super::open_board(config)?;
    let dragged_id = super::resolve_id(&board, dragged, strict)?;
    let target_id = super::resolve_id(&board, target, strict)?;

    board.view_mut().set_mode(RenderMode::Board);
    if board.reorder(&dragged_id, &target_id)? {
        println!(
            "{} Swapped [{}] and [{}]",
            "⇅".cyan(),
            short_id(&dragged_id).yellow(),
            short_id(&target_id).yellow()
        );
    } else {
        println!("   (both references point at the same task)");
    }
    Ok(())
}
