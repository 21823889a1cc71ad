//! Handler for the `stats` command.

use super::render::print_stats;
use anyhow::Result;
use taskboard::engine::config::StoreConfig;

/// Prints task counts per status.
///
/// # Errors
/// Returns error if the board cannot be opened.
pub fn handle(config: &StoreConfig, json: bool) -> Result<()> {
    let board = super::open_board(config)?;
    let stats = board.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_stats(&stats);
    }
    Ok(())
}
