//! Handler for the `show` command.

use super::render::swatch;
use anyhow::{Context, Result};
use colored::Colorize;
use taskboard::engine::config::StoreConfig;

/// Prints every field of one task.
///
/// # Errors
/// Returns error if the reference does not resolve.
pub fn handle(config: &StoreConfig, task_ref: &str, strict: bool) -> Result<()> {
    let board = super::open_board(config)?;
    let id = super::resolve_id(&board, task_ref, strict)?;
    let task = board.find_by_id(&id).context("Task vanished while resolving")?;

    println!("{} {}", swatch(task), task.title().bold());
    println!("   Id:       {}", task.id().dimmed());
    println!("   Status:   {} ({})", task.status(), task.color().dimmed());
    println!("   Priority: {}", task.priority());
    println!(
        "   Created:  {}",
        task.created_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    if !task.description().is_empty() {
        println!();
        println!("   {}", task.description());
    }
    Ok(())
}
