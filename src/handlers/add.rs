//! Handler for the `add` command.

use super::render::{swatch, RenderMode};
use anyhow::Result;
use colored::Colorize;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::resolver::short_id;
use taskboard::engine::{Priority, Status, Task};

/// Creates a task and appends it to the board.
///
/// # Errors
/// Returns error if the title is blank or the board cannot be saved.
pub fn handle(
    config: &StoreConfig,
    title: &str,
    description: &str,
    status: Status,
    priority: Priority,
) -> Result<()> {
    let mut board = super::open_board(config)?;
    let task = Task::create(title, description, status, priority)?;
    let line = format!(
        "{} Added task {} [{}] {}",
        "✓".green(),
        swatch(&task),
        short_id(task.id()).yellow(),
        task.title()
    );

    board.view_mut().set_mode(RenderMode::Summary);
    board.add(task)?;
    println!("{line}");
    Ok(())
}
