//! Handler for the `list` command.

use super::render::RenderMode;
use anyhow::Result;
use taskboard::engine::config::StoreConfig;
use taskboard::engine::view::ViewState;
use taskboard::engine::{SortKey, StatusFilter, TaskRecord};

/// Lists the tasks that pass the filter and search, in the requested order.
///
/// # Errors
/// Returns error if the board cannot be opened.
pub fn handle(
    config: &StoreConfig,
    filter: StatusFilter,
    search: &str,
    sort: SortKey,
    json: bool,
) -> Result<()> {
    let mut board = super::open_board(config)?;
    let state = ViewState::new(filter, search, sort);

    if json {
        board.apply_view(state);
        let records: Vec<TaskRecord> = board.filtered().iter().map(|t| t.to_record()).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    board.view_mut().set_mode(RenderMode::Board);
    board.apply_view(state);
    Ok(())
}
