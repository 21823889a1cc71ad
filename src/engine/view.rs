//! Transient view state and the refresh hook the manager calls.

use super::stats::TaskStats;
use super::task::Task;
use super::types::{SortKey, StatusFilter};
use std::cmp::Ordering;

/// Filter, search and sort selections. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub filter: StatusFilter,
    /// Trimmed, lowercase search text. Empty disables searching.
    pub search: String,
    pub sort: SortKey,
}

impl ViewState {
    #[must_use]
    pub fn new(filter: StatusFilter, search: &str, sort: SortKey) -> Self {
        Self {
            filter,
            search: normalize_search(search),
            sort,
        }
    }

    /// Applies filter, then search, then sort. Never reorders `tasks` itself.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut visible: Vec<&Task> = tasks
            .iter()
            .filter(|t| self.filter.matches(t.status()))
            .filter(|t| t.matches_search(&self.search))
            .collect();

        if self.sort != SortKey::Manual {
            visible.sort_by(|a, b| compare(self.sort, a, b));
        }
        visible
    }
}

pub(crate) fn normalize_search(text: &str) -> String {
    text.trim().to_lowercase()
}

fn compare(key: SortKey, a: &Task, b: &Task) -> Ordering {
    match key {
        SortKey::DateAsc => a.created_at().cmp(&b.created_at()),
        SortKey::DateDesc => b.created_at().cmp(&a.created_at()),
        SortKey::TitleAsc => compare_titles(a, b),
        SortKey::TitleDesc => compare_titles(b, a),
        SortKey::PriorityAsc => a.priority().rank().cmp(&b.priority().rank()),
        SortKey::PriorityDesc => b.priority().rank().cmp(&a.priority().rank()),
        SortKey::Manual => Ordering::Equal,
    }
}

fn compare_titles(a: &Task, b: &Task) -> Ordering {
    a.title()
        .to_lowercase()
        .cmp(&b.title().to_lowercase())
        .then_with(|| a.title().cmp(b.title()))
}

/// Presentation hook. Called after every mutation and view-state change.
pub trait View {
    fn refresh(&mut self, visible: &[&Task], stats: &TaskStats);
}

/// A view that ignores refreshes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {
    fn refresh(&mut self, _visible: &[&Task], _stats: &TaskStats) {}
}
