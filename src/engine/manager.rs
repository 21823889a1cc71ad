//! Task Manager: the in-memory collection, its view state and persistence.
//!
//! Every mutation is written through to the store before it returns and is
//! followed by a view refresh. If the write fails the in-memory change is
//! rolled back, so memory and storage never disagree.

use super::config::StoreConfig;
use super::error::{LoadError, ManagerError, StoreError};
use super::seed::sample_tasks;
use super::stats::TaskStats;
use super::store::KvStore;
use super::task::{Task, TaskPatch, TaskRecord};
use super::types::{SortKey, StatusFilter};
use super::view::{normalize_search, View, ViewState};
use std::collections::HashSet;

pub struct TaskManager<S: KvStore, V: View> {
    store: S,
    view: V,
    key: String,
    backup_key: String,
    tasks: Vec<Task>,
    state: ViewState,
}

impl<S: KvStore, V: View> TaskManager<S, V> {
    /// Loads the collection from `store`, seeding sample tasks when nothing
    /// usable is stored.
    ///
    /// # Errors
    /// Returns an error only if seeded tasks cannot be written back.
    pub fn open(store: S, view: V, config: &StoreConfig) -> Result<Self, StoreError> {
        let mut manager = Self {
            store,
            view,
            key: config.key.clone(),
            backup_key: config.backup_key(),
            tasks: Vec::new(),
            state: ViewState::default(),
        };

        match manager.load_counting_skipped() {
            Ok((tasks, skipped)) => {
                tracing::debug!(count = tasks.len(), skipped, "loaded tasks");
                if skipped > 0 {
                    // Skipped records vanish on the next save.
                    manager.backup_raw();
                }
                manager.tasks = tasks;
            }
            Err(err) => {
                tracing::warn!(error = %err, "no usable task data, seeding samples");
                if matches!(err, LoadError::Malformed(_)) {
                    manager.backup_raw();
                }
                manager.seed()?;
            }
        }

        manager.refresh();
        Ok(manager)
    }

    /// Appends a task to the end of the collection.
    ///
    /// # Errors
    /// Returns `ManagerError::Storage` if the collection cannot be saved.
    pub fn add(&mut self, task: Task) -> Result<(), ManagerError> {
        tracing::debug!(id = task.id(), title = task.title(), "adding task");
        self.tasks.push(task);
        if let Err(err) = self.save() {
            self.tasks.pop();
            return Err(err.into());
        }
        self.refresh();
        Ok(())
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Applies `patch` to the task with `id`.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id, `Validation` if the patch is
    /// rejected (the task is left unchanged), or `Storage` if saving fails.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<(), ManagerError> {
        let index = self.index_of(id)?;
        let previous = self.tasks[index].clone();
        self.tasks[index].update(patch)?;

        if let Err(err) = self.save() {
            self.tasks[index] = previous;
            return Err(err.into());
        }
        tracing::debug!(id, "updated task");
        self.refresh();
        Ok(())
    }

    /// Removes the task with `id` and returns it.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown id or `Storage` if saving fails.
    pub fn remove(&mut self, id: &str) -> Result<Task, ManagerError> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);

        if let Err(err) = self.save() {
            self.tasks.insert(index, task);
            return Err(err.into());
        }
        tracing::debug!(id, "removed task");
        self.refresh();
        Ok(task)
    }

    /// Swaps the positions of two tasks and switches to manual order.
    ///
    /// Returns `Ok(false)` without touching anything when the ids are equal
    /// or either one is unknown.
    ///
    /// # Errors
    /// Returns `Storage` if saving fails; the swap is undone.
    pub fn reorder(&mut self, dragged_id: &str, target_id: &str) -> Result<bool, ManagerError> {
        if dragged_id == target_id {
            return Ok(false);
        }
        let (Ok(from), Ok(to)) = (self.index_of(dragged_id), self.index_of(target_id)) else {
            return Ok(false);
        };

        self.tasks.swap(from, to);
        if let Err(err) = self.save() {
            self.tasks.swap(from, to);
            return Err(err.into());
        }
        tracing::debug!(dragged_id, target_id, "swapped tasks");
        self.state.sort = SortKey::Manual;
        self.refresh();
        Ok(true)
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.state.filter = filter;
        self.refresh();
    }

    /// Sets the search text. It is trimmed and lowercased.
    pub fn set_search(&mut self, text: &str) {
        self.state.search = normalize_search(text);
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
        self.refresh();
    }

    /// Replaces the whole view state with a single refresh.
    pub fn apply_view(&mut self, state: ViewState) {
        self.state = ViewState {
            search: normalize_search(&state.search),
            ..state
        };
        self.refresh();
    }

    /// The visible list: filtered, searched and sorted. Stored order is
    /// never changed by this.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Task> {
        self.state.apply(&self.tasks)
    }

    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// All tasks in stored order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the full collection, in order, under the configured key.
    ///
    /// # Errors
    /// Returns an error if encoding or the store write fails.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let records: Vec<TaskRecord> = self.tasks.iter().map(Task::to_record).collect();
        let json = serde_json::to_string(&records)?;
        self.store.set(&self.key, &json)
    }

    /// Reads the collection from the store.
    ///
    /// Records that fail validation or repeat an earlier id are skipped;
    /// `open` keeps the original value under the backup key when that happens.
    ///
    /// # Errors
    /// Returns `Missing` if nothing is stored, `Malformed` if the stored value
    /// is not a list of task records, or `Store` if the read fails.
    pub fn load(&self) -> Result<Vec<Task>, LoadError> {
        self.load_counting_skipped().map(|(tasks, _)| tasks)
    }

    fn load_counting_skipped(&self) -> Result<(Vec<Task>, usize), LoadError> {
        let raw = self
            .store
            .get(&self.key)?
            .ok_or_else(|| LoadError::Missing(self.key.clone()))?;
        let records: Vec<TaskRecord> = serde_json::from_str(&raw)?;

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for record in records {
            let id = record.id.clone();
            match Task::from_record(record) {
                Ok(task) if seen.insert(id.clone()) => tasks.push(task),
                Ok(_) => {
                    skipped += 1;
                    tracing::warn!(id = %id, "skipping duplicate task id");
                }
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(id = %id, error = %err, "skipping invalid task record");
                }
            }
        }
        Ok((tasks, skipped))
    }

    fn seed(&mut self) -> Result<(), StoreError> {
        // Sample titles are constants, so this never yields an error.
        self.tasks = sample_tasks().unwrap_or_default();
        self.save()?;
        tracing::info!(count = self.tasks.len(), "seeded sample tasks");
        Ok(())
    }

    fn backup_raw(&mut self) {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored data for backup");
                return;
            }
        };
        match self.store.set(&self.backup_key, &raw) {
            Ok(()) => tracing::info!(key = %self.backup_key, "kept original stored data"),
            Err(err) => tracing::warn!(error = %err, "could not back up stored data"),
        }
    }

    fn index_of(&self, id: &str) -> Result<usize, ManagerError> {
        self.tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| ManagerError::NotFound(id.to_string()))
    }

    fn refresh(&mut self) {
        let visible = self.state.apply(&self.tasks);
        let stats = TaskStats::from_tasks(&self.tasks);
        self.view.refresh(&visible, &stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::TaskError;
    use crate::engine::store::MemoryStore;
    use crate::engine::types::{Priority, Status};
    use crate::engine::view::NullView;

    #[derive(Default)]
    struct Recorder {
        refreshes: usize,
        visible: Vec<String>,
        stats: TaskStats,
    }

    impl View for Recorder {
        fn refresh(&mut self, visible: &[&Task], stats: &TaskStats) {
            self.refreshes += 1;
            self.visible = visible.iter().map(|t| t.id().to_string()).collect();
            self.stats = *stats;
        }
    }

    /// A store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl KvStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(rusqlite::Error::InvalidQuery.into());
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    type Manager = TaskManager<MemoryStore, Recorder>;

    fn empty_manager() -> Manager {
        let mut store = MemoryStore::new();
        store.set("tasks", "[]").unwrap();
        TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap()
    }

    fn manager_with(titles: &[&str]) -> (Manager, Vec<String>) {
        let mut manager = empty_manager();
        let mut ids = Vec::new();
        for title in titles {
            let task = Task::with_title(title).unwrap();
            ids.push(task.id().to_string());
            manager.add(task).unwrap();
        }
        (manager, ids)
    }

    fn order(manager: &Manager) -> Vec<String> {
        manager.tasks().iter().map(|t| t.title().to_string()).collect()
    }

    fn stored_titles(store: &MemoryStore) -> Vec<String> {
        let raw = store.get("tasks").unwrap().unwrap();
        let records: Vec<TaskRecord> = serde_json::from_str(&raw).unwrap();
        records.into_iter().map(|r| r.title).collect()
    }

    #[test]
    fn test_empty_store_is_seeded_and_persisted() {
        let manager =
            TaskManager::open(MemoryStore::new(), Recorder::default(), &StoreConfig::default())
                .unwrap();
        assert_eq!(manager.tasks().len(), 6);
        assert_eq!(manager.store().writes(), 1);
        assert_eq!(stored_titles(manager.store()).len(), 6);
        assert_eq!(manager.view().refreshes, 1);
        assert_eq!(manager.view().stats.total, 6);
    }

    #[test]
    fn test_malformed_store_is_backed_up_and_seeded() {
        let mut store = MemoryStore::new();
        store.set("tasks", "{not json").unwrap();
        let manager =
            TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap();
        assert_eq!(manager.tasks().len(), 6);
        assert_eq!(
            manager.store().get("tasks.corrupt").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_stored_empty_list_stays_empty() {
        let manager = empty_manager();
        assert!(manager.tasks().is_empty());
        assert_eq!(manager.stats(), TaskStats::default());
    }

    #[test]
    fn test_load_skips_invalid_records() {
        let good = Task::with_title("keep").unwrap().to_record();
        let mut bad = Task::with_title("drop").unwrap().to_record();
        bad.status = "archived".to_string();
        let duplicate = good.clone();

        let mut store = MemoryStore::new();
        store
            .set("tasks", &serde_json::to_string(&[good, bad, duplicate]).unwrap())
            .unwrap();
        let manager =
            TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap();
        assert_eq!(order(&manager), ["keep"]);
    }

    #[test]
    fn test_skipped_records_are_backed_up_before_save() {
        let good = Task::with_title("keep").unwrap().to_record();
        let mut bad = Task::with_title("precious").unwrap().to_record();
        bad.status = "archived".to_string();
        let raw = serde_json::to_string(&[good, bad]).unwrap();

        let mut store = MemoryStore::new();
        store.set("tasks", &raw).unwrap();
        let mut manager =
            TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap();
        manager.add(Task::with_title("new").unwrap()).unwrap();

        assert_eq!(order(&manager), ["keep", "new"]);
        assert_eq!(
            manager.store().get("tasks.corrupt").unwrap().as_deref(),
            Some(raw.as_str())
        );
    }

    #[test]
    fn test_clean_load_makes_no_backup() {
        let (manager, _) = manager_with(&["one"]);
        let store = manager.store().clone();
        let reloaded =
            TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap();
        assert_eq!(reloaded.store().get("tasks.corrupt").unwrap(), None);
    }

    #[test]
    fn test_add_appends_persists_and_refreshes() {
        let (manager, ids) = manager_with(&["one", "two"]);
        assert_eq!(order(&manager), ["one", "two"]);
        assert_eq!(stored_titles(manager.store()), ["one", "two"]);
        assert_eq!(manager.view().refreshes, 3);
        assert!(manager.view().visible.contains(&ids[1]));
    }

    #[test]
    fn test_reload_preserves_order_and_fields() {
        let (manager, _) = manager_with(&["one", "two", "three"]);
        let store = manager.store().clone();
        let reloaded =
            TaskManager::open(store, Recorder::default(), &StoreConfig::default()).unwrap();
        assert_eq!(reloaded.tasks(), manager.tasks());
    }

    #[test]
    fn test_update_reports_not_found() {
        let (mut manager, _) = manager_with(&["one"]);
        let err = manager
            .update("missing", &TaskPatch::default().title("x"))
            .unwrap_err();
        assert!(matches!(err, ManagerError::NotFound(ref id) if id == "missing"));
    }

    #[test]
    fn test_update_surfaces_validation_error() {
        let (mut manager, ids) = manager_with(&["one"]);
        let writes = manager.store().writes();
        let err = manager
            .update(&ids[0], &TaskPatch::default().title(" ").status(Status::Done))
            .unwrap_err();
        assert!(matches!(err, ManagerError::Validation(TaskError::EmptyTitle)));
        let task = manager.find_by_id(&ids[0]).unwrap();
        assert_eq!(task.status(), Status::ToDo);
        assert_eq!(task.color(), Status::ToDo.color());
        assert_eq!(manager.store().writes(), writes);
    }

    #[test]
    fn test_update_keeps_color_in_sync() {
        let (mut manager, ids) = manager_with(&["one"]);
        manager
            .update(&ids[0], &TaskPatch::default().status(Status::InProgress))
            .unwrap();
        for task in manager.tasks() {
            assert_eq!(task.color(), task.status().color());
        }
        assert_eq!(manager.view().stats.in_progress, 1);
    }

    #[test]
    fn test_remove_then_find() {
        let (mut manager, ids) = manager_with(&["one", "two"]);
        let removed = manager.remove(&ids[0]).unwrap();
        assert_eq!(removed.title(), "one");
        assert!(manager.find_by_id(&ids[0]).is_none());
        assert_eq!(stored_titles(manager.store()), ["two"]);
        assert!(matches!(
            manager.remove(&ids[0]),
            Err(ManagerError::NotFound(_))
        ));
    }

    #[test]
    fn test_reorder_swaps_and_is_involution() {
        let (mut manager, ids) = manager_with(&["a", "b", "c"]);
        assert!(manager.reorder(&ids[0], &ids[2]).unwrap());
        assert_eq!(order(&manager), ["c", "b", "a"]);
        assert_eq!(manager.view_state().sort, SortKey::Manual);
        assert_eq!(stored_titles(manager.store()), ["c", "b", "a"]);

        manager.set_sort(SortKey::TitleAsc);
        assert!(manager.reorder(&ids[0], &ids[2]).unwrap());
        assert_eq!(order(&manager), ["a", "b", "c"]);
        assert_eq!(manager.view_state().sort, SortKey::Manual);
    }

    #[test]
    fn test_reorder_noop_cases() {
        let (mut manager, ids) = manager_with(&["a", "b"]);
        let writes = manager.store().writes();
        assert!(!manager.reorder(&ids[0], &ids[0]).unwrap());
        assert!(!manager.reorder(&ids[0], "missing").unwrap());
        assert!(!manager.reorder("missing", &ids[1]).unwrap());
        assert_eq!(order(&manager), ["a", "b"]);
        assert_eq!(manager.view_state().sort, SortKey::DateDesc);
        assert_eq!(manager.store().writes(), writes);
    }

    #[test]
    fn test_view_state_changes_refresh_without_saving() {
        let (mut manager, _) = manager_with(&["alpha", "beta"]);
        let writes = manager.store().writes();
        let refreshes = manager.view().refreshes;

        manager.set_filter(StatusFilter::Only(Status::Done));
        assert!(manager.filtered().is_empty());
        manager.set_filter(StatusFilter::All);
        manager.set_search("  ALP ");
        assert_eq!(manager.view_state().search, "alp");
        assert_eq!(manager.filtered().len(), 1);
        manager.set_sort(SortKey::TitleDesc);

        assert_eq!(manager.view().refreshes, refreshes + 4);
        assert_eq!(manager.store().writes(), writes);
    }

    #[test]
    fn test_filtered_done_newest_first() {
        let mut manager = empty_manager();
        let now = chrono::Utc::now();
        for (title, status, age) in [
            ("old done", Status::Done, 3),
            ("todo", Status::ToDo, 2),
            ("new done", Status::Done, 1),
        ] {
            let task = Task::create(title, "", status, Priority::Medium)
                .unwrap()
                .created(now - chrono::Duration::hours(age));
            manager.add(task).unwrap();
        }
        manager.apply_view(ViewState::new(Status::Done.into(), "", SortKey::DateDesc));
        let titles: Vec<_> = manager.filtered().iter().map(|t| t.title()).collect();
        assert_eq!(titles, ["new done", "old done"]);
        assert_eq!(order(&manager), ["old done", "todo", "new done"]);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut store = FlakyStore::default();
        store.inner.set("tasks", "[]").unwrap();
        let mut manager =
            TaskManager::open(store, NullView, &StoreConfig::default()).unwrap();
        let task = Task::with_title("kept").unwrap();
        let id = task.id().to_string();
        manager.add(task).unwrap();

        manager.store.fail_writes = true;
        assert!(matches!(
            manager.add(Task::with_title("lost").unwrap()),
            Err(ManagerError::Storage(_))
        ));
        assert!(matches!(
            manager.update(&id, &TaskPatch::default().title("renamed")),
            Err(ManagerError::Storage(_))
        ));
        assert!(matches!(manager.remove(&id), Err(ManagerError::Storage(_))));

        assert_eq!(manager.tasks().len(), 1);
        assert_eq!(manager.tasks()[0].title(), "kept");
    }
}
