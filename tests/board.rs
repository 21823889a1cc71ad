//! End-to-end checks of the board against an on-disk SQLite store.

use taskboard::engine::config::StoreConfig;
use taskboard::engine::db::Db;
use taskboard::engine::store::{KvStore, SqliteStore};
use taskboard::engine::view::{NullView, ViewState};
use taskboard::engine::{Priority, SortKey, Status, Task, TaskManager, TaskPatch};

fn open(config: &StoreConfig) -> TaskManager<SqliteStore, NullView> {
    let conn = Db::connect(config).unwrap();
    TaskManager::open(SqliteStore::new(conn), NullView, config).unwrap()
}

#[test]
fn test_first_open_seeds_six_tasks_and_persists_them() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default().with_dir(dir.path());
    Db::init(&config).unwrap();

    let first = open(&config);
    assert_eq!(first.tasks().len(), 6);
    let ids: Vec<_> = first.tasks().iter().map(|t| t.id().to_string()).collect();
    drop(first);

    let second = open(&config);
    let reopened: Vec<_> = second.tasks().iter().map(|t| t.id().to_string()).collect();
    assert_eq!(reopened, ids);
}

#[test]
fn test_mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default().with_dir(dir.path());
    Db::init(&config).unwrap();

    let mut board = open(&config);
    let task = Task::create("Ship it", "tonight", Status::InProgress, Priority::High).unwrap();
    let id = task.id().to_string();
    board.add(task).unwrap();
    board
        .update(&id, &TaskPatch::default().status(Status::Done))
        .unwrap();
    let first = board.tasks()[0].id().to_string();
    assert!(board.reorder(&first, &id).unwrap());
    let expected = board.tasks().to_vec();
    drop(board);

    let mut board = open(&config);
    assert_eq!(board.tasks(), expected.as_slice());
    assert_eq!(board.tasks()[0].title(), "Ship it");
    assert_eq!(board.tasks()[0].color(), Status::Done.color());

    board.apply_view(ViewState::new(Status::Done.into(), "ship", SortKey::DateDesc));
    assert_eq!(board.filtered().len(), 1);
}

#[test]
fn test_corrupt_blob_is_kept_and_board_reseeded() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::default().with_dir(dir.path());
    let mut store = SqliteStore::new(Db::init(&config).unwrap());
    store.set(&config.key, "not json at all").unwrap();
    drop(store);

    let board = open(&config);
    assert_eq!(board.tasks().len(), 6);
    assert_eq!(
        board.store().get(&config.backup_key()).unwrap().as_deref(),
        Some("not json at all")
    );
}
