//! Taskboard: a local task list with filtering, search, sorting and manual
//! ordering, persisted as a single JSON value in a key-value store.

pub mod engine;
