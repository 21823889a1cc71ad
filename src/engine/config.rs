//! Storage configuration.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DIR_ENV: &str = "TASKBOARD_DIR";

const DEFAULT_DIR: &str = ".taskboard";
const DEFAULT_FILE: &str = "state.db";
const DEFAULT_KEY: &str = "tasks";

/// Where and under which key the task collection is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dir: PathBuf,
    pub file: String,
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            file: DEFAULT_FILE.to_string(),
            key: DEFAULT_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults, with the directory taken from `TASKBOARD_DIR` when set.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os(DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::default().with_dir(dir),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Key under which an unreadable blob is kept before reseeding.
    #[must_use]
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }
}
