//! Database bootstrap: the data directory and the key-value schema.

use super::config::StoreConfig;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;

pub struct Db;

impl Db {
    /// Creates the data directory and database schema if missing.
    ///
    /// # Errors
    /// Returns error if directory creation, DB opening, or migration fails.
    pub fn init(config: &StoreConfig) -> Result<Connection> {
        if !config.dir().exists() {
            fs::create_dir_all(config.dir()).with_context(|| {
                format!("Failed to create {} directory", config.dir().display())
            })?;
        }

        let conn = Connection::open(config.db_path()).context("Failed to open database")?;
        Self::migrate(&conn)?;
        tracing::info!(path = %config.db_path().display(), "database initialized");
        Ok(conn)
    }

    /// Connects to an existing database.
    ///
    /// # Errors
    /// Returns error if the database file does not exist or cannot be opened.
    pub fn connect(config: &StoreConfig) -> Result<Connection> {
        let db_path = config.db_path();
        if !db_path.exists() {
            anyhow::bail!("Task board not initialized. Run `taskboard init` first.");
        }
        let conn = Connection::open(&db_path).context("Failed to open database")?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    /// Opens an in-memory database with the schema applied.
    ///
    /// # Errors
    /// Returns error if the schema cannot be created.
    pub fn in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory().context("Failed to open database")?;
        Self::migrate(&conn)?;
        Ok(conn)
    }

    fn migrate(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT
            )",
            [],
        )
        .context("Failed to create state table")?;
        Ok(())
    }
}
