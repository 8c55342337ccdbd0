use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;

/// Key-value store on top of SQLite
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Survives crashes better than a hand-rolled JSON file
/// - Doesn't require a separate process
///
/// Values are opaque strings (the core crate stores JSON); `cached_at`
/// travels alongside so freshness can be judged without parsing the value.
pub struct CacheStore {
    conn: Connection,
}

impl CacheStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS cache (
                key TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                cached_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Fetch a value and the epoch-millis timestamp it was stored with.
    pub fn get(&self, key: &str) -> Result<Option<(String, i64)>> {
        let row = self
            .conn
            .query_row(
                "SELECT data, cached_at FROM cache WHERE key = ?1",
                [key],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;
        Ok(row)
    }

    /// Upsert a value. Entries are always overwritten wholesale, never merged.
    pub fn put(&self, key: &str, data: &str, cached_at: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO cache (key, data, cached_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, data, cached_at],
        )?;
        debug!("cached {} bytes under '{}'", data.len(), key);
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM cache WHERE key = ?1", [key])?;
        Ok(())
    }
}
