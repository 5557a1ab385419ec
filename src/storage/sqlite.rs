//! SQLite backend — one `kv_store` table.
//!
//! Behind the `sqlite-store` feature (on by default).

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};

use super::backend::KeyValueStore;
use crate::errors::{ByoaiError, Result};

/// A `KeyValueStore` backed by a SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)
            .map_err(|e| ByoaiError::StorageRead(format!("open {}: {e}", path.display())))?;

        // Set restrictive permissions on the database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(path, perms);
        }

        Self::init(conn)
    }

    /// A private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ByoaiError::StorageRead(format!("open in-memory: {e}")))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| ByoaiError::StorageWrite(format!("create table: {e}")))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .lock()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                rusqlite::params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ByoaiError::StorageRead(format!("get: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .lock()
            .execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, value],
            )
            .map_err(|e| ByoaiError::StorageWrite(format!("set: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .lock()
            .execute("DELETE FROM kv_store WHERE key = ?1", rusqlite::params![key])
            .map_err(|e| ByoaiError::StorageWrite(format!("remove: {e}")))?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare("SELECT key FROM kv_store ORDER BY key")
            .map_err(|e| ByoaiError::StorageRead(format!("keys prepare: {e}")))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ByoaiError::StorageRead(format!("keys query: {e}")))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ByoaiError::StorageRead(format!("keys row: {e}")))
    }
}
