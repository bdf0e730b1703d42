// 🗄️ Key-Value Persistence Collaborators - The localStorage seam
// The core only ever reads/writes one string value under one key

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// COLLABORATOR TRAIT
// ============================================================================

/// Durable string key-value storage. Synchronous and blocking from the
/// core's perspective; failures are recoverable errors, never fatal.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// SQLITE-BACKED STORE
// ============================================================================

/// Production collaborator: a single `kv` table in SQLite with WAL mode
/// for crash recovery.
pub struct SqliteKeyValue {
    conn: Connection,
}

impl SqliteKeyValue {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open database: {:?}", path.as_ref()))?;
        Self::setup(conn)
    }

    /// In-memory SQLite database, handy for throwaway runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::setup(conn)
    }

    fn setup(conn: Connection) -> Result<Self> {
        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(SqliteKeyValue { conn })
    }
}

impl KeyValueStore for SqliteKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;

        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .with_context(|| format!("Failed to write key: {}", key))?;
        Ok(())
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Volatile collaborator for tests and in-process servers.
#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    values: HashMap<String, String>,
}

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with a persisted payload under test.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_missing_is_none() {
        let store = MemoryKeyValue::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_memory_set_then_get() {
        let mut store = MemoryKeyValue::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_sqlite_roundtrip_and_overwrite() {
        let mut store = SqliteKeyValue::open_in_memory().unwrap();
        assert_eq!(store.get("registrations").unwrap(), None);

        store.set("registrations", "[]").unwrap();
        assert_eq!(store.get("registrations").unwrap().as_deref(), Some("[]"));

        store.set("registrations", "[{}]").unwrap();
        assert_eq!(store.get("registrations").unwrap().as_deref(), Some("[{}]"));
    }
}
