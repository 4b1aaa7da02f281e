use std::collections::BTreeMap;
use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::migrations::MIGRATIONS;

/// A flat text key-value slot store, the shape of browser `localStorage`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteKv {
    conn: Mutex<Connection>,
    quota: Option<usize>,
}

impl SqliteKv {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        for sql in MIGRATIONS {
            conn.execute(sql, [])?;
        }
        debug!(path = %path.display(), "opened sqlite kv store");

        Ok(Self {
            conn: Mutex::new(conn),
            quota: None,
        })
    }

    /// Caps the total bytes of all keys and values, like a browser storage quota.
    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.quota = limit;
        self
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        if let Some(limit) = self.quota {
            let others: i64 = conn.query_row(
                "SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
                 FROM kv WHERE key != ?1",
                params![key],
                |row| row.get(0),
            )?;
            check_quota(key, others as usize + key.len() + value.len(), limit)?;
        }
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory slots with an optional byte quota across all keys and values.
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            values: Mutex::default(),
            quota: Some(limit),
        }
    }

    #[cfg(test)]
    fn used_bytes(&self) -> usize {
        let values = self.values.lock();
        values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        if let Some(limit) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            check_quota(key, others + key.len() + value.len(), limit)?;
        }
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

fn check_quota(key: &str, needed: usize, limit: usize) -> Result<()> {
    if needed > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_owned(),
            needed,
            limit,
        });
    }
    Ok(())
}
