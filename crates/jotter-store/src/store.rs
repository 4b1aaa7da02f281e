use std::path::Path;

use jotter_core::{Note, ThemePreference};
use tracing::{debug, info};

use crate::backend::{KeyValueStore, MemoryKv, SqliteKv};
use crate::error::{Result, StoreError};

pub const NOTES_KEY: &str = "notes";
pub const DARK_MODE_KEY: &str = "dark-mode";

/// Typed access to the two persisted slots: the note sequence and the theme flag.
pub struct JotterStore {
    backend: Box<dyn KeyValueStore>,
}

impl JotterStore {
    /// Opens the SQLite-backed store, capping its total size at `quota` bytes.
    pub fn open(path: impl AsRef<Path>, quota: Option<usize>) -> Result<Self> {
        let path = path.as_ref();
        let store = Self::with_backend(SqliteKv::open(path)?.with_quota(quota));
        info!(path = %path.display(), ?quota, "note store ready");
        Ok(store)
    }

    pub fn in_memory() -> Self {
        Self::with_backend(MemoryKv::new())
    }

    pub fn with_backend(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Missing and `null` slots both read as an empty notebook.
    pub fn load_notes(&self) -> Result<Vec<Note>> {
        let Some(raw) = self.backend.get(NOTES_KEY)? else {
            return Ok(Vec::new());
        };

        let notes: Option<Vec<Note>> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: NOTES_KEY.to_owned(),
                source,
            })?;
        let notes = notes.unwrap_or_default();
        debug!(count = notes.len(), "loaded notes");
        Ok(notes)
    }

    /// Writes the whole sequence. Nothing is written if serialization fails.
    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        let raw = serde_json::to_string(notes)?;
        self.backend.set(NOTES_KEY, &raw)?;
        debug!(count = notes.len(), bytes = raw.len(), "saved notes");
        Ok(())
    }

    pub fn load_theme(&self) -> Result<ThemePreference> {
        let flag = self.backend.get(DARK_MODE_KEY)?;
        Ok(ThemePreference::from_flag(flag.as_deref()))
    }

    pub fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        self.backend.set(DARK_MODE_KEY, theme.as_flag())
    }

    #[cfg(test)]
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key)
    }

    #[cfg(test)]
    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set(key, value)
    }
}
