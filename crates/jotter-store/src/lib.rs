pub mod backend;
pub mod error;
pub mod migrations;
pub mod store;

pub use backend::{KeyValueStore, MemoryKv, SqliteKv};
pub use error::{Result, StoreError};
pub use store::{DARK_MODE_KEY, JotterStore, NOTES_KEY};
