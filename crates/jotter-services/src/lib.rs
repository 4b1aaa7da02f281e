pub mod error;
pub mod export;
pub mod migration;
pub mod notebook;

pub use error::{NotebookError, Result};
pub use export::{ExportArtifact, ExportFormat, export_notes};
pub use migration::{ImportReport, import_legacy_json};
pub use notebook::{Notebook, NotebookBuilder};
