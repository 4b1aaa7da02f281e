use jotter_core::NoteId;
use jotter_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error("prompt was cancelled")]
    Cancelled,

    #[error("Invalid choice. Please select 1, 2, or 3.")]
    InvalidExportChoice(String),

    #[error("unsupported import file: {0}")]
    UnsupportedImport(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("pdf export failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotebookError>;
