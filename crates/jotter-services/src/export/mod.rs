use std::fmt;

use jotter_core::Note;

use crate::error::{NotebookError, Result};

pub mod json;
pub mod pdf;
pub mod word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Word,
    Json,
}

impl ExportFormat {
    pub const PROMPT: &'static str = "Select the export format:\n1. PDF\n2. Word Document\n3. JSON";

    /// Maps the numbered prompt answer to a format.
    pub fn from_choice(choice: &str) -> Result<Self> {
        match choice.trim() {
            "1" => Ok(ExportFormat::Pdf),
            "2" => Ok(ExportFormat::Word),
            "3" => Ok(ExportFormat::Json),
            other => Err(NotebookError::InvalidExportChoice(other.to_owned())),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "notes.pdf",
            ExportFormat::Word => "notes.docx",
            ExportFormat::Json => "notes.json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Word => "application/msword",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Word => "Word Document",
            ExportFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rendered export, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

pub fn export_notes(notes: &[Note], format: ExportFormat) -> Result<ExportArtifact> {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render(notes)?,
        ExportFormat::Word => word::render(notes).into_bytes(),
        ExportFormat::Json => json::render(notes)?,
    };
    Ok(ExportArtifact { format, bytes })
}
