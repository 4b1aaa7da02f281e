use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jotter_core::NoteId;
use jotter_services::ExportFormat;

#[derive(Parser)]
#[command(name = "jotter")]
#[command(about = "Jotter - local notes with search, tag filters and export")]
#[command(version)]
pub struct Cli {
    /// Directory holding the note database, config and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a note
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// List every note
    List,
    /// Show notes whose title or content contains the query
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Show notes carrying any of the given tags
    FilterTags {
        /// Comma separated tags; prompts when omitted
        tags: Option<String>,
    },
    /// Edit a note in place, keeping its id and creation time
    Edit {
        id: NoteId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Remove a note and print its fields for re-entry with `add`
    Reopen { id: NoteId },
    /// Delete a note
    Delete { id: NoteId },
    /// Pin or unpin a note
    Pin { id: NoteId },
    /// Export every note as PDF, Word or JSON
    Export {
        /// Prompts for a numbered choice when omitted
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
        /// Output directory, defaults to the configured export dir
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or toggle the dark mode preference
    Theme {
        #[arg(long)]
        toggle: bool,
    },
    /// Import notes from a browser localStorage dump or a JSON export
    ImportLegacy { path: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Pdf,
    Word,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Word => ExportFormat::Word,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}
