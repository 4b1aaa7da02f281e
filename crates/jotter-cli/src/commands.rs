use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use jotter_config::AppConfig;
use jotter_core::{NoteDraft, ThemePreference};
use jotter_services::{ExportFormat, Notebook, NotebookError, import_legacy_json};
use tracing::info;

use crate::cli::Commands;
use crate::prompt::{TAG_FILTER_PROMPT, prompt_line};
use crate::render::{render_card, render_notes};

pub fn dispatch<R, W>(
    notebook: &Notebook,
    config: &AppConfig,
    command: Commands,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    match command {
        Commands::Add {
            title,
            content,
            tags,
        } => {
            let note = notebook.create(&NoteDraft::new(title, content, tags))?;
            writeln!(output, "Created note {}", note.id)?;
        }
        Commands::List => {
            write!(output, "{}", render_notes(&notebook.notes()))?;
        }
        Commands::Search { query } => {
            write!(output, "{}", render_notes(&notebook.search(&query)))?;
        }
        Commands::FilterTags { tags } => {
            let tags = match tags {
                Some(tags) => Some(tags),
                None => prompt_line(input, output, TAG_FILTER_PROMPT)?,
            };
            let notes = notebook.filter_by_tags(tags.as_deref())?;
            write!(output, "{}", render_notes(&notes))?;
        }
        Commands::Edit {
            id,
            title,
            content,
            tags,
        } => {
            let current = notebook.get(id).ok_or(NotebookError::NotFound(id))?;
            let mut draft = current.draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if let Some(tags) = tags {
                draft.tags_input = tags;
            }
            let note = notebook.update(id, &draft)?;
            write!(output, "{}", render_card(&note))?;
        }
        Commands::Reopen { id } => match notebook.take_for_edit(id)? {
            Some(draft) => {
                writeln!(output, "Removed note {id}. Its contents were:")?;
                writeln!(output, "Title: {}", draft.title)?;
                writeln!(output, "Content: {}", draft.content)?;
                writeln!(output, "Tags: {}", draft.tags_input)?;
            }
            None => writeln!(output, "No note with id {id}")?,
        },
        Commands::Delete { id } => {
            let removed = notebook.delete(id)?;
            if removed == 0 {
                writeln!(output, "No note with id {id}")?;
            } else {
                writeln!(output, "Deleted note {id}")?;
            }
        }
        Commands::Pin { id } => {
            let note = notebook.toggle_pin(id)?;
            let state = if note.pinned { "Pinned" } else { "Unpinned" };
            writeln!(output, "{state} note {id}")?;
        }
        Commands::Export { format, out } => {
            let format = match format {
                Some(format) => ExportFormat::from(format),
                None => {
                    let choice = prompt_line(input, output, ExportFormat::PROMPT)?
                        .ok_or(NotebookError::Cancelled)?;
                    ExportFormat::from_choice(&choice)?
                }
            };
            let dir = out.unwrap_or_else(|| config.resolve_export_dir());
            let path = notebook
                .export_to_dir(format, &dir)
                .with_context(|| format!("failed to export notes as {format}"))?;
            writeln!(output, "Exported {} to {}", format, path.display())?;
        }
        Commands::Theme { toggle } => {
            let theme = if toggle {
                notebook.toggle_theme()?
            } else {
                notebook.theme()?
            };
            let label = match theme {
                ThemePreference::Dark => "Dark mode is on",
                ThemePreference::Light => "Dark mode is off",
            };
            writeln!(output, "{label}")?;
        }
        Commands::ImportLegacy { path } => {
            let report = import_legacy_json(notebook, &path)
                .with_context(|| format!("failed to import {}", path.display()))?;
            info!(notes = report.notes, skipped = report.skipped, "legacy import finished");
            writeln!(
                output,
                "Imported {} notes ({} already present)",
                report.notes, report.skipped
            )?;
            if let Some(theme) = report.theme {
                writeln!(output, "Theme set to {}", theme.label())?;
            }
        }
    }

    Ok(())
}
