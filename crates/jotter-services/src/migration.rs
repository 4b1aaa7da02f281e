use std::{fs, path::Path};

use jotter_core::{Note, ThemePreference};
use jotter_store::{DARK_MODE_KEY, NOTES_KEY};
use serde_json::Value;
use tracing::info;

use crate::error::{NotebookError, Result};
use crate::notebook::Notebook;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub notes: usize,
    pub skipped: usize,
    pub theme: Option<ThemePreference>,
}

/// Imports notes saved by the browser widget.
///
/// Accepts either a bare notes array (the `notes` slot, or a JSON export) or a
/// `localStorage` dump object whose `notes` value is the slot's JSON text and
/// whose `dark-mode` value is `"true"`/`"false"`.
pub fn import_legacy_json(notebook: &Notebook, path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let (notes, theme) = match value {
        Value::Array(items) => (serde_json::from_value::<Vec<Note>>(Value::Array(items))?, None),
        Value::Object(mut slots) => {
            let notes = match slots.remove(NOTES_KEY) {
                Some(Value::String(raw)) => {
                    serde_json::from_str::<Option<Vec<Note>>>(&raw)?.unwrap_or_default()
                }
                Some(Value::Array(items)) => serde_json::from_value(Value::Array(items))?,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(NotebookError::UnsupportedImport(format!(
                        "`{NOTES_KEY}` must be a JSON string or array, got {other}"
                    )));
                }
            };
            let theme = match slots.remove(DARK_MODE_KEY) {
                Some(Value::String(flag)) => Some(ThemePreference::from_flag(Some(&flag))),
                Some(Value::Bool(true)) => Some(ThemePreference::Dark),
                Some(Value::Bool(false)) => Some(ThemePreference::Light),
                _ => None,
            };
            (notes, theme)
        }
        other => {
            return Err(NotebookError::UnsupportedImport(format!(
                "expected an array or object at the top level, got {other}"
            )));
        }
    };

    let (imported, skipped) = notebook.import_notes(notes)?;
    if let Some(theme) = theme {
        notebook.set_theme(theme)?;
    }

    info!(
        path = %path.display(),
        imported,
        skipped,
        "imported legacy notes"
    );

    Ok(ImportReport {
        notes: imported,
        skipped,
        theme,
    })
}

#[cfg(test)]
mod tests {
    use jotter_core::{NoteDraft, NoteId};
    use jotter_store::JotterStore;
    use tempfile::tempdir;

    use super::*;
    use crate::export::{ExportFormat, export_notes};

    const BROWSER_NOTES: &str = r##"[{"id":1709287200000,"title":"Old","content":"from the browser","tags":["x",""],"color":"#12AB9F","createdAt":"2024-03-01T10:00:00.000Z","modifiedAt":"2024-03-02T08:30:00.000Z","pinned":true}]"##;

    fn notebook() -> Notebook {
        Notebook::from_store(JotterStore::in_memory()).expect("open notebook")
    }

    #[test]
    fn imports_local_storage_dump() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("localStorage.json");
        let dump = serde_json::json!({
            "notes": BROWSER_NOTES,
            "dark-mode": "true",
        });
        fs::write(&path, dump.to_string()).expect("write dump");

        let notebook = notebook();
        let report = import_legacy_json(&notebook, &path).expect("import");
        assert_eq!(
            report,
            ImportReport {
                notes: 1,
                skipped: 0,
                theme: Some(ThemePreference::Dark),
            }
        );

        let note = notebook.get(NoteId(1_709_287_200_000)).expect("imported note");
        assert_eq!(note.title, "Old");
        assert_eq!(note.tags, vec!["x", ""]);
        assert!(note.pinned);
        assert!(note.modified_at > note.created_at);
        assert_eq!(notebook.theme().expect("theme"), ThemePreference::Dark);
    }

    #[test]
    fn reimporting_a_json_export_skips_existing_notes() {
        let dir = tempdir().expect("tempdir");
        let notebook = notebook();
        notebook
            .create(&NoteDraft::new("one", "body", "a"))
            .expect("create");

        let artifact = export_notes(&notebook.notes(), ExportFormat::Json).expect("export");
        let path = dir.path().join(artifact.file_name());
        fs::write(&path, &artifact.bytes).expect("write export");

        let report = import_legacy_json(&notebook, &path).expect("import");
        assert_eq!((report.notes, report.skipped, report.theme), (0, 1, None));
        assert_eq!(notebook.len(), 1);
    }

    #[test]
    fn same_millisecond_browser_notes_are_both_kept() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("notes.json");
        let note = |title: &str| {
            serde_json::json!({
                "id": 1_709_287_200_000_i64,
                "title": title,
                "content": "",
                "tags": [""],
                "color": "#000000",
                "createdAt": "2024-03-01T10:00:00.000Z",
                "modifiedAt": "2024-03-01T10:00:00.000Z",
                "pinned": false,
            })
        };
        let dump = serde_json::Value::Array(vec![note("First"), note("Second")]);
        fs::write(&path, dump.to_string()).expect("write notes");

        let notebook = notebook();
        let report = import_legacy_json(&notebook, &path).expect("import");
        assert_eq!((report.notes, report.skipped), (2, 0));

        let titles: Vec<String> = notebook.notes().into_iter().map(|note| note.title).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn rejects_scalar_files() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "42").expect("write");

        let err = import_legacy_json(&notebook(), &path).unwrap_err();
        assert!(matches!(err, NotebookError::UnsupportedImport(_)));
    }
}
