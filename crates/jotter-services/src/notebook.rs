use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use jotter_core::{
    Note, NoteDraft, NoteId, ThemePreference, matches_any_tag, matches_query, parse_tag_query,
    random_color,
};
use jotter_store::JotterStore;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{NotebookError, Result};
use crate::export::{ExportArtifact, ExportFormat, export_notes};

pub struct NotebookBuilder {
    pub db_path: PathBuf,
    pub storage_quota: Option<usize>,
}

impl NotebookBuilder {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            storage_quota: None,
        }
    }

    pub fn storage_quota(mut self, limit: Option<usize>) -> Self {
        self.storage_quota = limit;
        self
    }

    pub fn build(self) -> Result<Notebook> {
        let store = JotterStore::open(&self.db_path, self.storage_quota)?;
        Notebook::from_store(store)
    }
}

/// The session's note sequence, mirrored to the store after every mutation.
///
/// Mutators persist the new sequence first and only then swap it into memory,
/// so a failed write leaves both copies as they were.
#[derive(Clone)]
pub struct Notebook {
    store: Arc<JotterStore>,
    notes: Arc<Mutex<Vec<Note>>>,
}

impl Notebook {
    pub fn from_store(store: JotterStore) -> Result<Self> {
        let notes = store.load_notes()?;
        debug!(count = notes.len(), "notebook loaded");
        Ok(Self {
            store: Arc::new(store),
            notes: Arc::new(Mutex::new(notes)),
        })
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.notes.lock().iter().find(|note| note.id == id).cloned()
    }

    pub fn create(&self, draft: &NoteDraft) -> Result<Note> {
        let mut notes = self.notes.lock();
        let now = Utc::now();
        let id = NoteId::allocate(notes.iter().map(|note| note.id), now);
        let note = Note::from_draft(id, draft, random_color(), now);

        let mut next = notes.clone();
        next.push(note.clone());
        self.commit(&mut notes, next)?;

        debug!(id = %note.id, tags = note.tags.len(), "created note");
        Ok(note)
    }

    /// Edits a note in place, keeping its id, creation time, color and position.
    pub fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<Note> {
        let mut notes = self.notes.lock();
        let mut next = notes.clone();
        let note = next
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(NotebookError::NotFound(id))?;
        note.apply_draft(draft);
        note.touch(Utc::now());
        let updated = note.clone();

        self.commit(&mut notes, next)?;
        debug!(id = %id, "updated note");
        Ok(updated)
    }

    /// Removes the note and hands back its contents for re-entry.
    ///
    /// The note only comes back if the draft is passed to [`Notebook::create`];
    /// a re-created note gets a new id and creation time. Missing ids are a no-op.
    pub fn take_for_edit(&self, id: NoteId) -> Result<Option<NoteDraft>> {
        let mut notes = self.notes.lock();
        let Some(draft) = notes.iter().find(|note| note.id == id).map(Note::draft) else {
            warn!(id = %id, "edit requested for unknown note");
            return Ok(None);
        };

        let next: Vec<Note> = notes.iter().filter(|note| note.id != id).cloned().collect();
        self.commit(&mut notes, next)?;
        debug!(id = %id, "note taken out for editing");
        Ok(Some(draft))
    }

    /// Removes every note with this id and returns how many went.
    pub fn delete(&self, id: NoteId) -> Result<usize> {
        let mut notes = self.notes.lock();
        let next: Vec<Note> = notes.iter().filter(|note| note.id != id).cloned().collect();
        let removed = notes.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.commit(&mut notes, next)?;
        debug!(id = %id, removed, "deleted note");
        Ok(removed)
    }

    pub fn toggle_pin(&self, id: NoteId) -> Result<Note> {
        let mut notes = self.notes.lock();
        let mut next = notes.clone();
        let note = next
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(NotebookError::NotFound(id))?;
        note.pinned = !note.pinned;
        note.touch(Utc::now());
        let toggled = note.clone();

        self.commit(&mut notes, next)?;
        debug!(id = %id, pinned = toggled.pinned, "toggled pin");
        Ok(toggled)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Note> {
        self.notes
            .lock()
            .iter()
            .filter(|note| matches_query(note, query))
            .cloned()
            .collect()
    }

    /// Notes carrying any of the comma separated tags. `None` is a cancelled prompt.
    pub fn filter_by_tags(&self, input: Option<&str>) -> Result<Vec<Note>> {
        let input = input.ok_or(NotebookError::Cancelled)?;
        let wanted = parse_tag_query(input);
        Ok(self
            .notes
            .lock()
            .iter()
            .filter(|note| matches_any_tag(note, &wanted))
            .cloned()
            .collect())
    }

    /// Appends imported notes and returns `(imported, skipped)`.
    ///
    /// Notes whose id is already in the notebook are skipped. Notes that only
    /// clash with an earlier note in the same batch get a fresh id.
    pub fn import_notes(&self, incoming: Vec<Note>) -> Result<(usize, usize)> {
        let mut notes = self.notes.lock();
        let mut next = notes.clone();
        let mut skipped = 0;
        for mut note in incoming {
            if notes.iter().any(|existing| existing.id == note.id) {
                skipped += 1;
                continue;
            }
            if next.iter().any(|existing| existing.id == note.id) {
                let fresh = NoteId::allocate(next.iter().map(|other| other.id), note.created_at);
                debug!(from = %note.id, to = %fresh, "re-keyed duplicate imported id");
                note.id = fresh;
            }
            next.push(note);
        }

        let imported = next.len() - notes.len();
        if imported > 0 {
            self.commit(&mut notes, next)?;
        }
        Ok((imported, skipped))
    }

    pub fn theme(&self) -> Result<ThemePreference> {
        Ok(self.store.load_theme()?)
    }

    pub fn set_theme(&self, theme: ThemePreference) -> Result<()> {
        self.store.save_theme(theme)?;
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<ThemePreference> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme)?;
        debug!(theme = theme.label(), "toggled theme");
        Ok(theme)
    }

    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact> {
        let notes = self.notes();
        export_notes(&notes, format)
    }

    /// Renders the export and writes it into `dir`, returning the file path.
    pub fn export_to_dir(&self, format: ExportFormat, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let artifact = self.export(format)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(artifact.file_name());
        fs::write(&path, &artifact.bytes)?;
        info!(
            format = %format,
            path = %path.display(),
            bytes = artifact.bytes.len(),
            "exported notes"
        );
        Ok(path)
    }

    fn commit(&self, current: &mut Vec<Note>, next: Vec<Note>) -> Result<()> {
        self.store.save_notes(&next)?;
        *current = next;
        Ok(())
    }
}
