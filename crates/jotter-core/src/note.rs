use std::collections::BTreeSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::color::random_color;
use crate::tags::parse_tags;

/// Millisecond timestamp of the note's creation, used as its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Next free id at `at`: the creation millisecond, bumped past the
    /// largest existing id when two notes land in the same millisecond.
    ///
    /// When the largest id is `i64::MAX` there is nothing above it, so the
    /// first unused id at or after `at` is taken instead.
    pub fn allocate(existing: impl IntoIterator<Item = NoteId>, at: DateTime<Utc>) -> Self {
        let taken: BTreeSet<i64> = existing.into_iter().map(NoteId::get).collect();
        let candidate = at.timestamp_millis();
        let next = match taken.last() {
            Some(&max) if max >= candidate => max.checked_add(1),
            _ => Some(candidate),
        };
        match next {
            Some(id) => NoteId(id),
            None => first_unused(&taken, candidate),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

fn first_unused(taken: &BTreeSet<i64>, from: i64) -> NoteId {
    (from..=i64::MAX)
        .chain((i64::MIN..from).rev())
        .find(|id| !taken.contains(id))
        .map_or(NoteId(from), NoteId)
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(NoteId)
    }
}

/// Raw form input for creating or updating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Comma separated tag text, split by [`parse_tags`].
    pub tags_input: String,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags_input: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags_input: tags_input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub pinned: bool,
}

impl Note {
    pub fn new(draft: &NoteDraft) -> Self {
        let now = Utc::now();
        Self::from_draft(NoteId::allocate([], now), draft, random_color(), now)
    }

    pub fn from_draft(id: NoteId, draft: &NoteDraft, color: String, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: parse_tags(&draft.tags_input),
            color,
            created_at: at,
            modified_at: at,
            pinned: false,
        }
    }

    /// The form prefill for this note.
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags_input: self.tags_display(),
        }
    }

    /// Replaces the user-editable fields. Identity, color and timestamps are untouched.
    pub fn apply_draft(&mut self, draft: &NoteDraft) {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.tags = parse_tags(&draft.tags_input);
    }

    /// Moves `modified_at` forward, at least one millisecond past its previous value.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        let floor = self.modified_at + TimeDelta::milliseconds(1);
        self.modified_at = at.max(floor);
    }

    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }

    pub fn created_display(&self) -> String {
        local_display(self.created_at)
    }
}

/// Local time in the `M/D/YYYY, h:mm:ss AM` shape used by exports and listings.
pub fn local_display(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::is_hex_color;

    #[test]
    fn new_note_defaults() {
        let note = Note::new(&NoteDraft::new("T", "C", "a, b"));
        assert_eq!(note.title, "T");
        assert_eq!(note.content, "C");
        assert_eq!(note.tags, vec!["a", "b"]);
        assert!(!note.pinned);
        assert_eq!(note.created_at, note.modified_at);
        assert_eq!(note.id.get(), note.created_at.timestamp_millis());
        assert!(is_hex_color(&note.color));
    }

    #[test]
    fn allocate_bumps_past_collisions() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(NoteId::allocate([], at), NoteId(1_700_000_000_000));
        assert_eq!(
            NoteId::allocate([NoteId(1_700_000_000_000)], at),
            NoteId(1_700_000_000_001)
        );
        assert_eq!(
            NoteId::allocate([NoteId(5)], at),
            NoteId(1_700_000_000_000)
        );
    }

    #[test]
    fn allocate_does_not_overflow_past_max_id() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            NoteId::allocate([NoteId(i64::MAX)], at),
            NoteId(1_700_000_000_000)
        );
        assert_eq!(
            NoteId::allocate(
                [NoteId(i64::MAX), NoteId(1_700_000_000_000), NoteId(1_700_000_000_001)],
                at
            ),
            NoteId(1_700_000_000_002)
        );
        assert_eq!(
            NoteId::allocate([NoteId(i64::MAX - 1), NoteId(i64::MAX)], at),
            NoteId(1_700_000_000_000)
        );
    }

    #[test]
    fn touch_is_strictly_increasing() {
        let mut note = Note::new(&NoteDraft::default());
        let before = note.modified_at;
        note.touch(before);
        assert!(note.modified_at > before);
        let later = note.modified_at + TimeDelta::seconds(5);
        note.touch(later);
        assert_eq!(note.modified_at, later);
    }

    #[test]
    fn draft_prefill_joins_tags() {
        let note = Note::new(&NoteDraft::new("T", "C", "a,b , c"));
        assert_eq!(note.draft(), NoteDraft::new("T", "C", "a, b, c"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let note = Note::new(&NoteDraft::new("T", "C", "a"));
        let value = serde_json::to_value(&note).expect("to json");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("modifiedAt").is_some());
        assert_eq!(value["id"], serde_json::json!(note.id.get()));
    }

    #[test]
    fn parses_browser_dates() {
        let raw = r##"{
            "id": 1709287200000,
            "title": "Old",
            "content": "from the browser",
            "tags": ["x"],
            "color": "#12AB9F",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "modifiedAt": "2024-03-01T10:00:00.000Z",
            "pinned": true
        }"##;
        let note: Note = serde_json::from_str(raw).expect("parse legacy note");
        assert_eq!(note.id, NoteId(1_709_287_200_000));
        assert_eq!(note.created_at.timestamp_millis(), 1_709_287_200_000);
        assert!(note.pinned);
    }

    #[test]
    fn id_parses_from_text() {
        assert_eq!(" 42 ".parse::<NoteId>().expect("parse id"), NoteId(42));
        assert!("abc".parse::<NoteId>().is_err());
    }
}
