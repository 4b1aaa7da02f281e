use jotter_core::Note;

pub const EMPTY_LISTING: &str = "No notes found. Please add some.";

/// Plain-text cards, one per note, separated by blank lines.
pub fn render_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!("{EMPTY_LISTING}\n");
    }

    notes
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_card(note: &Note) -> String {
    let pin = if note.pinned { " [pinned]" } else { "" };
    format!(
        "#{id} {title}{pin} ({color})\n{content}\nTags: {tags}\nCreated: {created}\n",
        id = note.id,
        title = note.title,
        color = note.color,
        content = note.content,
        tags = note.tags_display(),
        created = note.created_display(),
    )
}
