use jotter_core::Note;

/// Pretty-printed dump of the full sequence, keyed like the persisted slot.
pub fn render(notes: &[Note]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(notes)
}
