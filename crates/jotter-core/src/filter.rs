use crate::note::Note;

/// Case-insensitive substring match against title or content. Tags are not searched.
pub fn matches_query(note: &Note, query: &str) -> bool {
    let query = query.to_lowercase();
    note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
}

/// True when any of the note's tags equals any wanted tag.
///
/// `wanted` must already be lower-cased, as produced by [`crate::parse_tag_query`].
pub fn matches_any_tag(note: &Note, wanted: &[String]) -> bool {
    note.tags.iter().any(|tag| wanted.contains(&tag.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoteDraft, parse_tag_query};

    fn note(title: &str, content: &str, tags: &str) -> Note {
        Note::new(&NoteDraft::new(title, content, tags))
    }

    #[test]
    fn query_matches_title_or_content_ignoring_case() {
        let n = note("Groceries", "Buy MILK and eggs", "home");
        assert!(matches_query(&n, "milk"));
        assert!(matches_query(&n, "GROC"));
        assert!(matches_query(&n, ""));
        assert!(!matches_query(&n, "home"));
    }

    #[test]
    fn tag_match_is_exact_and_case_insensitive() {
        let n = note("t", "c", "Work, Home");
        assert!(matches_any_tag(&n, &parse_tag_query("work")));
        assert!(matches_any_tag(&n, &parse_tag_query("school, HOME")));
        assert!(!matches_any_tag(&n, &parse_tag_query("school")));
        assert!(!matches_any_tag(&n, &parse_tag_query("wor")));
    }

    #[test]
    fn empty_query_matches_untagged_notes_only() {
        let untagged = note("t", "c", "");
        let tagged = note("t", "c", "work");
        let wanted = parse_tag_query("");
        assert!(matches_any_tag(&untagged, &wanted));
        assert!(!matches_any_tag(&tagged, &wanted));
    }
}
