/// Splits raw tag input on commas and trims each piece.
///
/// Empty pieces are kept, so an empty input yields a single empty tag.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(|tag| tag.trim().to_owned()).collect()
}

/// Same split as [`parse_tags`], lower-cased for case-insensitive matching.
pub fn parse_tag_query(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .collect()
}
