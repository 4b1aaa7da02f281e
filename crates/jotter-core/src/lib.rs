pub mod color;
pub mod filter;
pub mod note;
pub mod tags;
pub mod theme;

pub use color::{is_hex_color, random_color, random_color_with};
pub use filter::{matches_any_tag, matches_query};
pub use note::{Note, NoteDraft, NoteId, local_display};
pub use tags::{parse_tag_query, parse_tags};
pub use theme::ThemePreference;
