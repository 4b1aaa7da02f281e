use std::borrow::Cow;

use jotter_core::Note;

/// One HTML document with a section per note. Word opens it as a `.doc`.
pub fn render(notes: &[Note]) -> String {
    let mut html = String::from("<html><body><h1>Notes</h1>");
    for note in notes {
        html.push_str(&format!("<h2>{}</h2>", escape_html(&note.title)));
        html.push_str(&format!("<p>{}</p>", escape_html(&note.content)));
        html.push_str(&format!(
            "<p><strong>Tags:</strong> {}</p>",
            escape_html(&note.tags_display())
        ));
        html.push_str(&format!(
            "<p><strong>Created At:</strong> {}</p>",
            note.created_display()
        ));
    }
    html.push_str("</body></html>");
    html
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
