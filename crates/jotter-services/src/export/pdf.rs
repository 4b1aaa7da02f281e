use jotter_core::Note;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const FONT_SIZE: i64 = 12;
const LEFT_MM: f64 = 10.0;
const LINE_OFFSETS_MM: [f64; 4] = [10.0, 20.0, 30.0, 40.0];
const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// One page per note with four fixed lines. An empty notebook is a single blank page.
pub fn render(notes: &[Note]) -> lopdf::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let pages: Vec<Vec<String>> = if notes.is_empty() {
        vec![Vec::new()]
    } else {
        notes.iter().map(note_lines).collect()
    };

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in &pages {
        let content = page_content(lines);
        let stream = Stream::new(dictionary! {}, content.encode()?).with_compression(false);
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0i64.into(), 0i64.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn note_lines(note: &Note) -> Vec<String> {
    vec![
        format!("Title: {}", single_line(&note.title)),
        format!("Content: {}", single_line(&note.content)),
        format!("Tags: {}", note.tags_display()),
        format!("Created At: {}", note.created_display()),
    ]
}

fn page_content(lines: &[String]) -> Content {
    let x = mm_to_points(LEFT_MM);
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for (line, offset_mm) in lines.iter().zip(LINE_OFFSETS_MM) {
        // PDF y grows upwards from the bottom edge
        let y = PAGE_HEIGHT - mm_to_points(offset_mm);
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(to_win_ansi(line))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn mm_to_points(mm: f64) -> i64 {
    (mm * POINTS_PER_MM).round() as i64
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// WinAnsiEncoding slots 0x80..=0x9F, which differ from Latin-1.
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Encodes for Helvetica/WinAnsiEncoding. Characters it has no glyph for print as `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match u32::from(ch) {
        code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(mapped, _)| *mapped == ch)
            .map_or(b'?', |&(_, byte)| byte),
    }
}
