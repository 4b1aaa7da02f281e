use rand::Rng;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Picks a random `#RRGGBB` background color for a new note.
pub fn random_color() -> String {
    random_color_with(&mut rand::thread_rng())
}

pub fn random_color_with<R: Rng>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char);
    }
    color
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
