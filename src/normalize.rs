//! Case and accent folding used on both sides of a keyword match.

/// Accented characters folded to their plain equivalent. Applied after
/// lower-casing, so only lowercase forms are listed.
const ACCENT_TABLE: [(char, char); 7] = [
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('ü', 'u'),
    ('ñ', 'n'),
];

fn fold_accent(c: char) -> char {
    ACCENT_TABLE
        .iter()
        .find(|(accented, _)| *accented == c)
        .map(|(_, plain)| *plain)
        .unwrap_or(c)
}

/// Lower-case `text` and strip the accents in [`ACCENT_TABLE`].
///
/// Whitespace and punctuation are left untouched.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().map(fold_accent).collect()
}
