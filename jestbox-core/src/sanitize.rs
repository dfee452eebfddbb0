//! Text sanitizer
//!
//! The display font only has glyphs for ASCII. Typographic punctuation
//! and the accented letters common in German, French and Spanish text
//! are transliterated; anything else outside ASCII is dropped.

use alloc::string::String;

/// Transliteration table
///
/// Every replacement is plain ASCII, so a sanitized string maps to
/// itself.
const REPLACEMENTS: &[(char, &str)] = &[
    // Quotes and apostrophes
    ('\u{201E}', "\""), // „
    ('\u{201C}', "\""), // “
    ('\u{201D}', "\""), // ”
    ('\u{00AB}', "\""), // «
    ('\u{00BB}', "\""), // »
    ('\u{201A}', "'"),  // ‚
    ('\u{2018}', "'"),  // ‘
    ('\u{2019}', "'"),  // ’
    ('\u{00B4}', "'"),  // ´
    ('`', "'"),
    // Dashes, ellipsis, spaces
    ('\u{2013}', "-"),   // –
    ('\u{2014}', "-"),   // —
    ('\u{2026}', "..."), // …
    ('\u{00A0}', " "),   // no-break space
    // German
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('Ü', "Ue"),
    ('ß', "ss"),
    // French
    ('à', "a"),
    ('â', "a"),
    ('é', "e"),
    ('è', "e"),
    ('ê', "e"),
    ('ë', "e"),
    ('î', "i"),
    ('ï', "i"),
    ('ô', "o"),
    ('ù', "u"),
    ('û', "u"),
    ('ç', "c"),
    ('À', "A"),
    ('Â', "A"),
    ('É', "E"),
    ('È', "E"),
    ('Ê', "E"),
    ('Ë', "E"),
    ('Î', "I"),
    ('Ï', "I"),
    ('Ô', "O"),
    ('Ù', "U"),
    ('Û', "U"),
    ('Ç', "C"),
    // Spanish
    ('á', "a"),
    ('í', "i"),
    ('ó', "o"),
    ('ú', "u"),
    ('ñ', "n"),
    ('Á', "A"),
    ('Í', "I"),
    ('Ó', "O"),
    ('Ú', "U"),
    ('Ñ', "N"),
    ('¿', "?"),
    ('¡', "!"),
];

fn replacement(c: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Reduce `text` to ASCII
///
/// Known characters are transliterated, the rest of the non-ASCII range
/// is silently dropped.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(to) = replacement(c) {
            out.push_str(to);
        } else if c.is_ascii() {
            out.push(c);
        }
    }
    out
}
