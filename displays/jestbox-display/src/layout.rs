//! Text layout
//!
//! Greedy word wrapping for fixed-width fonts. Widths are counted in
//! characters, so multi-byte input never splits inside a code point.

use alloc::vec::Vec;

/// Break `text` into lines of at most `width` characters
///
/// Lines break at spaces where possible; words longer than `width` are
/// split. `\n` always starts a new line and blank lines are kept.
/// Returns no lines for a zero width.
pub fn wrap(text: &str, width: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }

    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph.trim_end_matches('\r'), width, &mut lines);
    }

    lines
}

fn wrap_paragraph<'a>(paragraph: &'a str, width: usize, lines: &mut Vec<&'a str>) {
    let mut rest = paragraph;

    loop {
        // Byte offset just past the first `width` characters
        let limit = match rest.char_indices().nth(width) {
            Some((idx, _)) => idx,
            None => {
                lines.push(rest.trim_end());
                return;
            }
        };

        let (line, next) = if rest[limit..].starts_with(' ') {
            (&rest[..limit], &rest[limit + 1..])
        } else {
            match rest[..limit].rfind(' ') {
                Some(pos) if pos > 0 => (&rest[..pos], &rest[pos + 1..]),
                _ => (&rest[..limit], &rest[limit..]),
            }
        };

        lines.push(line.trim_end());
        rest = next.trim_start_matches(' ');
        if rest.is_empty() {
            return;
        }
    }
}
