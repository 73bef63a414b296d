//! Locating the start of the last sentence in a text block

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Byte index where a "delete last sentence" edit should start.
///
/// `cursor` is a byte offset into `text`; it is clamped to the text length
/// and rounded down to a character boundary. Every `.`, `!` and `?` counts
/// as a sentence terminator, abbreviations included.
pub fn find_delete_start_index(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    let head = &text[..cursor];

    // Last non-whitespace character before the cursor
    let Some((end_pos, last)) = head.char_indices().rev().find(|(_, c)| !c.is_whitespace())
    else {
        return 0;
    };

    // Nearest terminator at or before end_pos
    let Some((terminator, _)) = head[..end_pos + last.len_utf8()]
        .char_indices()
        .rev()
        .find(|(_, c)| is_terminator(*c))
    else {
        return 0;
    };

    // Previous terminator strictly before it
    let start = head[..terminator]
        .char_indices()
        .rev()
        .find(|(_, c)| is_terminator(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    // Skip leading whitespace of the sentence
    head[start..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| start + i)
        .unwrap_or(start)
}
