//! Trigger phrase scanning
//!
//! Matching is case-insensitive and whole-word. A single space inside a
//! configured phrase matches any run of whitespace in the scanned text, so
//! "voice   mark" still hits the "voice mark" trigger.

/// A trigger phrase located in a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    /// Byte offset of the first matched character
    pub start: usize,
    /// Byte offset just past the match
    pub end: usize,
    /// The configured trigger phrase that matched
    pub trigger: &'a str,
}

/// Find the earliest whole-word occurrence of any trigger at or after `from`.
///
/// When several triggers match at the same index, the first one in
/// `prefixes` order wins.
pub fn find_prefix<'a, S: AsRef<str>>(
    text: &str,
    prefixes: &'a [S],
    from: usize,
) -> Option<PrefixMatch<'a>> {
    let from = from.min(text.len());
    if !text.is_char_boundary(from) {
        return None;
    }

    for (offset, _) in text[from..].char_indices() {
        let start = from + offset;
        if !preceded_by_boundary(text, start) {
            continue;
        }
        for prefix in prefixes {
            let prefix = prefix.as_ref();
            if prefix.is_empty() {
                continue;
            }
            if let Some(end) = match_phrase_at(text, start, prefix) {
                if followed_by_whitespace(text, end) {
                    return Some(PrefixMatch {
                        start,
                        end,
                        trigger: prefix,
                    });
                }
            }
        }
    }

    None
}

/// Match `phrase` against `text` starting at byte `at`, ignoring case.
///
/// Returns the byte offset just past the match. Spaces in `phrase` match one
/// or more whitespace characters.
pub(crate) fn match_phrase_at(text: &str, at: usize, phrase: &str) -> Option<usize> {
    let mut hay = text.get(at..)?.char_indices().peekable();
    let mut pos = at;

    for pc in phrase.chars() {
        if pc == ' ' {
            let mut consumed = false;
            while let Some(&(i, c)) = hay.peek() {
                if !c.is_whitespace() {
                    break;
                }
                hay.next();
                pos = at + i + c.len_utf8();
                consumed = true;
            }
            if !consumed {
                return None;
            }
            continue;
        }

        let (i, c) = hay.next()?;
        if !c.to_lowercase().eq(pc.to_lowercase()) {
            return None;
        }
        pos = at + i + c.len_utf8();
    }

    Some(pos)
}

/// Start of string or preceded by whitespace
pub(crate) fn preceded_by_boundary(text: &str, at: usize) -> bool {
    text[..at].chars().next_back().is_none_or(char::is_whitespace)
}

/// End of string or followed by whitespace
fn followed_by_whitespace(text: &str, at: usize) -> bool {
    text[at..].chars().next().is_none_or(char::is_whitespace)
}

/// End of string or followed by something that cannot continue a word
pub(crate) fn followed_by_word_break(text: &str, at: usize) -> bool {
    text[at..].chars().next().is_none_or(|c| !c.is_alphanumeric())
}
