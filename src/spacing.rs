//! Spacing between concatenated dictation fragments

/// Characters that attach to the preceding word without a space
const ATTACHING_PUNCTUATION: [char; 6] = [',', '.', '!', '?', ';', ':'];

/// Decide what separates `prev` (text already applied) from `next`.
///
/// Returns either `" "` or `""`. No space is added at the start of the
/// document, after a line break, before attaching punctuation or closing
/// brackets, after opening brackets, or when either side already carries
/// whitespace at the join.
pub fn normalize_spacing(prev: &str, next: &str) -> &'static str {
    let (Some(last), Some(first)) = (prev.chars().last(), next.chars().next()) else {
        return "";
    };

    if last == '\n' || last.is_whitespace() || first.is_whitespace() {
        return "";
    }
    if ATTACHING_PUNCTUATION.contains(&first) || matches!(first, ')' | ']' | '}') {
        return "";
    }
    if matches!(last, '(' | '[' | '{') {
        return "";
    }

    " "
}
