//! Multi-sentence transcript compilation
//!
//! Recognizers often return several sentences (and line breaks) in one final
//! result. The transcript is cut at line breaks and sentence terminators,
//! each remaining piece is compiled inline, and the pieces are glued back
//! together with exactly one space after each terminator (none when the
//! next piece opens with a spoken line break).

use crate::context::ParseContext;
use crate::inline::parse_inline_voice_mark;
use crate::ops::Operation;

fn is_boundary(c: char) -> bool {
    matches!(c, '\n' | '.' | '?' | '!')
}

fn is_boundary_piece(piece: &str) -> bool {
    let mut chars = piece.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_boundary(c))
}

/// Split a transcript at newlines and `.`, `?`, `!`.
///
/// Each boundary character is its own piece. Text between boundaries is
/// returned untouched, so concatenating the pieces gives back `text`.
pub fn split_transcript(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if is_boundary(c) {
            if start < i {
                pieces.push(&text[start..i]);
            }
            pieces.push(&text[i..i + c.len_utf8()]);
            start = i + c.len_utf8();
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

/// Compile a full transcript into operations
pub fn parse_transcript(text: &str, ctx: &ParseContext) -> Vec<Operation> {
    let pieces: Vec<&str> = split_transcript(text)
        .into_iter()
        .filter(|p| is_boundary_piece(p) || !p.trim().is_empty())
        .collect();

    let compiled: Vec<Option<Vec<Operation>>> = pieces
        .iter()
        .map(|piece| {
            (!is_boundary_piece(piece)).then(|| parse_inline_voice_mark(piece.trim(), ctx))
        })
        .collect();

    let mut ops = Vec::new();

    for (i, (piece, piece_ops)) in pieces.iter().zip(compiled.iter()).enumerate() {
        match piece_ops {
            Some(piece_ops) => ops.extend(piece_ops.iter().cloned()),
            None if *piece == "\n" => ops.push(Operation::insert("\n")),
            None => {
                ops.push(Operation::insert(*piece));
                let next_starts_text = compiled
                    .get(i + 1)
                    .and_then(Option::as_ref)
                    .is_some_and(|next| !starts_with_line_break(next));
                if next_starts_text {
                    ops.push(Operation::insert(" "));
                }
            }
        }
    }

    ops
}

fn starts_with_line_break(ops: &[Operation]) -> bool {
    matches!(
        ops.first(),
        Some(Operation::InsertNewLine | Operation::InsertNewParagraph)
    )
}
