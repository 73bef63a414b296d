//! Inline compilation of utterances with embedded commands
//!
//! "Hello voicemark comma world voicemark new line" becomes
//! `[insert("Hello"), insert(","), insert(" world"), new line]`.

use crate::context::{ParseContext, collapse_whitespace};
use crate::grammar::{supported_phrases, voice_command_to_editor_op};
use crate::ops::{Chunk, CommandParse, Operation};
use crate::prefix::{find_prefix, followed_by_word_break, match_phrase_at};
use tracing::debug;

/// One scanned piece of an utterance
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Literal text, trailing whitespace removed, never empty
    Text(String),
    /// A trigger followed by a supported phrase
    Command {
        /// Canonical `trigger + " " + phrase`
        source: String,
        /// The matched phrase
        phrase: String,
        parse: CommandParse,
    },
}

impl Segment {
    pub(crate) fn to_chunk(&self) -> Chunk {
        match self {
            Segment::Text(value) => Chunk::Text {
                value: value.clone(),
            },
            Segment::Command { source, parse, .. } => Chunk::Command {
                source_text: source.clone(),
                parse: parse.clone(),
            },
        }
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    let text = text.trim_end();
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Split an utterance into text and command segments, left to right.
///
/// A trigger followed by an unsupported phrase is kept as literal text
/// (`trigger + " "`) and scanning resumes right after the trigger, so the
/// words that follow keep their leading whitespace. A trigger at the end of
/// the utterance is literal text too.
pub(crate) fn scan_utterance(text: &str, ctx: &ParseContext) -> Vec<Segment> {
    let phrases = supported_phrases(ctx);
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(m) = find_prefix(text, ctx.prefixes(), cursor) else {
            push_text(&mut segments, &text[cursor..]);
            break;
        };

        push_text(&mut segments, &text[cursor..m.start]);

        let after = &text[m.end..];
        let phrase_start = m.end + (after.len() - after.trim_start().len());

        let matched = phrases.iter().find_map(|phrase| {
            match_phrase_at(text, phrase_start, phrase)
                .filter(|&end| followed_by_word_break(text, end))
                .map(|end| (phrase, end))
        });

        match matched {
            Some((phrase, end)) => {
                let source = format!("{} {}", m.trigger, phrase);
                let parse = voice_command_to_editor_op(&source, ctx);
                segments.push(Segment::Command {
                    source,
                    phrase: phrase.clone(),
                    parse,
                });
                cursor = end;
            }
            None => {
                let spoken = collapse_whitespace(&text[m.start..m.end]);
                debug!(
                    "No supported command after trigger {:?}, keeping it as text",
                    spoken
                );
                segments.push(Segment::Text(format!("{} ", spoken)));
                cursor = m.end;
            }
        }
    }

    segments
}

/// Compile an utterance with any number of embedded commands into operations.
///
/// Destructive commands cannot be confirmed from here, so they are inserted
/// as the literal text of their phrase instead.
pub fn parse_inline_voice_mark(text: &str, ctx: &ParseContext) -> Vec<Operation> {
    let mut ops = Vec::new();

    for segment in scan_utterance(text, ctx) {
        match segment {
            Segment::Text(value) => ops.push(Operation::InsertText { text: value }),
            Segment::Command { phrase, parse, .. } => match parse {
                CommandParse::Ops { ops: command_ops, .. } => ops.extend(command_ops),
                CommandParse::Confirm { .. } => {
                    debug!("Destructive command {:?} inside inline text, inserting literally", phrase);
                    ops.push(Operation::InsertText { text: phrase });
                }
                CommandParse::Insert { text } => ops.push(Operation::InsertText { text }),
            },
        }
    }

    ops
}

/// Scan an utterance into chunks without compiling them to operations
pub fn chunk_utterance(text: &str, ctx: &ParseContext) -> Vec<Chunk> {
    scan_utterance(text, ctx)
        .iter()
        .map(Segment::to_chunk)
        .collect()
}
