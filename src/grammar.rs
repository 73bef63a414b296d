//! Voice command grammar
//!
//! Maps the phrase following a trigger to editor operations. The grammar is
//! table-driven: punctuation and layout commands are plain lookups, format
//! commands are matched with a single pattern.

use crate::context::{ParseContext, collapse_whitespace};
use crate::ops::{CommandParse, Confidence, FormatAction, FormatStyle, Operation};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Prompt shown before deleting the last sentence
pub const DELETE_LAST_SENTENCE_PROMPT: &str = "Delete the last sentence?";

/// Spoken punctuation -> inserted text
pub const PUNCTUATION: [(&str, &str); 7] = [
    ("comma", ","),
    ("full stop", "."),
    ("question mark", "?"),
    ("exclamation mark", "!"),
    ("colon", ":"),
    ("semicolon", ";"),
    ("dash", "-"),
];

const FORMAT_ACTIONS: [&str; 3] = ["make", "unmake", "toggle"];
const FORMAT_STYLES: [&str; 5] = ["bold", "italic", "italics", "underline", "underlined"];

/// Commands with a fixed phrase, excluding punctuation and format
const FIXED_COMMANDS: [&str; 6] = [
    "delete last word",
    "delete last sentence",
    "new line",
    "new paragraph",
    "undo",
    "redo",
];

static FORMAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(make|unmake|toggle) (bold|italic|italics|underline|underlined)$")
        .expect("format command pattern is valid")
});

/// Lowercase, collapse internal whitespace to single spaces, trim
pub fn normalize_command(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Replace locale aliases word by word in an already normalized string
fn apply_aliases(normalized: &str, ctx: &ParseContext) -> String {
    let aliases = ctx.locale().aliases();
    if aliases.is_empty() {
        return normalized.to_string();
    }

    normalized
        .split(' ')
        .map(|word| {
            aliases
                .iter()
                .find(|(spoken, _)| *spoken == word)
                .map_or(word, |(_, canonical)| *canonical)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compile a single command utterance (trigger phrase followed by a command).
///
/// Input that does not start with a trigger phrase is returned as literal
/// text. A trigger with nothing after it is a no-op.
pub fn voice_command_to_editor_op(input: &str, ctx: &ParseContext) -> CommandParse {
    let normalized = apply_aliases(&normalize_command(input), ctx);

    let Some(phrase) = strip_trigger(&normalized, ctx) else {
        return CommandParse::Insert {
            text: input.to_string(),
        };
    };

    if phrase.is_empty() {
        return CommandParse::Ops {
            ops: vec![],
            confidence: Confidence::High,
        };
    }

    match compile_phrase(phrase) {
        Some(parse) => parse,
        None => {
            debug!("Unrecognized voice command {:?}, dropping it", phrase);
            CommandParse::Ops {
                ops: vec![],
                confidence: Confidence::Medium,
            }
        }
    }
}

/// The command phrase after a leading trigger, if the input starts with one
fn strip_trigger<'a>(normalized: &'a str, ctx: &ParseContext) -> Option<&'a str> {
    ctx.prefixes().iter().find_map(|prefix| {
        let rest = normalized.strip_prefix(prefix.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix(' ')
        }
    })
}

/// Look a normalized command phrase up in the grammar
fn compile_phrase(phrase: &str) -> Option<CommandParse> {
    if let Some(caps) = FORMAT_RE.captures(phrase) {
        let action = FormatAction::from_spoken(&caps[1])?;
        let style = FormatStyle::from_spoken(&caps[2])?;
        return Some(high(vec![Operation::format(action, style)]));
    }

    let op = match phrase {
        "delete last word" => Operation::DeleteLastWord,
        "delete last sentence" => {
            return Some(CommandParse::Confirm {
                ops: vec![Operation::DeleteLastSentence],
                prompt: DELETE_LAST_SENTENCE_PROMPT.to_string(),
            });
        }
        "new line" => Operation::InsertNewLine,
        "new paragraph" => Operation::InsertNewParagraph,
        "undo" => Operation::Undo,
        "redo" => Operation::Redo,
        _ => {
            let (_, text) = PUNCTUATION.iter().find(|(spoken, _)| *spoken == phrase)?;
            Operation::insert(*text)
        }
    };

    Some(high(vec![op]))
}

fn high(ops: Vec<Operation>) -> CommandParse {
    CommandParse::Ops {
        ops,
        confidence: Confidence::High,
    }
}

/// Every command phrase the grammar accepts for `ctx`, longest first
pub fn supported_phrases(ctx: &ParseContext) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();

    for action in FORMAT_ACTIONS {
        for style in FORMAT_STYLES {
            phrases.push(format!("{} {}", action, style));
        }
    }
    phrases.extend(FIXED_COMMANDS.iter().map(|p| p.to_string()));
    phrases.extend(PUNCTUATION.iter().map(|(p, _)| p.to_string()));
    phrases.extend(ctx.locale().aliases().iter().map(|(p, _)| p.to_string()));

    phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    phrases.dedup();
    phrases
}

/// Print all available voice commands
pub fn print_help(ctx: &ParseContext) {
    let trigger = ctx.prefixes().first().map(String::as_str).unwrap_or("voicemark");
    let period = if ctx.locale().aliases().is_empty() {
        "full stop                 "
    } else {
        "full stop / period        "
    };
    eprintln!(
        "
╭─────────────────────────────────────────────────────────────╮
│                  VOICE COMMANDS                             │
├─────────────────────────────────────────────────────────────┤
│ Say the trigger first, e.g. \"{trigger} comma\"
├─────────────────────────────────────────────────────────────┤
│ PUNCTUATION                                                 │
│   comma                         ,                           │
│   {period}    .                           │
│   question mark                 ?                           │
│   exclamation mark              !                           │
│   colon / semicolon             : / ;                       │
│   dash                          -                           │
├─────────────────────────────────────────────────────────────┤
│ LAYOUT                                                      │
│   new line / new paragraph      Line or paragraph break     │
├─────────────────────────────────────────────────────────────┤
│ FORMAT                                                      │
│   make / unmake / toggle        bold, italic(s),            │
│                                 underline(d)                │
├─────────────────────────────────────────────────────────────┤
│ EDITING                                                     │
│   delete last word              Remove the previous word    │
│   delete last sentence          Asks for confirmation       │
│   undo / redo                   Undo/redo last action       │
╰─────────────────────────────────────────────────────────────╯
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Locale;

    fn ops(parse: &CommandParse) -> Vec<Operation> {
        parse.ops().to_vec()
    }

    #[test]
    fn test_punctuation_commands() {
        let ctx = ParseContext::default();
        let tests = vec![
            ("comma", ","),
            ("full stop", "."),
            ("question mark", "?"),
            ("exclamation mark", "!"),
            ("colon", ":"),
            ("semicolon", ";"),
            ("dash", "-"),
        ];

        for (phrase, expected) in tests {
            let parse = voice_command_to_editor_op(&format!("voicemark {}", phrase), &ctx);
            assert_eq!(
                parse,
                CommandParse::Ops {
                    ops: vec![Operation::insert(expected)],
                    confidence: Confidence::High,
                },
                "Failed for '{}'",
                phrase
            );
        }
    }

    #[test]
    fn test_format_commands_with_aliases() {
        let ctx = ParseContext::default();

        let parse = voice_command_to_editor_op("voicemark make bold", &ctx);
        assert_eq!(
            ops(&parse),
            vec![Operation::format(FormatAction::Make, FormatStyle::Bold)]
        );

        let parse = voice_command_to_editor_op("Voicemark  Toggle   Italics", &ctx);
        assert_eq!(
            ops(&parse),
            vec![Operation::format(FormatAction::Toggle, FormatStyle::Italic)]
        );

        let parse = voice_command_to_editor_op("voicemark unmake underlined", &ctx);
        assert_eq!(
            ops(&parse),
            vec![Operation::format(FormatAction::Unmake, FormatStyle::Underline)]
        );

        // Not a format command without a style word
        let parse = voice_command_to_editor_op("voicemark make", &ctx);
        assert!(parse.is_unrecognized());
    }

    #[test]
    fn test_delete_commands() {
        let ctx = ParseContext::default();

        let parse = voice_command_to_editor_op("voicemark delete last word", &ctx);
        assert_eq!(ops(&parse), vec![Operation::DeleteLastWord]);
        assert!(!parse.is_destructive());

        let parse = voice_command_to_editor_op("voicemark delete last sentence", &ctx);
        assert_eq!(
            parse,
            CommandParse::Confirm {
                ops: vec![Operation::DeleteLastSentence],
                prompt: "Delete the last sentence?".to_string(),
            }
        );
    }

    #[test]
    fn test_layout_and_history_commands() {
        let ctx = ParseContext::default();
        let tests = vec![
            ("new line", Operation::InsertNewLine),
            ("new paragraph", Operation::InsertNewParagraph),
            ("undo", Operation::Undo),
            ("redo", Operation::Redo),
        ];
        for (phrase, expected) in tests {
            let parse = voice_command_to_editor_op(&format!("voice mark {}", phrase), &ctx);
            assert_eq!(ops(&parse), vec![expected], "Failed for '{}'", phrase);
        }
    }

    #[test]
    fn test_unrecognized_phrase_is_dropped() {
        let ctx = ParseContext::default();
        let parse = voice_command_to_editor_op("voicemark do something weird", &ctx);
        assert_eq!(
            parse,
            CommandParse::Ops {
                ops: vec![],
                confidence: Confidence::Medium,
            }
        );
    }

    #[test]
    fn test_bare_trigger_is_noop() {
        let ctx = ParseContext::default();
        for input in ["voicemark", "  VOICEMARK  ", "voice mark"] {
            assert_eq!(
                voice_command_to_editor_op(input, &ctx),
                CommandParse::Ops {
                    ops: vec![],
                    confidence: Confidence::High,
                },
                "Failed for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_no_trigger_is_literal() {
        let ctx = ParseContext::default();
        assert_eq!(
            voice_command_to_editor_op("hello comma world", &ctx),
            CommandParse::Insert {
                text: "hello comma world".to_string()
            }
        );
        // Trigger must be a whole word
        assert_eq!(
            voice_command_to_editor_op("voicemarks comma", &ctx),
            CommandParse::Insert {
                text: "voicemarks comma".to_string()
            }
        );
    }

    #[test]
    fn test_period_alias_only_in_alt_locale() {
        let default_ctx = ParseContext::default();
        assert!(voice_command_to_editor_op("voicemark period", &default_ctx).is_unrecognized());

        let alt_ctx = ParseContext::default().with_locale(Locale::Alt);
        assert_eq!(
            ops(&voice_command_to_editor_op("voicemark period", &alt_ctx)),
            vec![Operation::insert(".")]
        );
        // The canonical phrase still works
        assert_eq!(
            ops(&voice_command_to_editor_op("voicemark full stop", &alt_ctx)),
            vec![Operation::insert(".")]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let ctx = ParseContext::new(Locale::Default, &["hey editor"]);
        assert_eq!(
            ops(&voice_command_to_editor_op("Hey Editor comma", &ctx)),
            vec![Operation::insert(",")]
        );
        assert!(matches!(
            voice_command_to_editor_op("voicemark comma", &ctx),
            CommandParse::Insert { .. }
        ));
    }

    #[test]
    fn test_supported_phrases_longest_first() {
        let phrases = supported_phrases(&ParseContext::default());
        assert!(phrases.windows(2).all(|w| w[0].len() >= w[1].len()));
        assert!(phrases.contains(&"full stop".to_string()));
        assert!(phrases.contains(&"toggle underlined".to_string()));
        assert!(!phrases.contains(&"period".to_string()));

        let alt = supported_phrases(&ParseContext::default().with_locale(Locale::Alt));
        assert!(alt.contains(&"period".to_string()));
    }

    #[test]
    fn test_every_supported_phrase_compiles() {
        let ctx = ParseContext::default().with_locale(Locale::Alt);
        for phrase in supported_phrases(&ctx) {
            let parse = voice_command_to_editor_op(&format!("voicemark {}", phrase), &ctx);
            assert!(!parse.ops().is_empty(), "No ops for '{}'", phrase);
        }
    }
}
