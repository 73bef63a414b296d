//! Document-edit operations produced by the command compiler
//!
//! Everything here is a plain value: created per compile call, replayed
//! left-to-right by an editor adapter, never mutated after construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text style a format command applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    Bold,
    Italic,
    Underline,
}

impl FormatStyle {
    /// Parse a spoken style word, folding the `italics`/`underlined` aliases
    pub fn from_spoken(word: &str) -> Option<Self> {
        match word {
            "bold" => Some(FormatStyle::Bold),
            "italic" | "italics" => Some(FormatStyle::Italic),
            "underline" | "underlined" => Some(FormatStyle::Underline),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatStyle::Bold => "bold",
            FormatStyle::Italic => "italic",
            FormatStyle::Underline => "underline",
        }
    }
}

/// What a format command does to its style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatAction {
    Make,
    Unmake,
    Toggle,
}

impl FormatAction {
    pub fn from_spoken(word: &str) -> Option<Self> {
        match word {
            "make" => Some(FormatAction::Make),
            "unmake" => Some(FormatAction::Unmake),
            "toggle" => Some(FormatAction::Toggle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatAction::Make => "make",
            FormatAction::Unmake => "unmake",
            FormatAction::Toggle => "toggle",
        }
    }
}

/// A single edit to apply against the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Operation {
    Format {
        style: FormatStyle,
        action: FormatAction,
    },
    InsertText {
        text: String,
    },
    InsertNewLine,
    InsertNewParagraph,
    DeleteLastWord,
    DeleteLastSentence,
    Undo,
    Redo,
}

impl Operation {
    /// Shorthand for `Operation::InsertText`
    pub fn insert(text: impl Into<String>) -> Self {
        Operation::InsertText { text: text.into() }
    }

    pub fn format(action: FormatAction, style: FormatStyle) -> Self {
        Operation::Format { style, action }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Format { style, action } => {
                write!(f, "format({} {})", action.as_str(), style.as_str())
            }
            Operation::InsertText { text } => write!(f, "insert({:?})", text),
            Operation::InsertNewLine => write!(f, "new line"),
            Operation::InsertNewParagraph => write!(f, "new paragraph"),
            Operation::DeleteLastWord => write!(f, "delete last word"),
            Operation::DeleteLastSentence => write!(f, "delete last sentence"),
            Operation::Undo => write!(f, "undo"),
            Operation::Redo => write!(f, "redo"),
        }
    }
}

/// Whether a matched trigger's phrase was found in the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
}

/// Result of compiling one command phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandParse {
    /// No trigger found: the whole input is literal text
    Insert { text: String },
    /// Trigger found. Empty `ops` with medium confidence means the phrase
    /// was not recognized and is dropped.
    Ops {
        ops: Vec<Operation>,
        confidence: Confidence,
    },
    /// Destructive command: `ops` must only be applied after approval
    Confirm { ops: Vec<Operation>, prompt: String },
}

impl CommandParse {
    /// Operations carried by this parse (empty for literal text)
    pub fn ops(&self) -> &[Operation] {
        match self {
            CommandParse::Insert { .. } => &[],
            CommandParse::Ops { ops, .. } | CommandParse::Confirm { ops, .. } => ops,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, CommandParse::Confirm { .. })
    }

    /// Trigger matched but the phrase was not in the grammar
    pub fn is_unrecognized(&self) -> bool {
        matches!(
            self,
            CommandParse::Ops {
                ops,
                confidence: Confidence::Medium,
            } if ops.is_empty()
        )
    }
}

/// A contiguous text or command segment of a scanned utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Chunk {
    Text {
        value: String,
    },
    Command {
        #[serde(rename = "sourceText")]
        source_text: String,
        parse: CommandParse,
    },
}

impl Chunk {
    /// The utterance text this chunk stands for
    pub fn source(&self) -> &str {
        match self {
            Chunk::Text { value } => value,
            Chunk::Command { source_text, .. } => source_text,
        }
    }
}

/// Confirmation the UI must present before `pending_ops` are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPayload {
    pub prompt: String,
    pub source_text: String,
    pub pending_ops: Vec<Operation>,
    /// `immediate_ops ++ pending_ops`, for callers that defer the whole utterance
    pub all_ops: Vec<Operation>,
}

/// Outcome of compiling one utterance end-to-end
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedDictationResult {
    pub chunks: Vec<Chunk>,
    pub immediate_ops: Vec<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmPayload>,
    pub pending_ops: Vec<Operation>,
}

impl MixedDictationResult {
    pub fn needs_confirmation(&self) -> bool {
        self.confirm.is_some()
    }
}
