//! Editor adapters that execute compiled operations
//!
//! The compiler only produces [`Operation`] values; something has to apply
//! them to a document. [`TextBuffer`] is a plain-text document with the
//! cursor pinned to the end, enough for the CLI and for exercising the
//! compiler end-to-end.

use crate::ops::{FormatAction, FormatStyle, Operation};
use crate::sentence::find_delete_start_index;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

/// Default number of undo steps kept by [`TextBuffer`]
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Error type for editor operations
///
/// [`TextBuffer`] never fails. Adapters backed by a real editor return
/// `Rejected` when the host refuses an edit (read-only buffer, lost focus).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EditorError {
    #[error("editor rejected {op}: {reason}")]
    Rejected { op: String, reason: String },
}

/// Anything that can replay compiled operations
pub trait EditorAdapter {
    /// Apply one operation at the cursor
    fn apply(&mut self, op: &Operation) -> Result<(), EditorError>;

    /// Current document text
    fn text(&self) -> &str;
}

/// Document state captured for undo/redo
#[derive(Debug, Clone)]
struct Snapshot {
    text: String,
    styles: BTreeSet<FormatStyle>,
}

/// Plain-text document with bounded undo history
#[derive(Debug)]
pub struct TextBuffer {
    text: String,
    styles: BTreeSet<FormatStyle>,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    history_size: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl TextBuffer {
    pub fn new(history_size: usize) -> Self {
        Self {
            text: String::new(),
            styles: BTreeSet::new(),
            undo_stack: VecDeque::with_capacity(history_size.min(1024)),
            redo_stack: Vec::new(),
            history_size,
        }
    }

    /// Start from existing text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Styles currently switched on at the cursor
    pub fn active_styles(&self) -> impl Iterator<Item = FormatStyle> + '_ {
        self.styles.iter().copied()
    }

    pub fn is_active(&self, style: FormatStyle) -> bool {
        self.styles.contains(&style)
    }

    /// Get the number of operations in the undo buffer
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of operations in the redo buffer
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            styles: self.styles.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.text = snapshot.text;
        self.styles = snapshot.styles;
    }

    /// Push the current state to the undo stack before an edit
    fn record(&mut self) {
        if self.history_size == 0 {
            return;
        }
        if self.undo_stack.len() >= self.history_size {
            self.undo_stack.pop_front();
        }
        let snapshot = self.snapshot();
        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();
    }

    fn undo(&mut self) {
        let Some(previous) = self.undo_stack.pop_back() else {
            debug!("Nothing to undo");
            return;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.restore(previous);
    }

    fn redo(&mut self) {
        let Some(next) = self.redo_stack.pop() else {
            debug!("Nothing to redo");
            return;
        };
        let current = self.snapshot();
        self.undo_stack.push_back(current);
        self.restore(next);
    }

    fn format(&mut self, style: FormatStyle, action: FormatAction) {
        match action {
            FormatAction::Make => {
                self.styles.insert(style);
            }
            FormatAction::Unmake => {
                self.styles.remove(&style);
            }
            FormatAction::Toggle => {
                if !self.styles.remove(&style) {
                    self.styles.insert(style);
                }
            }
        }
    }

    /// Remove trailing whitespace, then the last run of non-whitespace
    fn delete_last_word(&mut self) {
        let trimmed = self.text.trim_end_matches(char::is_whitespace);
        let word_start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.text.truncate(word_start);
    }

    /// Truncate at the start of the last sentence of the last line
    fn delete_last_sentence(&mut self) {
        let block_start = self.text.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let block = &self.text[block_start..];
        let start = find_delete_start_index(block, block.len());
        self.text.truncate(block_start + start);
    }
}

impl EditorAdapter for TextBuffer {
    fn apply(&mut self, op: &Operation) -> Result<(), EditorError> {
        match op {
            Operation::Undo => self.undo(),
            Operation::Redo => self.redo(),
            Operation::Format { style, action } => {
                self.record();
                self.format(*style, *action);
            }
            Operation::InsertText { text } => {
                if text.is_empty() {
                    return Ok(());
                }
                self.record();
                self.text.push_str(text);
            }
            Operation::InsertNewLine => {
                self.record();
                self.text.push('\n');
            }
            Operation::InsertNewParagraph => {
                self.record();
                self.text.push_str("\n\n");
            }
            Operation::DeleteLastWord => {
                self.record();
                self.delete_last_word();
            }
            Operation::DeleteLastSentence => {
                self.record();
                self.delete_last_sentence();
            }
        }
        Ok(())
    }

    fn text(&self) -> &str {
        &self.text
    }
}
