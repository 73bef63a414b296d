//! Dictation session: feeds finalized utterances into an editor
//!
//! Owns the two pieces of state the compiler deliberately does not: the
//! text applied last (for spacing between utterances) and a destructive
//! edit waiting for the user's answer.

use crate::context::ParseContext;
use crate::editor::{EditorAdapter, EditorError};
use crate::mixed::parse_mixed_dictation_to_ops;
use crate::ops::{ConfirmPayload, Operation};
use crate::spacing::normalize_spacing;
use crate::transcript::parse_transcript;
use tracing::debug;

/// Result of processing an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// All operations were applied
    Applied { ops: usize },
    /// Operations before the destructive command were applied; the rest
    /// wait for [`DictationSession::resolve_confirmation`]
    AwaitingConfirmation { prompt: String },
}

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("waiting for an answer to {0:?}")]
    ConfirmationPending(String),
    #[error("no confirmation is pending")]
    NothingPending,
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Applies compiled dictation to an editor with smart spacing
pub struct DictationSession<E: EditorAdapter> {
    editor: E,
    ctx: ParseContext,
    /// Last text applied, only its final character matters for spacing
    last_text: String,
    pending: Option<ConfirmPayload>,
}

impl<E: EditorAdapter> DictationSession<E> {
    pub fn new(editor: E, ctx: ParseContext) -> Self {
        let last_text = tail(editor.text());
        Self {
            editor,
            ctx,
            last_text,
            pending: None,
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn into_editor(self) -> E {
        self.editor
    }

    pub fn context(&self) -> &ParseContext {
        &self.ctx
    }

    /// Prompt of the confirmation waiting for an answer, if any
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending.as_ref().map(|c| c.prompt.as_str())
    }

    /// Compile and apply one finalized utterance
    pub fn process_utterance(&mut self, text: &str) -> Result<SessionOutcome, SessionError> {
        if let Some(prompt) = self.pending_prompt() {
            return Err(SessionError::ConfirmationPending(prompt.to_string()));
        }

        debug!("Utterance: {:?}", text);
        let result = parse_mixed_dictation_to_ops(text, &self.ctx);
        debug!(
            "Compiled: immediate={:?}, pending={:?}",
            result.immediate_ops, result.pending_ops
        );

        self.apply_all(&result.immediate_ops)?;

        match result.confirm {
            Some(confirm) => {
                let prompt = confirm.prompt.clone();
                self.pending = Some(confirm);
                Ok(SessionOutcome::AwaitingConfirmation { prompt })
            }
            None => Ok(SessionOutcome::Applied {
                ops: result.immediate_ops.len(),
            }),
        }
    }

    /// Compile and apply a multi-sentence transcript. Destructive commands
    /// are never gated here; they arrive as literal text.
    pub fn process_transcript(&mut self, text: &str) -> Result<SessionOutcome, SessionError> {
        if let Some(prompt) = self.pending_prompt() {
            return Err(SessionError::ConfirmationPending(prompt.to_string()));
        }

        let ops = parse_transcript(text, &self.ctx);
        self.apply_all(&ops)?;
        Ok(SessionOutcome::Applied { ops: ops.len() })
    }

    /// Apply (when `approved`) or drop the pending operations.
    ///
    /// Returns the number of operations applied.
    pub fn resolve_confirmation(&mut self, approved: bool) -> Result<usize, SessionError> {
        let confirm = self.pending.take().ok_or(SessionError::NothingPending)?;

        if !approved {
            debug!("Rejected {:?}", confirm.source_text);
            return Ok(0);
        }

        debug!("Approved {:?}", confirm.source_text);
        self.apply_all(&confirm.pending_ops)?;
        Ok(confirm.pending_ops.len())
    }

    fn apply_all(&mut self, ops: &[Operation]) -> Result<(), SessionError> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    fn apply(&mut self, op: &Operation) -> Result<(), SessionError> {
        match op {
            Operation::InsertText { text } => {
                // Never stack a leading space on top of existing whitespace
                let text = if self.last_text.chars().last().is_none_or(char::is_whitespace) {
                    text.trim_start_matches([' ', '\t'])
                } else {
                    text.as_str()
                };
                if text.is_empty() {
                    return Ok(());
                }
                let spaced = format!("{}{}", normalize_spacing(&self.last_text, text), text);
                if spaced != *text {
                    debug!("Smart text: {:?} -> {:?}", text, spaced);
                }
                self.editor.apply(&Operation::InsertText {
                    text: spaced.clone(),
                })?;
                self.last_text = spaced;
            }
            Operation::InsertNewLine | Operation::InsertNewParagraph => {
                self.editor.apply(op)?;
                self.last_text = "\n".to_string();
            }
            Operation::Format { .. } => {
                self.editor.apply(op)?;
            }
            Operation::DeleteLastWord
            | Operation::DeleteLastSentence
            | Operation::Undo
            | Operation::Redo => {
                self.editor.apply(op)?;
                // We no longer know what was applied last; ask the document
                self.last_text = tail(self.editor.text());
            }
        }
        Ok(())
    }
}

/// Final character of `text` as a string (empty for empty text)
fn tail(text: &str) -> String {
    text.chars().last().map(String::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::TextBuffer;

    fn session() -> DictationSession<TextBuffer> {
        DictationSession::new(TextBuffer::default(), ParseContext::default())
    }

    #[test]
    fn test_utterances_are_spaced() {
        let mut s = session();
        s.process_utterance("Hello").unwrap();
        s.process_utterance("world voicemark comma").unwrap();
        s.process_utterance("how are you voicemark question mark").unwrap();
        assert_eq!(s.editor().text(), "Hello world, how are you?");
    }

    #[test]
    fn test_no_space_after_new_line() {
        let mut s = session();
        s.process_utterance("Title voicemark new line").unwrap();
        s.process_utterance("Body").unwrap();
        assert_eq!(s.editor().text(), "Title\nBody");
    }

    #[test]
    fn test_unsupported_command_keeps_words() {
        let mut s = session();
        s.process_utterance("Hello voicemark do something weird").unwrap();
        assert_eq!(s.editor().text(), "Hello voicemark do something weird");
    }

    #[test]
    fn test_confirmation_approved() {
        let mut s = session();
        s.process_utterance("First. Second.").unwrap();
        let outcome = s
            .process_utterance("Third voicemark delete last sentence Fourth")
            .unwrap();
        assert_eq!(
            outcome,
            SessionOutcome::AwaitingConfirmation {
                prompt: "Delete the last sentence?".to_string()
            }
        );
        assert_eq!(s.editor().text(), "First. Second. Third");
        assert_eq!(s.pending_prompt(), Some("Delete the last sentence?"));

        assert_eq!(s.resolve_confirmation(true).unwrap(), 2);
        assert_eq!(s.editor().text(), "First. Fourth");
        assert_eq!(s.pending_prompt(), None);
    }

    #[test]
    fn test_confirmation_rejected() {
        let mut s = session();
        s.process_utterance("Keep this. voicemark delete last sentence more")
            .unwrap();
        assert_eq!(s.resolve_confirmation(false).unwrap(), 0);
        assert_eq!(s.editor().text(), "Keep this.");
    }

    #[test]
    fn test_pending_confirmation_blocks_new_input() {
        let mut s = session();
        s.process_utterance("voicemark delete last sentence").unwrap();
        assert!(matches!(
            s.process_utterance("more"),
            Err(SessionError::ConfirmationPending(_))
        ));
        assert!(matches!(
            s.process_transcript("more"),
            Err(SessionError::ConfirmationPending(_))
        ));
        s.resolve_confirmation(false).unwrap();
        assert!(matches!(
            s.resolve_confirmation(true),
            Err(SessionError::NothingPending)
        ));
    }

    #[test]
    fn test_spacing_after_delete_word() {
        let mut s = session();
        s.process_utterance("one two voicemark delete last word").unwrap();
        s.process_utterance("three").unwrap();
        assert_eq!(s.editor().text(), "one three");
    }

    #[test]
    fn test_transcript() {
        let mut s = session();
        s.process_transcript("Hello world.  voicemark new line Bye!")
            .unwrap();
        assert_eq!(s.editor().text(), "Hello world.\nBye!");
    }

    /// Editor whose host stops accepting edits after the first insert
    #[derive(Default)]
    struct ReadOnlyAfterFirst {
        text: String,
    }

    impl EditorAdapter for ReadOnlyAfterFirst {
        fn apply(&mut self, op: &Operation) -> Result<(), EditorError> {
            match op {
                Operation::InsertText { text } if self.text.is_empty() => {
                    self.text.push_str(text);
                    Ok(())
                }
                _ => Err(EditorError::Rejected {
                    op: op.to_string(),
                    reason: "buffer is read-only".to_string(),
                }),
            }
        }

        fn text(&self) -> &str {
            &self.text
        }
    }

    #[test]
    fn test_editor_rejection_is_reported() {
        let mut s = DictationSession::new(ReadOnlyAfterFirst::default(), ParseContext::default());
        s.process_utterance("Hello").unwrap();

        let err = s.process_utterance("voicemark comma").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Editor(EditorError::Rejected { .. })
        ));
        assert!(err.to_string().contains("buffer is read-only"), "{}", err);
        assert_eq!(s.editor().text(), "Hello");
    }

    #[test]
    fn test_existing_document_spacing() {
        let buffer = TextBuffer::default().with_text("Existing");
        let mut s = DictationSession::new(buffer, ParseContext::default());
        s.process_utterance("text").unwrap();
        assert_eq!(s.into_editor().text(), "Existing text");
    }
}
