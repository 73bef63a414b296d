//! Voice command compiler for dictation
//!
//! Turns finalized recognizer transcripts into ordered document edits.
//! Spoken commands are introduced by a trigger phrase ("voicemark" by
//! default) and control punctuation, layout, formatting and deletion.
//!
//! # Features
//!
//! - **Inline commands**: "hello voicemark comma world" becomes
//!   `[insert("hello"), insert(","), insert(" world")]`
//! - **Confirmation gate**: "voicemark delete last sentence" splits the
//!   utterance into operations applied now and operations that wait for
//!   the user's approval
//! - **Transcript chunking**: multi-sentence results are split at
//!   terminators and glued back with exactly one space
//! - **Smart spacing**: [`normalize_spacing`] decides whether two
//!   concatenated fragments need a space
//! - **Locale aliases**: the alternate locale accepts "period" for
//!   "full stop"
//!
//! The compiler is pure and synchronous. Applying operations is the job of
//! an [`EditorAdapter`]; [`DictationSession`] wires the two together.

pub mod config;
pub mod context;
pub mod editor;
pub mod grammar;
pub mod inline;
pub mod mixed;
pub mod ops;
pub mod prefix;
pub mod sentence;
pub mod session;
pub mod spacing;
pub mod transcript;

pub use config::Config;
pub use context::{Locale, ParseContext};
pub use editor::{EditorAdapter, EditorError, TextBuffer};
pub use grammar::voice_command_to_editor_op;
pub use inline::{chunk_utterance, parse_inline_voice_mark};
pub use mixed::parse_mixed_dictation_to_ops;
pub use ops::{
    Chunk, CommandParse, Confidence, ConfirmPayload, FormatAction, FormatStyle,
    MixedDictationResult, Operation,
};
pub use prefix::{PrefixMatch, find_prefix};
pub use sentence::find_delete_start_index;
pub use session::{DictationSession, SessionError, SessionOutcome};
pub use spacing::normalize_spacing;
pub use transcript::{parse_transcript, split_transcript};
