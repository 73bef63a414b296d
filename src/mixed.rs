//! Whole-utterance compilation with a confirmation gate
//!
//! Operations before the first destructive command can be applied right
//! away. The destructive command and everything after it wait until the
//! user approves.

use crate::context::ParseContext;
use crate::inline::{Segment, scan_utterance};
use crate::ops::{CommandParse, ConfirmPayload, MixedDictationResult, Operation};
use tracing::debug;

/// Compile one finalized utterance, gating on the first destructive command
pub fn parse_mixed_dictation_to_ops(text: &str, ctx: &ParseContext) -> MixedDictationResult {
    let segments = scan_utterance(text, ctx);
    let chunks = segments.iter().map(Segment::to_chunk).collect();

    let mut immediate_ops = Vec::new();
    let mut pending_ops = Vec::new();
    let mut gate: Option<(String, String)> = None;
    let mut spaced_after_gate = false;

    for segment in segments {
        let gated = gate.is_some();
        let target = if gated {
            &mut pending_ops
        } else {
            &mut immediate_ops
        };

        match segment {
            Segment::Text(value) => {
                if gated && !spaced_after_gate {
                    // The destructive command swallowed the whitespace after it
                    target.push(Operation::insert(format!(" {}", value.trim_start())));
                    spaced_after_gate = true;
                } else {
                    target.push(Operation::InsertText { text: value });
                }
            }
            Segment::Command {
                source,
                phrase,
                parse,
            } => match parse {
                CommandParse::Confirm { ops, prompt } if !gated => {
                    debug!("Gating {:?} behind confirmation", source);
                    pending_ops.extend(ops);
                    gate = Some((prompt, source));
                }
                CommandParse::Confirm { .. } => {
                    debug!(
                        "Second destructive command {:?} in one utterance, inserting literally",
                        source
                    );
                    target.push(Operation::InsertText { text: phrase });
                }
                CommandParse::Ops { ops, .. } => target.extend(ops),
                CommandParse::Insert { text } => target.push(Operation::InsertText { text }),
            },
        }
    }

    let confirm = gate.map(|(prompt, source_text)| {
        let all_ops = immediate_ops
            .iter()
            .chain(pending_ops.iter())
            .cloned()
            .collect();
        ConfirmPayload {
            prompt,
            source_text,
            pending_ops: pending_ops.clone(),
            all_ops,
        }
    });

    MixedDictationResult {
        chunks,
        immediate_ops,
        confirm,
        pending_ops,
    }
}
