//! Transcript message types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a transcript entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Question,
    Answer,
    Evaluation,
    FinalDecision,
    Error,
}

impl MessageKind {
    /// Heading shown above the message body, if the kind has one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MessageKind::Evaluation => Some("Evaluation:"),
            MessageKind::FinalDecision => Some("Final Decision:"),
            MessageKind::Error => Some("Error:"),
            MessageKind::Question | MessageKind::Answer => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Question => "question",
            MessageKind::Answer => "answer",
            MessageKind::Evaluation => "evaluation",
            MessageKind::FinalDecision => "final_decision",
            MessageKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Ai,
    User,
}

/// A message that has not been placed in a transcript yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub kind: MessageKind,
    pub content: String,
    pub sender: Sender,
}

impl NewMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>, sender: Sender) -> Self {
        Self {
            kind,
            content: content.into(),
            sender,
        }
    }

    pub fn answer(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Answer, content, Sender::User)
    }

    pub fn from_ai(kind: MessageKind, content: impl Into<String>) -> Self {
        Self::new(kind, content, Sender::Ai)
    }
}

/// A single entry of the interview transcript.
///
/// Entries are immutable once appended; `seq` is assigned by the
/// [`Transcript`](super::Transcript) and grows monotonically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub seq: u64,
    pub kind: MessageKind,
    pub content: String,
    pub sender: Sender,
    /// Timestamp when the entry was appended (RFC 3339).
    pub received_at: String,
}
