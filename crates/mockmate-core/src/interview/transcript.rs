//! Ordered, append-only record of an interview.
//!
//! Channel traffic is appended in arrival order. Independent REST calls can
//! reserve a [`Ticket`] when they are issued; their results are released into
//! the transcript in reservation order no matter which completes first.

use super::message::{MessageKind, NewMessage, TranscriptMessage};
use std::collections::BTreeMap;

/// A reserved slot in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a reserved ticket blocks later entries until completed or abandoned"]
pub struct Ticket {
    generation: u64,
    slot: u64,
}

#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<TranscriptMessage>,
    /// Completed slots waiting for an earlier slot; `None` marks an abandoned slot.
    pending: BTreeMap<u64, Option<NewMessage>>,
    next_slot: u64,
    release_cursor: u64,
    next_seq: u64,
    generation: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message behind every outstanding reservation and returns
    /// the entries released by this call.
    pub fn append(&mut self, message: NewMessage) -> Vec<TranscriptMessage> {
        let ticket = self.reserve();
        self.complete(ticket, message)
    }

    /// Reserves the next slot.
    pub fn reserve(&mut self) -> Ticket {
        let slot = self.next_slot;
        self.next_slot += 1;
        Ticket {
            generation: self.generation,
            slot,
        }
    }

    /// Fills a reserved slot. Returns the entries that became visible, which
    /// is empty while an earlier slot is still outstanding. Tickets reserved
    /// before the last [`clear`](Self::clear) are ignored.
    pub fn complete(&mut self, ticket: Ticket, message: NewMessage) -> Vec<TranscriptMessage> {
        self.fill(ticket, Some(message))
    }

    /// Releases a reserved slot without producing an entry (failed request).
    pub fn abandon(&mut self, ticket: Ticket) -> Vec<TranscriptMessage> {
        self.fill(ticket, None)
    }

    fn fill(&mut self, ticket: Ticket, message: Option<NewMessage>) -> Vec<TranscriptMessage> {
        if ticket.generation != self.generation || ticket.slot < self.release_cursor {
            return Vec::new();
        }
        self.pending.insert(ticket.slot, message);

        let mut released = Vec::new();
        while let Some(entry) = self.pending.remove(&self.release_cursor) {
            self.release_cursor += 1;
            if let Some(message) = entry {
                let stored = TranscriptMessage {
                    seq: self.next_seq,
                    kind: message.kind,
                    content: message.content,
                    sender: message.sender,
                    received_at: chrono::Utc::now().to_rfc3339(),
                };
                self.next_seq += 1;
                self.messages.push(stored.clone());
                released.push(stored);
            }
        }
        released
    }

    /// Drops every entry and outstanding reservation (session reset).
    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending.clear();
        self.next_slot = 0;
        self.release_cursor = 0;
        self.generation += 1;
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.count_of(MessageKind::Answer)
    }

    pub fn count_of(&self, kind: MessageKind) -> usize {
        self.messages.iter().filter(|m| m.kind == kind).count()
    }

    /// Reservations not yet released.
    pub fn outstanding(&self) -> u64 {
        self.next_slot - self.release_cursor
    }
}
