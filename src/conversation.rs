// src/conversation.rs

use chrono::Utc;

/// Unique per-conversation message identifier. Ids are taken from the wall
/// clock in milliseconds and kept strictly increasing across appends.
pub type MessageId = u64;

/// Who authored a message. There are exactly two parties on this screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single chat turn. `text` is non-empty by construction: blank input is
/// rejected before a message is ever created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
}

/// Append-only, in-memory log of messages, insertion order meaningful with
/// the most recent message last. Holds no I/O and performs no validation;
/// it lives exactly as long as the screen and is dropped with it.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Appends a message to the end of the log and returns its id. This is
    /// the only write operation; entries are never mutated or removed.
    pub fn push(&mut self, text: impl Into<String>, sender: Sender) -> MessageId {
        let id = self.next_id();
        self.messages.push(Message {
            id,
            text: text.into(),
            sender,
        });
        id
    }

    // Millisecond timestamps collide when appends land on the same tick, so
    // the id is bumped past the previous one to keep ids strictly increasing.
    fn next_id(&self) -> MessageId {
        let now = Utc::now().timestamp_millis().max(0) as MessageId;
        match self.messages.last() {
            Some(last) if now <= last.id => last.id + 1,
            _ => now,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.count_by(Sender::User)
    }

    pub fn bot_count(&self) -> usize {
        self.count_by(Sender::Bot)
    }

    fn count_by(&self, sender: Sender) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}
