// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only conversation log.
//!
//! One ordered sequence of tagged messages with two read projections:
//! [`MessageStore::list_displayable`] for the UI and
//! [`MessageStore::snapshot`] for model context and persistence.

use quill_core::types::Message;

/// Ordered, append-only log of conversation turns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from persisted messages, preserving their order.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Visible messages in insertion order. Cloning the iterator restarts it.
    pub fn list_displayable(&self) -> impl Iterator<Item = &Message> + Clone + '_ {
        self.messages.iter().filter(|m| m.is_display())
    }

    /// Every message, context-only entries included.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
