// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation aggregate: title, persistence identity, message log and
//! the current document snapshot.

use quill_core::error::QuillError;
use quill_core::types::{
    ConversationId, ConversationIdentity, ConversationRecord, Message,
};

use crate::store::MessageStore;

/// File name used for PDF exports of untitled conversations.
const DEFAULT_EXPORT_STEM: &str = "legal_document";

/// A conversation and everything it exclusively owns.
///
/// The log and the document are only mutated through crate-internal methods
/// called by the synthesis controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    identity: ConversationIdentity,
    title: String,
    store: MessageStore,
    document: Option<String>,
}

impl Conversation {
    /// A fresh, unsaved conversation with no messages and no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a saved conversation from its backend record.
    pub fn hydrate(id: ConversationId, record: ConversationRecord) -> Self {
        Self {
            identity: ConversationIdentity::Persisted(id),
            title: record.title,
            store: MessageStore::from_messages(record.messages),
            document: record.latest_document.filter(|d| !d.is_empty()),
        }
    }

    /// The wire record sent on create/update.
    pub fn to_record(&self) -> ConversationRecord {
        ConversationRecord {
            title: self.title.clone(),
            messages: self.store.snapshot().to_vec(),
            latest_document: self.document.clone(),
        }
    }

    pub fn identity(&self) -> &ConversationIdentity {
        &self.identity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn messages(&self) -> &MessageStore {
        &self.store
    }

    /// Current document snapshot, if one exists.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// `<title>.pdf`, or `legal_document.pdf` for an untitled conversation.
    ///
    /// The title is reduced to a single path component: separators, control
    /// characters and characters Windows forbids become `_`, and leading or
    /// trailing dots and spaces are dropped.
    pub fn export_file_name(&self) -> String {
        let sanitized: String = self
            .title
            .chars()
            .map(|c| if is_forbidden_in_file_name(c) { '_' } else { c })
            .collect();
        let stem = sanitized.trim_matches(|c: char| c == '.' || c.is_whitespace());
        if stem.is_empty() {
            format!("{DEFAULT_EXPORT_STEM}.pdf")
        } else {
            format!("{stem}.pdf")
        }
    }

    pub(crate) fn append(&mut self, message: Message) {
        self.store.append(message);
    }

    /// Replaces the document wholesale and returns the discarded one.
    pub(crate) fn replace_document(&mut self, text: String) -> Option<String> {
        self.document.replace(text)
    }

    /// Takes the single `Unsaved -> Persisted` transition.
    pub(crate) fn mark_persisted(&mut self, id: ConversationId) -> Result<(), QuillError> {
        match &self.identity {
            ConversationIdentity::Unsaved => {
                self.identity = ConversationIdentity::Persisted(id);
                Ok(())
            }
            ConversationIdentity::Persisted(existing) => Err(QuillError::Internal(format!(
                "conversation already persisted as {existing}"
            ))),
        }
    }
}

fn is_forbidden_in_file_name(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}
