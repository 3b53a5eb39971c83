// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload assembly for synthesis calls.
//!
//! Two policies, chosen by whether a document snapshot exists:
//! - **Full history**: no document yet, so the model sees every stored turn
//!   followed by the new user message.
//! - **Document reset**: a document exists, so the payload is exactly three
//!   entries (preamble with the full document, a canned acknowledgement, the
//!   new message). Payload size is then bounded by the document length, not
//!   by the history length.
//!
//! The builder only reads the history; it never touches the store.

use quill_config::model::{ContextConfig, DOCUMENT_PLACEHOLDER};
use quill_core::types::Message;
use tracing::debug;

/// Which assembly policy produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextPolicy {
    FullHistory,
    DocumentReset,
}

/// A transient payload ready for the synthesis adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPayload {
    pub messages: Vec<Message>,
    pub policy: ContextPolicy,
}

/// Builds synthesis payloads from the message history and the current document.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    document_preamble: String,
    document_acknowledgement: String,
}

impl ContextBuilder {
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            document_preamble: config.document_preamble.clone(),
            document_acknowledgement: config.document_acknowledgement.clone(),
        }
    }

    /// Assembles the payload for `next`, the message about to be sent.
    ///
    /// `history` is the full log (context-only entries included) *before*
    /// `next` was appended.
    pub fn assemble(
        &self,
        history: &[Message],
        document: Option<&str>,
        next: Message,
    ) -> AssembledPayload {
        let payload = match document {
            None => {
                let mut messages = Vec::with_capacity(history.len() + 1);
                messages.extend_from_slice(history);
                messages.push(next);
                AssembledPayload {
                    messages,
                    policy: ContextPolicy::FullHistory,
                }
            }
            Some(document) => AssembledPayload {
                messages: vec![
                    Message::user(self.render_preamble(document)),
                    Message::assistant(self.document_acknowledgement.clone()),
                    next,
                ],
                policy: ContextPolicy::DocumentReset,
            },
        };

        debug!(
            policy = ?payload.policy,
            history_len = history.len(),
            payload_len = payload.messages.len(),
            document_bytes = document.map_or(0, str::len),
            "assembled synthesis payload"
        );

        payload
    }

    /// The synthetic user turn carrying the full document.
    pub fn render_preamble(&self, document: &str) -> String {
        self.document_preamble.replace(DOCUMENT_PLACEHOLDER, document)
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(&ContextConfig::default())
    }
}
