// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document synthesis controller.
//!
//! Two states: `Idle` and `Awaiting` (one synthesis call in flight). The
//! controller itself refuses work while `Awaiting`; callers do not need a
//! separate "generating" flag. Every round ends back in `Idle`, whether the
//! backend answered with a document, a reply or an error.
//!
//! Transitions out of `Awaiting`:
//! - **Document**: the snapshot is replaced, then a context-only copy of the
//!   document and a visible acknowledgement are appended.
//! - **Reply**: a visible assistant message is appended.
//! - **Error**: a visible `Error: ...` assistant message is appended; the
//!   user's own turn is already in the log and stays there.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use quill_context::ContextBuilder;
use quill_core::error::QuillError;
use quill_core::types::{ConversationId, Message, SynthesisResult};
use quill_core::SynthesisAdapter;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::conversation::Conversation;

/// Acknowledgement shown after a chat round produced a new document.
pub const DOCUMENT_UPDATED_ACK: &str =
    "I have updated the document for you. You can review the changes and ask for more updates if needed.";

/// Acknowledgement shown after a signature round produced a new document.
pub const SIGNATURE_PLACED_ACK: &str = "I have updated the document with the signature placement.";

/// Shown when a signature round gets an empty reply instead of a document.
const EMPTY_REPLY_FALLBACK: &str = "AI response received.";

/// States of the synthesis state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No synthesis call in flight; submissions are accepted.
    Idle,
    /// One synthesis call in flight; submissions are refused.
    Awaiting,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "idle"),
            ControllerState::Awaiting => write!(f, "awaiting"),
        }
    }
}

/// How a completed round changed the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// The assistant continued the dialogue; the document is unchanged.
    Replied { text: String },
    /// The document snapshot was replaced.
    DocumentReplaced,
    /// A document was required but the assistant replied instead. The reply
    /// was shown; the document is unchanged.
    ContractViolation { reply: String },
    /// The boundary call failed; `message` was shown as an error turn.
    Failed { message: String },
}

/// What kind of round is running; decides acknowledgement text and
/// whether a plain reply is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundKind {
    Chat,
    Signature,
}

/// Proof that the caller holds the `Awaiting` state. Dropping it returns
/// the controller to `Idle`.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives synthesis rounds for one conversation.
pub struct DocumentController {
    conversation: Mutex<Conversation>,
    awaiting: AtomicBool,
    synthesis: Arc<dyn SynthesisAdapter + Send + Sync>,
    context: ContextBuilder,
}

impl DocumentController {
    /// Creates an idle controller over a new or hydrated conversation.
    pub fn new(
        conversation: Conversation,
        synthesis: Arc<dyn SynthesisAdapter + Send + Sync>,
        context: ContextBuilder,
    ) -> Self {
        Self {
            conversation: Mutex::new(conversation),
            awaiting: AtomicBool::new(false),
            synthesis,
            context,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.awaiting.load(Ordering::Acquire) {
            ControllerState::Awaiting
        } else {
            ControllerState::Idle
        }
    }

    /// A copy of the conversation as it is right now.
    pub async fn conversation(&self) -> Conversation {
        self.conversation.lock().await.clone()
    }

    /// Visible messages, in order.
    pub async fn displayable(&self) -> Vec<Message> {
        self.conversation
            .lock()
            .await
            .messages()
            .list_displayable()
            .cloned()
            .collect()
    }

    pub async fn document(&self) -> Option<String> {
        self.conversation.lock().await.document().map(str::to_string)
    }

    pub async fn set_title(&self, title: impl Into<String>) {
        self.conversation.lock().await.set_title(title);
    }

    /// Sends a user message and applies the result.
    ///
    /// Returns `Err(Busy)` while another round is in flight and
    /// `Err(Validation)` for blank input; in both cases nothing is appended.
    /// Boundary failures are not errors here: they end the round with
    /// [`SynthesisOutcome::Failed`].
    pub async fn submit(&self, text: &str) -> Result<SynthesisOutcome, QuillError> {
        if text.trim().is_empty() {
            return Err(QuillError::Validation("message must not be empty".into()));
        }
        let in_flight = self.begin()?;
        let user_turn = Message::user(text);

        let payload = {
            let mut conversation = self.conversation.lock().await;
            let payload = self.context.assemble(
                conversation.messages().snapshot(),
                conversation.document(),
                user_turn.clone(),
            );
            conversation.append(user_turn);
            payload
        };

        Ok(self
            .complete_round(&in_flight, payload.messages, RoundKind::Chat)
            .await)
    }

    /// Replaces the document with user-edited text. Appends nothing.
    pub async fn edit_document(&self, text: String) -> Result<(), QuillError> {
        let _in_flight = self.begin()?;
        let mut conversation = self.conversation.lock().await;
        conversation.replace_document(text);
        debug!("document replaced by manual edit");
        Ok(())
    }

    /// Claims the `Awaiting` state or fails with `Busy`.
    pub(crate) fn begin(&self) -> Result<InFlight<'_>, QuillError> {
        self.awaiting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| QuillError::Busy)?;
        Ok(InFlight {
            flag: &self.awaiting,
        })
    }

    /// Runs a signature instruction through the same path as [`submit`],
    /// without logging the instruction itself.
    ///
    /// [`submit`]: DocumentController::submit
    pub(crate) async fn submit_instruction(
        &self,
        in_flight: &InFlight<'_>,
        instruction: String,
    ) -> SynthesisOutcome {
        let payload = {
            let conversation = self.conversation.lock().await;
            self.context.assemble(
                conversation.messages().snapshot(),
                conversation.document(),
                Message::user(instruction),
            )
        };

        self.complete_round(in_flight, payload.messages, RoundKind::Signature)
            .await
    }

    pub(crate) async fn mark_persisted(&self, id: ConversationId) -> Result<(), QuillError> {
        self.conversation.lock().await.mark_persisted(id)
    }

    async fn complete_round(
        &self,
        _in_flight: &InFlight<'_>,
        payload: Vec<Message>,
        kind: RoundKind,
    ) -> SynthesisOutcome {
        debug!(payload_len = payload.len(), ?kind, "synthesis call started");
        let result = self.synthesis.synthesize(&payload).await;

        let mut conversation = self.conversation.lock().await;
        match result {
            Ok(SynthesisResult::Document { text }) => {
                let previous = conversation.replace_document(text.clone());
                conversation.append(Message::document_context(text));
                conversation.append(Message::assistant(match kind {
                    RoundKind::Chat => DOCUMENT_UPDATED_ACK,
                    RoundKind::Signature => SIGNATURE_PLACED_ACK,
                }));
                info!(
                    ?kind,
                    replaced_existing = previous.is_some(),
                    "document snapshot replaced"
                );
                SynthesisOutcome::DocumentReplaced
            }
            Ok(SynthesisResult::Reply { text }) if kind == RoundKind::Chat => {
                conversation.append(Message::assistant(text.clone()));
                SynthesisOutcome::Replied { text }
            }
            Ok(SynthesisResult::Reply { text }) => {
                warn!("signature round answered with a reply instead of a document");
                let shown = if text.trim().is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    text.clone()
                };
                conversation.append(Message::assistant(shown));
                SynthesisOutcome::ContractViolation { reply: text }
            }
            Err(e) => {
                warn!(error = %e, ?kind, "synthesis call failed");
                let message = e.user_facing_message();
                conversation.append(Message::assistant(format!("Error: {message}")));
                SynthesisOutcome::Failed { message }
            }
        }
    }
}
