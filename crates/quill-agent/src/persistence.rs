// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Saving and loading conversations through the external store.

use std::sync::Arc;

use quill_core::error::QuillError;
use quill_core::types::{ConversationId, ConversationIdentity, ConversationSummary};
use quill_core::ConversationStoreAdapter;
use tracing::info;

use crate::controller::DocumentController;
use crate::conversation::Conversation;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save: the backend assigned this id.
    Created(ConversationId),
    /// The existing record was overwritten.
    Updated(ConversationId),
}

/// Conversation persistence on top of a [`ConversationStoreAdapter`].
#[derive(Clone)]
pub struct ConversationPersistence {
    store: Arc<dyn ConversationStoreAdapter + Send + Sync>,
}

impl ConversationPersistence {
    pub fn new(store: Arc<dyn ConversationStoreAdapter + Send + Sync>) -> Self {
        Self { store }
    }

    /// Loads a saved conversation, ready to hand to a controller.
    pub async fn load(&self, id: &ConversationId) -> Result<Conversation, QuillError> {
        let record = self.store.fetch(id).await?;
        info!(conversation_id = %id, messages = record.messages.len(), "conversation loaded");
        Ok(Conversation::hydrate(id.clone(), record))
    }

    /// Creates or updates the controller's conversation.
    ///
    /// Holds the controller's `Awaiting` state for the whole call, so an
    /// overlapping save or synthesis round gets `Busy`. A blank title or an
    /// empty log is rejected before any network call.
    pub async fn save(&self, controller: &DocumentController) -> Result<SaveOutcome, QuillError> {
        let _in_flight = controller.begin()?;
        let conversation = controller.conversation().await;
        if conversation.title().trim().is_empty() || conversation.messages().is_empty() {
            return Err(QuillError::Validation(
                "provide a title and have at least one message in the conversation".into(),
            ));
        }

        let record = conversation.to_record();
        match conversation.identity() {
            ConversationIdentity::Unsaved => {
                let id = self.store.create(&record).await?;
                controller.mark_persisted(id.clone()).await?;
                info!(conversation_id = %id, "conversation created");
                Ok(SaveOutcome::Created(id))
            }
            ConversationIdentity::Persisted(id) => {
                self.store.update(id, &record).await?;
                info!(conversation_id = %id, "conversation updated");
                Ok(SaveOutcome::Updated(id.clone()))
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<ConversationSummary>, QuillError> {
        self.store.list().await
    }

    pub async fn delete(&self, id: &ConversationId) -> Result<(), QuillError> {
        self.store.delete(id).await?;
        info!(conversation_id = %id, "conversation deleted");
        Ok(())
    }
}
