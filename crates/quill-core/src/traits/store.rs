// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store adapter trait for the external CRUD service.

use async_trait::async_trait;

use crate::error::QuillError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConversationId, ConversationRecord, ConversationSummary};

/// Adapter for conversation persistence.
#[async_trait]
pub trait ConversationStoreAdapter: PluginAdapter {
    /// Lists saved conversations.
    async fn list(&self) -> Result<Vec<ConversationSummary>, QuillError>;

    /// Fetches a single conversation by id.
    async fn fetch(&self, id: &ConversationId) -> Result<ConversationRecord, QuillError>;

    /// Creates a new conversation and returns the id assigned by the backend.
    async fn create(&self, record: &ConversationRecord) -> Result<ConversationId, QuillError>;

    /// Overwrites an existing conversation.
    async fn update(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), QuillError>;

    /// Deletes a conversation.
    async fn delete(&self, id: &ConversationId) -> Result<(), QuillError>;
}
