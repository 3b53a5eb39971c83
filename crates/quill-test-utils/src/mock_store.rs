// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory conversation store and PDF renderer.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use quill_core::error::QuillError;
use quill_core::traits::{ConversationStoreAdapter, DocumentRenderAdapter, PluginAdapter};
use quill_core::types::{
    AdapterType, ConversationId, ConversationRecord, ConversationSummary, HealthStatus,
};

/// Conversation store backed by a map. Counts every call.
///
/// An optional gate holds `create` calls until released.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, ConversationRecord>>,
    calls: AtomicUsize,
    create_gate: Option<Arc<Notify>>,
    entered: Arc<Notify>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every `create` until `gate.notify_one()` is called.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.create_gate = Some(gate);
        self
    }

    /// Notified each time a `create` has been received (before the gate).
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    /// Seeds a record under a known id.
    pub async fn insert(&self, id: &str, record: ConversationRecord) {
        self.records.lock().await.insert(id.to_string(), record);
    }

    pub async fn get(&self, id: &str) -> Option<ConversationRecord> {
        self.records.lock().await.get(id).cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn not_found(id: &ConversationId) -> QuillError {
        QuillError::Server {
            status: 404,
            message: format!("Conversation {id} not found"),
        }
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ConversationStore
    }

    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ConversationStoreAdapter for MemoryStore {
    async fn list(&self) -> Result<Vec<ConversationSummary>, QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .map(|(id, record)| ConversationSummary {
                id: ConversationId(id.clone()),
                title: record.title.clone(),
            })
            .collect())
    }

    async fn fetch(&self, id: &ConversationId) -> Result<ConversationRecord, QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.get(&id.0).await.ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, record: &ConversationRecord) -> Result<ConversationId, QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        if let Some(gate) = &self.create_gate {
            gate.notified().await;
        }
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.records.lock().await.insert(id.clone(), record.clone());
        Ok(ConversationId(id))
    }

    async fn update(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().await;
        match records.get_mut(&id.0) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .await
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

/// Renderer that wraps the markdown in a fake PDF envelope.
#[derive(Default)]
pub struct MockRenderer;

#[async_trait]
impl PluginAdapter for MockRenderer {
    fn name(&self) -> &str {
        "mock-renderer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DocumentRender
    }

    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl DocumentRenderAdapter for MockRenderer {
    async fn render_pdf(&self, document: &str) -> Result<Vec<u8>, QuillError> {
        if document.is_empty() {
            return Err(QuillError::Server {
                status: 400,
                message: "Document content is required".into(),
            });
        }
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend_from_slice(document.as_bytes());
        Ok(bytes)
    }
}
