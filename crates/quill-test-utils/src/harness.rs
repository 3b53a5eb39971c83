// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` wires a [`DocumentController`], a [`SignatureWorkflow`] and
//! a [`ConversationPersistence`] to mock adapters, so tests can drive whole
//! rounds and then inspect both the conversation and the calls each mock saw.

use std::sync::Arc;

use quill_agent::{Conversation, ConversationPersistence, DocumentController, SignatureWorkflow};
use quill_config::model::{ContextConfig, QuillConfig, SignatureConfig};
use quill_context::ContextBuilder;
use quill_core::types::{Message, SignatureImage};
use tokio::sync::Notify;

use crate::mock_store::{MemoryStore, MockRenderer};
use crate::mock_synthesis::{MockSynthesis, Scripted};
use crate::mock_upload::{MockUpload, UploadBehavior};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<Scripted>,
    upload: UploadBehavior,
    gate: Option<Arc<Notify>>,
    conversation: Conversation,
    store: Option<Arc<MemoryStore>>,
    context: ContextConfig,
    signature: SignatureConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let config = QuillConfig::default();
        Self {
            responses: Vec::new(),
            upload: UploadBehavior::Succeed {
                base_url: "https://files.test/signatures".into(),
            },
            gate: None,
            conversation: Conversation::new(),
            store: None,
            context: config.context,
            signature: config.signature,
        }
    }

    /// Set scripted synthesis responses.
    pub fn with_responses(mut self, responses: Vec<Scripted>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_upload(mut self, behavior: UploadBehavior) -> Self {
        self.upload = behavior;
        self
    }

    /// Hold every synthesis call until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Start from an existing (e.g. hydrated) conversation.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = conversation;
        self
    }

    /// Share a pre-seeded store.
    pub fn with_store(mut self, store: Arc<MemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_signature_config(mut self, signature: SignatureConfig) -> Self {
        self.signature = signature;
        self
    }

    pub fn build(self) -> TestHarness {
        let mut synthesis = MockSynthesis::with_responses(self.responses);
        if let Some(gate) = self.gate {
            synthesis = synthesis.gated(gate);
        }
        let synthesis = Arc::new(synthesis);
        let upload = Arc::new(MockUpload::new(self.upload));
        let store = self.store.unwrap_or_default();

        let controller = Arc::new(DocumentController::new(
            self.conversation,
            synthesis.clone(),
            ContextBuilder::new(&self.context),
        ));

        TestHarness {
            controller,
            signatures: SignatureWorkflow::new(upload.clone(), &self.signature),
            persistence: ConversationPersistence::new(store.clone()),
            synthesis,
            upload,
            store,
            renderer: Arc::new(MockRenderer),
        }
    }
}

/// A complete test environment with mock adapters.
pub struct TestHarness {
    /// The controller under test, shared so tests can spawn concurrent rounds.
    pub controller: Arc<DocumentController>,
    pub signatures: SignatureWorkflow,
    pub persistence: ConversationPersistence,
    pub synthesis: Arc<MockSynthesis>,
    pub upload: Arc<MockUpload>,
    pub store: Arc<MemoryStore>,
    pub renderer: Arc<MockRenderer>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default mocks and an empty conversation.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Visible messages as `(sender, text)` pairs.
    pub async fn transcript(&self) -> Vec<(String, String)> {
        self.controller
            .displayable()
            .await
            .iter()
            .map(|m: &Message| (m.sender().to_string(), m.text().to_string()))
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A small PNG-typed signature image.
pub fn png_signature(file_name: &str) -> SignatureImage {
    SignatureImage {
        file_name: file_name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    }
}
