// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted synthesis adapter for deterministic tests.
//!
//! Responses are popped from a FIFO queue; every payload received is
//! recorded for assertions. An optional gate holds calls until released,
//! which lets tests observe the controller while it is `Awaiting`.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use quill_core::error::QuillError;
use quill_core::traits::{PluginAdapter, SynthesisAdapter};
use quill_core::types::{AdapterType, HealthStatus, Message, SynthesisResult};

/// One scripted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scripted {
    Reply(String),
    Document(String),
    NetworkFailure,
    ServerFailure { status: u16, message: String },
}

impl Scripted {
    fn into_result(self) -> Result<SynthesisResult, QuillError> {
        match self {
            Scripted::Reply(text) => Ok(SynthesisResult::Reply { text }),
            Scripted::Document(text) => Ok(SynthesisResult::Document { text }),
            Scripted::NetworkFailure => Err(QuillError::network(
                "HTTP request failed",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
            )),
            Scripted::ServerFailure { status, message } => {
                Err(QuillError::Server { status, message })
            }
        }
    }
}

/// A mock synthesis backend.
///
/// When the queue is empty, replies with "mock reply".
pub struct MockSynthesis {
    responses: Mutex<VecDeque<Scripted>>,
    payloads: Mutex<Vec<Vec<Message>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    entered: Arc<Notify>,
}

impl MockSynthesis {
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    pub fn with_responses(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            payloads: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
            entered: Arc::new(Notify::new()),
        }
    }

    /// Holds every call until `gate.notify_one()` is called.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Notified each time a call has been received (before the gate).
    pub fn entered(&self) -> Arc<Notify> {
        Arc::clone(&self.entered)
    }

    pub async fn push(&self, response: Scripted) {
        self.responses.lock().await.push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every payload received so far, in call order.
    pub async fn payloads(&self) -> Vec<Vec<Message>> {
        self.payloads.lock().await.clone()
    }

    pub async fn last_payload(&self) -> Option<Vec<Message>> {
        self.payloads.lock().await.last().cloned()
    }
}

impl Default for MockSynthesis {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockSynthesis {
    fn name(&self) -> &str {
        "mock-synthesis"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Synthesis
    }

    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SynthesisAdapter for MockSynthesis {
    async fn synthesize(&self, payload: &[Message]) -> Result<SynthesisResult, QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().await.push(payload.to_vec());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Scripted::Reply("mock reply".to_string()))
            .into_result()
    }
}
