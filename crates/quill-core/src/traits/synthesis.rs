// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthesis adapter trait: the single request/response call to the AI backend.

use async_trait::async_trait;

use crate::error::QuillError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Message, SynthesisResult};

/// Adapter for the document synthesis endpoint.
///
/// One call sends the full payload and yields either a conversational reply
/// or a replacement document. There is no streaming and no partial result.
#[async_trait]
pub trait SynthesisAdapter: PluginAdapter {
    /// Sends the payload and waits for the typed result.
    async fn synthesize(&self, payload: &[Message]) -> Result<SynthesisResult, QuillError>;
}
