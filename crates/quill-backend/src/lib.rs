// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP adapters for the Quill document backend.
//!
//! [`HttpBackend`] implements every boundary trait from `quill-core` over
//! one [`BackendClient`]: synthesis (`chat/`), signature upload
//! (`upload-signature/`), conversation storage (`conversations/`) and PDF
//! rendering (`download-pdf/`).

pub mod client;
pub mod types;

use async_trait::async_trait;
use quill_config::model::BackendConfig;
use quill_core::error::QuillError;
use quill_core::traits::{
    ConversationStoreAdapter, DocumentRenderAdapter, PluginAdapter, SignatureUploadAdapter,
    SynthesisAdapter,
};
use quill_core::types::{
    AdapterType, ConversationId, ConversationRecord, ConversationSummary, HealthStatus, Message,
    SignatureImage, SynthesisResult, UploadedSignature,
};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

pub use crate::client::{BackendClient, Retry};
use crate::types::{ChatRequest, ChatResponse, CreatedResponse, PdfRequest};

/// The document backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: BackendClient,
}

impl HttpBackend {
    /// Creates a backend adapter from the `[backend]` configuration section.
    pub fn new(config: &BackendConfig) -> Result<Self, QuillError> {
        let client = BackendClient::new(config)?;
        info!(base_url = client.base_url(), "HTTP backend initialized");
        Ok(Self { client })
    }

    /// Creates an adapter over an existing client.
    pub fn with_client(client: BackendClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Every boundary this adapter implements.
    pub fn adapter_types(&self) -> [AdapterType; 4] {
        [
            AdapterType::Synthesis,
            AdapterType::SignatureUpload,
            AdapterType::ConversationStore,
            AdapterType::DocumentRender,
        ]
    }
}

fn conversation_path(id: &ConversationId) -> String {
    format!("conversations/{id}/")
}

#[async_trait]
impl PluginAdapter for HttpBackend {
    fn name(&self) -> &str {
        "http-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Reports the primary boundary. The same instance also serves
    /// uploads, conversation storage and PDF rendering; see
    /// [`HttpBackend::adapter_types`].
    fn adapter_type(&self) -> AdapterType {
        AdapterType::Synthesis
    }

    /// Lists conversations as a cheap reachability probe.
    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        match self
            .client
            .execute("health", Retry::Transient, || {
                Ok(self.client.get("conversations/"))
            })
            .await
        {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(QuillError::Server { status, .. }) => Ok(HealthStatus::Degraded(format!(
                "backend answered with status {status}"
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl SynthesisAdapter for HttpBackend {
    async fn synthesize(&self, payload: &[Message]) -> Result<SynthesisResult, QuillError> {
        let request = ChatRequest { messages: payload };
        let response: ChatResponse = self
            .client
            .execute_json("chat", Retry::Never, || {
                Ok(self.client.post("chat/").json(&request))
            })
            .await?;
        debug!(kind = response.kind.as_str(), text_len = response.text.len(), "chat response decoded");
        Ok(response.into())
    }
}

#[async_trait]
impl SignatureUploadAdapter for HttpBackend {
    async fn upload_signature(
        &self,
        image: &SignatureImage,
    ) -> Result<UploadedSignature, QuillError> {
        self.client
            .execute_json("upload-signature", Retry::Never, || {
                let part = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.content_type)
                    .map_err(|e| {
                        QuillError::Validation(format!(
                            "invalid content type `{}`: {e}",
                            image.content_type
                        ))
                    })?;
                Ok(self
                    .client
                    .post("upload-signature/")
                    .multipart(Form::new().part("signature", part)))
            })
            .await
    }
}

#[async_trait]
impl ConversationStoreAdapter for HttpBackend {
    async fn list(&self) -> Result<Vec<ConversationSummary>, QuillError> {
        self.client
            .execute_json("list-conversations", Retry::Transient, || {
                Ok(self.client.get("conversations/"))
            })
            .await
    }

    async fn fetch(&self, id: &ConversationId) -> Result<ConversationRecord, QuillError> {
        let path = conversation_path(id);
        self.client
            .execute_json("fetch-conversation", Retry::Transient, || {
                Ok(self.client.get(&path))
            })
            .await
    }

    async fn create(&self, record: &ConversationRecord) -> Result<ConversationId, QuillError> {
        let created: CreatedResponse = self
            .client
            .execute_json("create-conversation", Retry::Never, || {
                Ok(self.client.post("conversations/").json(record))
            })
            .await?;
        Ok(ConversationId(created.id))
    }

    async fn update(
        &self,
        id: &ConversationId,
        record: &ConversationRecord,
    ) -> Result<(), QuillError> {
        let path = conversation_path(id);
        self.client
            .execute("update-conversation", Retry::Transient, || {
                Ok(self.client.put(&path).json(record))
            })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), QuillError> {
        let path = conversation_path(id);
        self.client
            .execute("delete-conversation", Retry::Transient, || {
                Ok(self.client.delete(&path))
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentRenderAdapter for HttpBackend {
    async fn render_pdf(&self, document: &str) -> Result<Vec<u8>, QuillError> {
        let request = PdfRequest {
            document_content: document,
        };
        let response = self
            .client
            .execute("download-pdf", Retry::Transient, || {
                Ok(self.client.post("download-pdf/").json(&request))
            })
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| QuillError::network(format!("failed to read PDF body: {e}"), e))?;
        debug!(bytes = bytes.len(), "PDF received");
        Ok(bytes.to_vec())
    }
}
