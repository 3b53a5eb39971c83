// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock signature upload adapter.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use quill_core::error::QuillError;
use quill_core::traits::{PluginAdapter, SignatureUploadAdapter};
use quill_core::types::{AdapterType, HealthStatus, SignatureImage, UploadedSignature};

/// How the mock answers uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBehavior {
    /// Returns `<base>/<file_name>`.
    Succeed { base_url: String },
    /// Returns a 2xx body without a URL.
    MissingUrl,
    /// Fails with a server error.
    Fail { status: u16, message: String },
}

/// Records uploads and answers according to its [`UploadBehavior`].
pub struct MockUpload {
    behavior: UploadBehavior,
    calls: AtomicUsize,
    uploaded: Mutex<Vec<SignatureImage>>,
}

impl MockUpload {
    pub fn new(behavior: UploadBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    /// Uploads succeed under `https://files.test/signatures`.
    pub fn succeeding() -> Self {
        Self::new(UploadBehavior::Succeed {
            base_url: "https://files.test/signatures".into(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn uploaded(&self) -> Vec<SignatureImage> {
        self.uploaded.lock().await.clone()
    }
}

impl Default for MockUpload {
    fn default() -> Self {
        Self::succeeding()
    }
}

#[async_trait]
impl PluginAdapter for MockUpload {
    fn name(&self) -> &str {
        "mock-upload"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::SignatureUpload
    }

    async fn health_check(&self) -> Result<HealthStatus, QuillError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SignatureUploadAdapter for MockUpload {
    async fn upload_signature(
        &self,
        image: &SignatureImage,
    ) -> Result<UploadedSignature, QuillError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded.lock().await.push(image.clone());

        match &self.behavior {
            UploadBehavior::Succeed { base_url } => Ok(UploadedSignature {
                url: Some(format!("{base_url}/{}", image.file_name)),
            }),
            UploadBehavior::MissingUrl => Ok(UploadedSignature { url: None }),
            UploadBehavior::Fail { status, message } => Err(QuillError::Server {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
