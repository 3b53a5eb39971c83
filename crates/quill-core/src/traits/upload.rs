// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signature upload adapter trait.

use async_trait::async_trait;

use crate::error::QuillError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{SignatureImage, UploadedSignature};

/// Adapter that stores a signature image and returns a public URL for it.
///
/// Content-type checks happen in the signature workflow before this is called.
#[async_trait]
pub trait SignatureUploadAdapter: PluginAdapter {
    async fn upload_signature(
        &self,
        image: &SignatureImage,
    ) -> Result<UploadedSignature, QuillError>;
}
