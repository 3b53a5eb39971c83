// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signature embedding workflow.
//!
//! Not a separate state machine: it validates and uploads the image, turns
//! the returned URL into an instruction, and pushes that instruction
//! through the controller's normal synthesis round. The controller's busy
//! state is held from the upload until the round completes.
//!
//! Upload problems (bad content type, failed call, missing URL) abort the
//! workflow before any synthesis call and leave the log untouched.

use std::sync::Arc;

use quill_config::model::SignatureConfig;
use quill_core::error::QuillError;
use quill_core::types::{SignatureImage, SignatureRole};
use quill_core::SignatureUploadAdapter;
use tracing::{debug, info, warn};

use crate::controller::{DocumentController, SynthesisOutcome};

/// Markdown image reference embedded into the document for `role`.
pub fn signature_markdown(role: SignatureRole, url: &str) -> String {
    format!("![signature {role}]({url})")
}

/// Instruction asking the assistant to place the signature and return the
/// whole document.
pub fn signature_instruction(role: SignatureRole, url: &str) -> String {
    let party = role.party_label();
    let image = signature_markdown(role, url);
    format!(
        "You are formatting a legal document. Insert and position the signature image for the \
         {party} in the correct designated area so the final order is:\n\
         1) First Party signature\n\
         2) First Party name\n\
         3) Second Party signature\n\
         4) Second Party name\n\
         Use exactly this markdown image for the {party}: {image}\n\
         Preserve all existing content and headings. Return the entire updated document in JSON \
         as {{\"type\":\"document\",\"text\":\"...markdown...\"}}."
    )
}

/// Uploads signature images and asks the assistant to place them.
pub struct SignatureWorkflow {
    upload: Arc<dyn SignatureUploadAdapter + Send + Sync>,
    allowed_content_types: Vec<String>,
    max_bytes: usize,
}

impl SignatureWorkflow {
    pub fn new(
        upload: Arc<dyn SignatureUploadAdapter + Send + Sync>,
        config: &SignatureConfig,
    ) -> Self {
        Self {
            upload,
            allowed_content_types: config
                .allowed_content_types
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            max_bytes: config.max_bytes,
        }
    }

    /// Local checks that must pass before any network call.
    pub fn validate(&self, image: &SignatureImage) -> Result<(), QuillError> {
        let content_type = image.content_type.trim().to_ascii_lowercase();
        if !self.allowed_content_types.contains(&content_type) {
            return Err(QuillError::Validation(format!(
                "unsupported signature image type `{}`; use one of {}",
                image.content_type,
                self.allowed_content_types.join(", ")
            )));
        }
        if image.bytes.is_empty() {
            return Err(QuillError::Validation(format!(
                "signature image `{}` is empty",
                image.file_name
            )));
        }
        if image.bytes.len() > self.max_bytes {
            return Err(QuillError::Validation(format!(
                "signature image `{}` is {} bytes; the limit is {}",
                image.file_name,
                image.bytes.len(),
                self.max_bytes
            )));
        }
        Ok(())
    }

    /// Validates, uploads and embeds a signature for `role`.
    ///
    /// Errors mean nothing was sent to the assistant and nothing was
    /// appended. Once the synthesis round starts, the result is reported as
    /// a [`SynthesisOutcome`] instead.
    pub async fn embed(
        &self,
        controller: &DocumentController,
        role: SignatureRole,
        image: &SignatureImage,
    ) -> Result<SynthesisOutcome, QuillError> {
        self.validate(image)?;
        let in_flight = controller.begin()?;

        let uploaded = self.upload.upload_signature(image).await.inspect_err(|e| {
            warn!(error = %e, %role, "signature upload failed");
        })?;

        let url = uploaded
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| QuillError::Validation("upload failed: no URL returned".into()))?;
        debug!(%role, url = url.as_str(), "signature uploaded");

        let outcome = controller
            .submit_instruction(&in_flight, signature_instruction(role, &url))
            .await;
        info!(%role, ?outcome, "signature round finished");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_contains_image_and_ordering_contract() {
        let text = signature_instruction(SignatureRole::FirstParty, "https://x/y.png");
        assert!(text.contains("![signature first-party](https://x/y.png)"));
        assert!(text.contains(
            "1) First Party signature\n2) First Party name\n3) Second Party signature\n4) Second Party name"
        ));
        assert!(text.contains("Preserve all existing content and headings."));
        assert!(text.contains(r#"{"type":"document","text":"...markdown..."}"#));
    }

    #[test]
    fn second_party_instruction_names_second_party() {
        let text = signature_instruction(SignatureRole::SecondParty, "https://x/z.webp");
        assert!(text.contains("signature image for the Second Party"));
        assert!(text.contains("![signature second-party](https://x/z.webp)"));
    }
}
