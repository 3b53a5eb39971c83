// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Quill document assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use quill_core::types::DEFAULT_SIGNATURE_CONTENT_TYPES;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the current document text inside `context.document_preamble`.
pub const DOCUMENT_PLACEHOLDER: &str = "{document}";

/// Top-level Quill configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuillConfig {
    /// Assistant identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP backend settings (chat, upload, conversations, PDF).
    #[serde(default)]
    pub backend: BackendConfig,

    /// Context builder texts.
    #[serde(default)]
    pub context: ContextConfig,

    /// Signature upload settings.
    #[serde(default)]
    pub signature: SignatureConfig,
}

/// Assistant identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name shown in the shell prompt.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "quill".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL every endpoint path is joined onto. The trailing `/` is optional.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for transient statuses (429, 500, 503, 529) on reads, updates,
    /// deletes and PDF rendering. Chat rounds, creates and uploads are sent once.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            auth_token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

/// Texts used when the context builder resets the payload around an existing document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Synthetic user turn. `{document}` is replaced by the full document text.
    #[serde(default = "default_document_preamble")]
    pub document_preamble: String,

    /// Synthetic assistant turn acknowledging the document.
    #[serde(default = "default_document_acknowledgement")]
    pub document_acknowledgement: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            document_preamble: default_document_preamble(),
            document_acknowledgement: default_document_acknowledgement(),
        }
    }
}

fn default_document_preamble() -> String {
    "Here is the legal document we are working on. Please use this as the basis for any updates.\n\n---\n\n{document}".to_string()
}

fn default_document_acknowledgement() -> String {
    "Okay, I have the document. What changes would you like to make?".to_string()
}

/// Signature upload configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureConfig {
    /// Accepted image content types. Anything else is rejected before upload.
    #[serde(default = "default_allowed_content_types")]
    pub allowed_content_types: Vec<String>,

    /// Largest accepted image, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            allowed_content_types: default_allowed_content_types(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_allowed_content_types() -> Vec<String> {
    DEFAULT_SIGNATURE_CONTENT_TYPES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}
