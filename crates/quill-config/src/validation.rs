// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{QuillConfig, DOCUMENT_PLACEHOLDER};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &QuillConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        invalid(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        invalid("backend.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        invalid(format!(
            "backend.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.backend.timeout_secs == 0 {
        invalid("backend.timeout_secs must be at least 1".to_string());
    }

    if !config.context.document_preamble.contains(DOCUMENT_PLACEHOLDER) {
        invalid(format!(
            "context.document_preamble must contain the `{DOCUMENT_PLACEHOLDER}` placeholder"
        ));
    }

    if config.signature.allowed_content_types.is_empty() {
        invalid("signature.allowed_content_types must not be empty".to_string());
    }
    for content_type in &config.signature.allowed_content_types {
        if !content_type.starts_with("image/") {
            invalid(format!(
                "signature.allowed_content_types entry `{content_type}` is not an image type"
            ));
        }
    }

    if config.signature.max_bytes == 0 {
        invalid("signature.max_bytes must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
