// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Quill document assistant.

use thiserror::Error;

/// Shown to the user when a boundary call fails without a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// The primary error type used across all Quill adapter traits and core operations.
///
/// Boundary failures (`Network`, `Server`) are recoverable: the synthesis
/// controller turns them into a visible assistant message instead of
/// propagating them. `Validation` failures are always raised before any
/// boundary call is made.
#[derive(Debug, Error)]
pub enum QuillError {
    /// Configuration errors (invalid TOML, bad base URL, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure: connection refused, DNS, TLS, timeout.
    #[error("network error: {message}")]
    Network {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Input rejected locally before any boundary call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The assistant answered with a reply where a full document was required.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A synthesis round is already in flight for this conversation.
    #[error("a synthesis request is already in progress")]
    Busy,

    /// Local file system errors (reading signature images, writing PDFs).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl QuillError {
    /// Builds a [`QuillError::Network`] from any transport error.
    pub fn network<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        QuillError::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true for failures that came back from a boundary call
    /// (as opposed to local validation or state errors).
    pub fn is_boundary_failure(&self) -> bool {
        matches!(self, QuillError::Network { .. } | QuillError::Server { .. })
    }

    /// Human-readable text shown to the user in the chat log.
    ///
    /// Server failures surface the backend's own error string. Transport
    /// failures and blank server errors get a generic retry hint; the
    /// details go to the log instead.
    pub fn user_facing_message(&self) -> String {
        match self {
            QuillError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            QuillError::Server { .. } | QuillError::Network { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}
