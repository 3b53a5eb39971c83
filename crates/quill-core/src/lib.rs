// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Quill document assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Quill workspace. Every external boundary
//! (synthesis, signature upload, conversation store, PDF rendering) is an
//! adapter trait defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::QuillError;
pub use types::{
    AdapterType, ConversationId, ConversationIdentity, ConversationRecord, ConversationSummary,
    HealthStatus, Message, MessageKind, Sender, SignatureImage, SignatureRole, SynthesisResult,
    UploadedSignature,
};

// Re-export all adapter traits at crate root.
pub use traits::{
    ConversationStoreAdapter, DocumentRenderAdapter, PluginAdapter, SignatureUploadAdapter,
    SynthesisAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quill_error_has_all_variants() {
        let _config = QuillError::Config("test".into());
        let _network = QuillError::network("connect", std::io::Error::other("refused"));
        let _server = QuillError::Server {
            status: 500,
            message: "boom".into(),
        };
        let _validation = QuillError::Validation("test".into());
        let _contract = QuillError::ContractViolation("reply".into());
        let _busy = QuillError::Busy;
        let _io = QuillError::Io(std::io::Error::other("disk"));
        let _internal = QuillError::Internal("test".into());
    }

    #[test]
    fn boundary_failures_are_classified() {
        assert!(QuillError::network("x", std::io::Error::other("y")).is_boundary_failure());
        assert!(QuillError::Server {
            status: 502,
            message: String::new()
        }
        .is_boundary_failure());
        assert!(!QuillError::Validation("gif".into()).is_boundary_failure());
        assert!(!QuillError::Busy.is_boundary_failure());
    }

    #[test]
    fn server_error_message_is_surfaced_verbatim() {
        let err = QuillError::Server {
            status: 500,
            message: "GEMINI_API_KEY is not configured".into(),
        };
        assert_eq!(err.user_facing_message(), "GEMINI_API_KEY is not configured");

        let blank = QuillError::Server {
            status: 500,
            message: "  ".into(),
        };
        assert_eq!(blank.user_facing_message(), error::GENERIC_FAILURE_MESSAGE);

        let transport = QuillError::network("timed out", std::io::Error::other("timeout"));
        assert_eq!(transport.user_facing_message(), error::GENERIC_FAILURE_MESSAGE);
        assert_eq!(
            QuillError::Validation("bad".into()).user_facing_message(),
            "validation error: bad"
        );
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        let variants = [
            AdapterType::Synthesis,
            AdapterType::SignatureUpload,
            AdapterType::ConversationStore,
            AdapterType::DocumentRender,
        ];
        for variant in &variants {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_synthesis_adapter<T: SynthesisAdapter>() {}
        fn _assert_upload_adapter<T: SignatureUploadAdapter>() {}
        fn _assert_store_adapter<T: ConversationStoreAdapter>() {}
        fn _assert_render_adapter<T: DocumentRenderAdapter>() {}
    }
}
