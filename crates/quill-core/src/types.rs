// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the adapter traits, the synthesis controller and
//! the HTTP backend.
//!
//! [`Message`] serializes to the backend wire shape
//! `{sender: "user"|"bot", type?: "display"|"document_context", text}`, so the
//! same value is used for the in-memory log, the chat payload and the
//! persisted conversation record.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Image content types accepted for signature uploads unless configured otherwise.
pub const DEFAULT_SIGNATURE_CONTENT_TYPES: &[&str] =
    &["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// Opaque identifier assigned by the backend when a conversation is first saved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence identity of a conversation.
///
/// The only legal transition is `Unsaved -> Persisted`, taken on the first
/// successful create call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConversationIdentity {
    #[default]
    Unsaved,
    Persisted(ConversationId),
}

impl ConversationIdentity {
    /// Returns the backend id once persisted.
    pub fn id(&self) -> Option<&ConversationId> {
        match self {
            ConversationIdentity::Unsaved => None,
            ConversationIdentity::Persisted(id) => Some(id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, ConversationIdentity::Persisted(_))
    }
}

/// Who authored a turn. The backend calls the assistant `bot`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Sender {
    #[serde(rename = "user")]
    #[strum(serialize = "user")]
    User,
    #[serde(rename = "bot", alias = "assistant")]
    #[strum(serialize = "bot")]
    Assistant,
}

/// Purpose of a log entry.
///
/// `Display` entries are shown to the user. `ContextOnly` entries carry a
/// full document text for the model and are never shown.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum MessageKind {
    #[default]
    #[serde(rename = "display")]
    #[strum(serialize = "display")]
    Display,
    #[serde(rename = "document_context")]
    #[strum(serialize = "document_context")]
    ContextOnly,
}

/// A single conversation turn.
///
/// Fields are private: once created, a message's sender and kind never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    sender: Sender,
    #[serde(rename = "type", default)]
    kind: MessageKind,
    text: String,
}

impl Message {
    pub fn new(sender: Sender, kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            sender,
            kind,
            text: text.into(),
        }
    }

    /// A visible user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::Display, text)
    }

    /// A visible assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageKind::Display, text)
    }

    /// A hidden assistant turn holding a full document for later model context.
    pub fn document_context(document: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, MessageKind::ContextOnly, document)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_display(&self) -> bool {
        self.kind == MessageKind::Display
    }
}

/// Outcome of one synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisResult {
    /// Conversational continuation; the document is unchanged.
    Reply { text: String },
    /// A full replacement document in markdown.
    Document { text: String },
}

impl SynthesisResult {
    pub fn text(&self) -> &str {
        match self {
            SynthesisResult::Reply { text } | SynthesisResult::Document { text } => text,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, SynthesisResult::Document { .. })
    }
}

/// Which party a signature belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SignatureRole {
    FirstParty,
    SecondParty,
}

impl SignatureRole {
    /// Label used in the instruction text, e.g. "First Party".
    pub fn party_label(self) -> &'static str {
        match self {
            SignatureRole::FirstParty => "First Party",
            SignatureRole::SecondParty => "Second Party",
        }
    }
}

/// A local image the user wants to upload as a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Response of the upload boundary. `url` may be missing on a broken backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedSignature {
    #[serde(default)]
    pub url: Option<String>,
}

/// A conversation as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub latest_document: Option<String>,
}

/// One row of the conversation listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(alias = "_id")]
    pub id: ConversationId,
    #[serde(default)]
    pub title: String,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of boundary an adapter implements.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Synthesis,
    SignatureUpload,
    ConversationStore,
    DocumentRender,
}
