// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state and the document synthesis workflow.
//!
//! - [`MessageStore`]: append-only log with display and context projections
//! - [`Conversation`]: log + document snapshot + persistence identity
//! - [`DocumentController`]: the `Idle`/`Awaiting` synthesis state machine
//! - [`SignatureWorkflow`]: upload, instruct, and re-run synthesis
//! - [`ConversationPersistence`]: save/load against the external store

pub mod controller;
pub mod conversation;
pub mod persistence;
pub mod signature;
pub mod store;

pub use controller::{ControllerState, DocumentController, SynthesisOutcome};
pub use conversation::Conversation;
pub use persistence::{ConversationPersistence, SaveOutcome};
pub use signature::{signature_instruction, signature_markdown, SignatureWorkflow};
pub use store::MessageStore;
