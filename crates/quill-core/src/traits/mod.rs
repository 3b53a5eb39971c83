// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external boundaries.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod render;
pub mod store;
pub mod synthesis;
pub mod upload;

pub use adapter::PluginAdapter;
pub use render::DocumentRenderAdapter;
pub use store::ConversationStoreAdapter;
pub use synthesis::SynthesisAdapter;
pub use upload::SignatureUploadAdapter;
