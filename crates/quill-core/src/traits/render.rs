// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document render adapter trait (markdown to PDF).

use async_trait::async_trait;

use crate::error::QuillError;
use crate::traits::adapter::PluginAdapter;

/// Adapter that turns a markdown document into a PDF.
#[async_trait]
pub trait DocumentRenderAdapter: PluginAdapter {
    /// Returns the rendered PDF bytes.
    async fn render_pdf(&self, document: &str) -> Result<Vec<u8>, QuillError>;
}
