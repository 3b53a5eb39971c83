// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot subcommands and the file helpers shared with the shell.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use quill_agent::ConversationPersistence;
use quill_backend::HttpBackend;
use quill_config::QuillConfig;
use quill_core::error::QuillError;
use quill_core::traits::DocumentRenderAdapter;
use quill_core::types::{ConversationId, SignatureImage};
use tracing::info;

/// Content type guessed from the file extension.
///
/// Unknown extensions map to `application/octet-stream`, which signature
/// validation then rejects.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Reads a signature image from disk.
pub async fn read_signature(path: &Path) -> Result<SignatureImage, QuillError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("signature")
        .to_string();
    Ok(SignatureImage {
        content_type: content_type_for(path).to_string(),
        file_name,
        bytes,
    })
}

/// Renders `document` and writes the PDF to `output`.
pub async fn export_pdf(
    renderer: &dyn DocumentRenderAdapter,
    document: &str,
    output: &Path,
) -> Result<usize, QuillError> {
    if document.trim().is_empty() {
        return Err(QuillError::Validation("there is no document to export".into()));
    }
    let bytes = renderer.render_pdf(document).await?;
    tokio::fs::write(output, &bytes).await?;
    info!(path = %output.display(), bytes = bytes.len(), "PDF written");
    Ok(bytes.len())
}

fn persistence(backend: &Arc<HttpBackend>) -> ConversationPersistence {
    ConversationPersistence::new(backend.clone())
}

/// `quill list`
pub async fn run_list(config: &QuillConfig) -> Result<(), QuillError> {
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let rows = persistence(&backend).list().await?;
    if rows.is_empty() {
        println!("{}", "no saved conversations".dimmed());
        return Ok(());
    }
    for row in rows {
        let title = if row.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            row.title
        };
        println!("{}  {title}", row.id.to_string().cyan());
    }
    Ok(())
}

/// `quill delete <id>`
pub async fn run_delete(config: &QuillConfig, id: String) -> Result<(), QuillError> {
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let id = ConversationId(id);
    persistence(&backend).delete(&id).await?;
    println!("deleted {}", id.to_string().cyan());
    Ok(())
}

/// `quill export <id> [--output <path>]`
pub async fn run_export(
    config: &QuillConfig,
    id: String,
    output: Option<PathBuf>,
) -> Result<(), QuillError> {
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    let conversation = persistence(&backend).load(&ConversationId(id)).await?;
    let document = conversation
        .document()
        .ok_or_else(|| QuillError::Validation("conversation has no document yet".into()))?;
    let output = output.unwrap_or_else(|| PathBuf::from(conversation.export_file_name()));
    let written = export_pdf(backend.as_ref(), document, &output).await?;
    println!("wrote {} ({written} bytes)", output.display());
    Ok(())
}

/// `quill config check`: prints the effective configuration.
pub fn run_config_check(config: &QuillConfig) -> Result<(), QuillError> {
    let mut shown = config.clone();
    if shown.backend.auth_token.is_some() {
        shown.backend.auth_token = Some("<redacted>".into());
    }
    let rendered = toml::to_string_pretty(&shown)
        .map_err(|e| QuillError::Internal(format!("failed to render config: {e}")))?;
    println!("{}", "configuration is valid".green());
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_test_utils::MockRenderer;

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(content_type_for(Path::new("a")), "application/octet-stream");
    }

    #[tokio::test]
    async fn read_signature_uses_file_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.webp");
        std::fs::write(&path, b"RIFF").unwrap();

        let image = read_signature(&path).await.unwrap();

        assert_eq!(image.file_name, "alice.webp");
        assert_eq!(image.content_type, "image/webp");
        assert_eq!(image.bytes, b"RIFF");
    }

    #[tokio::test]
    async fn read_signature_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_signature(&dir.path().join("nope.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuillError::Io(_)));
    }

    #[tokio::test]
    async fn export_writes_rendered_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("Lease.pdf");

        let written = export_pdf(&MockRenderer, "# Lease", &output).await.unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), written);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn export_refuses_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.pdf");

        let err = export_pdf(&MockRenderer, "  ", &output).await.unwrap_err();

        assert!(matches!(err, QuillError::Validation(_)));
        assert!(!output.exists());
    }

    #[test]
    fn config_check_accepts_defaults() {
        assert!(run_config_check(&QuillConfig::default()).is_ok());
    }
}
