// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./quill.toml` > `~/.config/quill/quill.toml` > `/etc/quill/quill.toml`
//! with environment variable overrides via `QUILL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::QuillConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/quill/quill.toml` (system-wide)
/// 3. `~/.config/quill/quill.toml` (user XDG config)
/// 4. `./quill.toml` (local directory)
/// 5. `QUILL_*` environment variables
pub fn load_config() -> Result<QuillConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<QuillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QuillConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<QuillConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(QuillConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(QuillConfig::default()))
        .merge(Toml::file("/etc/quill/quill.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("quill/quill.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("quill.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` and not `Env::split("_")`: `QUILL_BACKEND_BASE_URL` must
/// map to `backend.base_url`, not `backend.base.url`.
fn env_provider() -> Env {
    Env::prefixed("QUILL_").map(|key| {
        // Example: QUILL_BACKEND_AUTH_TOKEN -> "backend_auth_token"
        map_env_key(key.as_str()).into()
    })
}

/// Maps a lowercased, prefix-stripped env key onto its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ["agent", "backend", "context", "signature"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_keep_underscores_inside_field_names() {
        assert_eq!(map_env_key("backend_base_url"), "backend.base_url");
        assert_eq!(map_env_key("backend_auth_token"), "backend.auth_token");
        assert_eq!(map_env_key("agent_log_level"), "agent.log_level");
        assert_eq!(
            map_env_key("signature_max_bytes"),
            "signature.max_bytes"
        );
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("telemetry_url"), "telemetry_url");
    }
}
