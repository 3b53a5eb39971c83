// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Quill configuration system.

use quill_config::diagnostic::ConfigError;
use quill_config::model::QuillConfig;
use quill_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_quill_config() {
    let toml = r#"
[agent]
name = "drafter"
log_level = "debug"

[backend]
base_url = "https://docs.example.com/api/"
timeout_secs = 30
max_retries = 2
auth_token = "tok-123"

[context]
document_preamble = "Current draft:\n{document}"
document_acknowledgement = "Got it."

[signature]
allowed_content_types = ["image/png"]
max_bytes = 1024
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "drafter");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.backend.base_url, "https://docs.example.com/api/");
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.backend.max_retries, 2);
    assert_eq!(config.backend.auth_token.as_deref(), Some("tok-123"));
    assert_eq!(config.context.document_preamble, "Current draft:\n{document}");
    assert_eq!(config.context.document_acknowledgement, "Got it.");
    assert_eq!(config.signature.allowed_content_types, vec!["image/png"]);
    assert_eq!(config.signature.max_bytes, 1024);
}

/// Missing sections fall back to defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "quill");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.backend.base_url, "http://localhost:8000/api/");
    assert_eq!(config.backend.timeout_secs, 10);
    assert_eq!(config.backend.max_retries, 1);
    assert!(config.backend.auth_token.is_none());
    assert!(config.context.document_preamble.ends_with("{document}"));
    assert_eq!(
        config.context.document_acknowledgement,
        "Okay, I have the document. What changes would you like to make?"
    );
    assert_eq!(
        config.signature.allowed_content_types,
        vec!["image/png", "image/jpeg", "image/jpg", "image/webp"]
    );
}

/// Unknown field in [backend] is rejected.
#[test]
fn unknown_field_in_backend_produces_error() {
    let toml = r#"
[backend]
base_ulr = "http://x/"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "abc"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Dotted overrides (what the env provider produces) land on the right field.
#[test]
fn dotted_override_sets_backend_base_url() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: QuillConfig = Figment::new()
        .merge(Serialized::defaults(QuillConfig::default()))
        .merge(Toml::string("[backend]\nbase_url = \"http://from-toml/\"\n"))
        .merge(("backend.base_url", "http://from-env/"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.backend.base_url, "http://from-env/");
}

/// Missing config files are silently skipped.
#[test]
#[serial_test::serial]
fn missing_config_files_silently_skipped() {
    let config =
        quill_config::load_config_from_path(std::path::Path::new("/nonexistent/quill.toml"))
            .expect("missing file should be skipped");
    assert_eq!(config.agent.name, "quill");
}

/// The real env provider maps QUILL_BACKEND_AUTH_TOKEN onto backend.auth_token.
#[test]
#[serial_test::serial]
fn env_var_overrides_backend_auth_token() {
    // SAFETY: serialized test; no other thread reads the environment concurrently.
    unsafe { std::env::set_var("QUILL_BACKEND_AUTH_TOKEN", "from-env") };
    let result =
        quill_config::load_config_from_path(std::path::Path::new("/nonexistent/quill.toml"));
    unsafe { std::env::remove_var("QUILL_BACKEND_AUTH_TOKEN") };

    let config = result.expect("env override should load");
    assert_eq!(config.backend.auth_token.as_deref(), Some("from-env"));
}

/// Unknown key in [backend] gets a suggestion and the list of valid keys.
#[test]
fn diagnostic_error_suggests_valid_key() {
    let toml = r#"
[backend]
base_ulr = "http://x/"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "base_ulr"
                && suggestion.as_deref() == Some("base_url")
                && valid_keys.contains("timeout_secs")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// Invalid type (string where number expected) produces an InvalidType diagnostic.
#[test]
fn diagnostic_invalid_type() {
    let toml = r#"
[backend]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))),
        "got: {errors:?}"
    );
}

/// ConfigError renders through miette with the suggestion in the help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "naem".to_string(),
        suggestion: Some("name".to_string()),
        valid_keys: "name, log_level".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("should have help").to_string();
    assert!(help.contains("did you mean `name`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("naem"));
}

/// Validation runs after a successful parse.
#[test]
fn validation_rejects_non_http_base_url() {
    let toml = r#"
[backend]
base_url = "localhost:8000"
"#;

    let errors = load_and_validate_str(toml).expect_err("bad url should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("backend.base_url"))
    ));
}
