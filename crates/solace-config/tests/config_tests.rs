// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Solace configuration system.

use solace_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_solace_config() {
    let toml = r#"
[agent]
name = "Aurora"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[storage]
database_path = "/tmp/test.db"
upload_dir = "/tmp/uploads"

[gemini]
api_key = "AIza-test-123"
model = "gemini-1.5-pro"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "Aurora");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert_eq!(config.storage.upload_dir, "/tmp/uploads");
    assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test-123"));
    assert_eq!(config.gemini.model, "gemini-1.5-pro");
}

/// Unknown keys are rejected, not silently ignored.
#[test]
fn unknown_field_is_rejected() {
    let toml = r#"
[agent]
name = "Sol"
log_lvl = "info"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// An unknown section is rejected too.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[telemetry]
enabled = true
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Empty TOML yields the compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.server.port, 5500);
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
}

/// Validation failures are reported through the high-level entry point.
#[test]
fn load_and_validate_rejects_bad_log_level() {
    let toml = r#"
[agent]
log_level = "shout"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("log_level"));
}

/// A wrong value type surfaces as a load error rather than a panic.
#[test]
fn wrong_type_surfaces_as_error() {
    let toml = r#"
[server]
port = "not-a-number"
"#;
    assert!(load_and_validate_str(toml).is_err());
}
