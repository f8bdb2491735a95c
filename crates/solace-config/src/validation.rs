// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for values Figment cannot check itself.

use thiserror::Error;

use crate::model::SolaceConfig;

/// A single configuration problem, suitable for rendering to the operator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("agent.log_level must be one of trace, debug, info, warn, error (got {0:?})")]
    InvalidLogLevel(String),

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),

    #[error("configuration could not be loaded: {0}")]
    Load(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized config, collecting every problem rather than
/// stopping at the first.
pub fn validate_config(config: &SolaceConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::InvalidLogLevel(config.agent.log_level.clone()));
    }
    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::EmptyValue("agent.name"));
    }
    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::EmptyValue("server.host"));
    }
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::EmptyValue("storage.database_path"));
    }
    if config.storage.upload_dir.trim().is_empty() {
        errors.push(ConfigError::EmptyValue("storage.upload_dir"));
    }
    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::EmptyValue("gemini.model"));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Print each configuration error to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!("solace: invalid configuration");
    for err in errors {
        eprintln!("  - {err}");
    }
}
