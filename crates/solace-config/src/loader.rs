// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./solace.toml` > `~/.config/solace/solace.toml`
//! > `/etc/solace/solace.toml` with environment variable overrides via the
//! `SOLACE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SolaceConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/solace/solace.toml` (system-wide)
/// 3. `~/.config/solace/solace.toml` (user XDG config)
/// 4. `./solace.toml` (local directory)
/// 5. `SOLACE_*` environment variables
pub fn load_config() -> Result<SolaceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::file("/etc/solace/solace.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("solace/solace.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("solace.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SolaceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SolaceConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SolaceConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` so that underscore-containing
/// key names stay unambiguous: `SOLACE_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("SOLACE_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gemini_", "gemini.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_maps_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SOLACE_STORAGE_DATABASE_PATH", "/tmp/jail.db");
            jail.set_env("SOLACE_SERVER_PORT", "8080");
            let config: SolaceConfig = Figment::new()
                .merge(Serialized::defaults(SolaceConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.storage.database_path, "/tmp/jail.db");
            assert_eq!(config.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
port = 9000

[gemini]
api_key = "test-key"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        // Untouched sections keep their defaults.
        assert_eq!(config.agent.name, "Sol");
    }
}
