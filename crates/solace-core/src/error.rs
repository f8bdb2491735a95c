// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Solace application.

use thiserror::Error;

/// The primary error type used across all Solace crates.
#[derive(Debug, Error)]
pub enum SolaceError {
    /// Configuration errors (invalid TOML, missing required fields, missing API key).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative model errors (API failure, malformed response, parse failure).
    #[error("model error: {message}")]
    Model {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP server errors (bind failure, serve failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Registration rejected because the chosen username already exists.
    #[error("username already taken")]
    UsernameTaken,

    /// Login rejected. Deliberately does not distinguish unknown-user from
    /// wrong-password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
