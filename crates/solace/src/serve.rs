// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `solace serve` command implementation.
//!
//! Wires SQLite storage, the Gemini model, the conversation engine, and
//! the HTTP presentation layer together and serves until the process
//! exits.

use std::sync::Arc;

use solace_config::SolaceConfig;
use solace_core::SolaceError;
use solace_engine::ConversationEngine;
use solace_gemini::GeminiModel;
use solace_storage::Database;
use solace_web::{start_server, AppState};
use solace_web::auth::SessionStore;
use tracing::{error, info};

/// Runs the `solace serve` command.
pub async fn run_serve(config: SolaceConfig) -> Result<(), SolaceError> {
    init_tracing(&config.agent.log_level);

    info!("starting solace serve");

    let db = Database::open(&config.storage.database_path).await?;
    info!(path = config.storage.database_path, "storage initialized");

    // A missing API key is fatal at startup, not a degraded mode.
    let model = GeminiModel::new(&config).map_err(|e| {
        error!(error = %e, "failed to initialize Gemini model");
        eprintln!(
            "error: Gemini API key required. Set via config (gemini.api_key) or the GEMINI_API_KEY environment variable."
        );
        e
    })?;

    let engine = Arc::new(ConversationEngine::new(db.clone(), Arc::new(model)));

    let state = AppState {
        db: db.clone(),
        engine,
        sessions: SessionStore::new(),
        upload_dir: config.storage.upload_dir.clone().into(),
    };

    let result = start_server(&config.server, state).await;

    db.close().await?;
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solace={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
