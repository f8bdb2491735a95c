// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! The route table is static: built once at startup, never recomputed.

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use solace_config::model::ServerConfig;
use solace_core::SolaceError;
use solace_engine::ConversationEngine;
use solace_storage::Database;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::SessionStore;
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite-backed persistence.
    pub db: Database,
    /// Conversation engine driving the companion chat.
    pub engine: Arc<ConversationEngine>,
    /// In-process session token map.
    pub sessions: SessionStore,
    /// Directory holding uploaded avatars, served under `/uploads`.
    pub upload_dir: PathBuf,
}

/// Builds the application router. One static route per operation plus a
/// file-serving route for avatars.
pub fn build_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/", get(handlers::get_dashboard))
        .route("/register", get(handlers::get_register).post(handlers::post_register))
        .route("/login", get(handlers::get_login).post(handlers::post_login))
        .route("/logout", get(handlers::get_logout))
        .route("/checkin", post(handlers::post_checkin))
        .route("/chat_page", get(handlers::get_chat_page))
        .route("/chat", post(handlers::post_chat))
        .route("/community", get(handlers::get_community))
        .route("/new_story", get(handlers::get_new_story).post(handlers::post_new_story))
        .route("/profile", get(handlers::get_profile).post(handlers::post_profile))
        .route("/export_data", get(handlers::get_export_data))
        .route("/health", get(handlers::get_health))
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), SolaceError> {
    // Avatar writes assume the directory exists.
    tokio::fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| SolaceError::Server {
            message: format!(
                "failed to create upload directory {}: {e}",
                state.upload_dir.display()
            ),
            source: Some(Box::new(e)),
        })?;

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SolaceError::Server {
            message: format!("failed to bind to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Solace listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SolaceError::Server {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use solace_core::types::AnalysisReport;
    use solace_core::CompanionModel;
    use tempfile::tempdir;
    use tower::ServiceExt;

    struct StubModel;

    #[async_trait]
    impl CompanionModel for StubModel {
        async fn generate_reply(&self, _dialogue: &str) -> Result<String, SolaceError> {
            Ok("stub reply".into())
        }

        async fn analyze(&self, _dialogue: &str) -> Result<AnalysisReport, SolaceError> {
            Ok(AnalysisReport::default())
        }
    }

    async fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let state = AppState {
            db: db.clone(),
            engine: Arc::new(ConversationEngine::new(db, Arc::new(StubModel))),
            sessions: SessionStore::new(),
            upload_dir: dir.path().join("uploads"),
        };
        (build_router(state), dir)
    }

    #[tokio::test]
    async fn health_is_public() {
        let (app, _dir) = test_router().await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn dashboard_redirects_without_session() {
        let (app, _dir) = test_router().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[tokio::test]
    async fn login_form_is_public() {
        let (app, _dir) = test_router().await;
        let response = app
            .oneshot(Request::get("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
