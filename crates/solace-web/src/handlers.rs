// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Authentication failures on forms re-render the form with an inline
//! message at HTTP 200. Storage failures surface as 500; model failures
//! never reach here because the engine degrades them internally.

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use chrono::{Days, Utc};
use serde::{Deserialize, Serialize};
use solace_core::{ChatTurn, SolaceError};
use solace_storage::queries::{moods, stories, transcripts, users};
use tracing::{error, info};

use crate::auth::{self, CurrentUser, SESSION_COOKIE};
use crate::pages;
use crate::server::AppState;

/// Storage or internal failure while handling a request.
pub struct WebError(SolaceError);

impl From<SolaceError> for WebError {
    fn from(err: SolaceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "internal server error"})),
        )
            .into_response()
    }
}

/// Today's calendar date, `YYYY-MM-DD`.
fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// First date of the trailing 7-day window (today inclusive).
fn week_start() -> String {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(6))
        .unwrap_or_else(|| Utc::now().date_naive())
        .format("%Y-%m-%d")
        .to_string()
}

// --- Dashboard ---

pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, WebError> {
    let moods = moods::moods_since(&state.db, user.id, &week_start()).await?;
    Ok(Html(pages::dashboard_page(&user, &moods)))
}

// --- Registration and login ---

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

pub async fn get_register() -> Html<String> {
    Html(pages::register_page(None))
}

pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<CredentialsForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Ok(Html(pages::register_page(Some(
            "Username and password are required.",
        )))
        .into_response());
    }

    let hash = auth::hash_password(&form.password)?;
    match users::create_user(&state.db, username, &hash).await {
        Ok(user_id) => {
            info!(username, "account registered");
            let token = state.sessions.create(user_id);
            Ok((session_jar(jar, token), Redirect::to("/")).into_response())
        }
        Err(SolaceError::UsernameTaken) => Ok(Html(pages::register_page(Some(
            "That username is already taken.",
        )))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_login() -> Html<String> {
    Html(pages::login_page(None))
}

/// Login failures are deliberately indistinct: an unknown username and a
/// wrong password produce the same message.
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Form(form): axum::Form<CredentialsForm>,
) -> Result<Response, WebError> {
    match auth::authenticate(&state.db, form.username.trim(), &form.password).await {
        Ok(user) => {
            let token = state.sessions.create(user.id);
            Ok((session_jar(jar, token), Redirect::to("/")).into_response())
        }
        Err(SolaceError::InvalidCredentials) => {
            Ok(Html(pages::login_page(Some("Invalid credentials."))).into_response())
        }
        Err(e) => Err(WebError(e)),
    }
}

pub async fn get_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value());
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/login")).into_response()
}

fn session_jar(jar: CookieJar, token: String) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .build(),
    )
}

// --- Mood check-ins ---

#[derive(Debug, Deserialize)]
pub struct CheckinForm {
    pub mood: i64,
    #[serde(default)]
    pub note: Option<String>,
}

pub async fn post_checkin(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    axum::Form(form): axum::Form<CheckinForm>,
) -> Result<Redirect, WebError> {
    let note = form.note.filter(|n| !n.trim().is_empty());
    moods::upsert_mood(&state.db, user.id, &today(), form.mood, note).await?;
    Ok(Redirect::to("/"))
}

// --- Companion chat ---

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub metrics: serde_json::Value,
    pub history: Vec<ChatTurn>,
}

pub async fn get_chat_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, WebError> {
    let history = state.engine.history(user.id).await?;
    Ok(Html(pages::chat_page(&user, &history)))
}

pub async fn post_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ChatRequest>,
) -> Result<Response, WebError> {
    if body.message.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "message must not be empty"})),
        )
            .into_response());
    }

    let outcome = state.engine.process_turn(user.id, body.message.trim()).await?;
    Ok(Json(ChatResponse {
        reply: outcome.reply,
        metrics: outcome.report,
        history: outcome.history,
    })
    .into_response())
}

// --- Community forum ---

#[derive(Debug, Deserialize)]
pub struct StoryForm {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub anonymous: Option<String>,
}

pub async fn get_community(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, WebError> {
    let stories = stories::list_stories(&state.db).await?;
    Ok(Html(pages::community_page(&user, &stories)))
}

pub async fn get_new_story(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(pages::new_story_page(&user))
}

pub async fn post_new_story(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    axum::Form(form): axum::Form<StoryForm>,
) -> Result<Redirect, WebError> {
    let anonymous = form.anonymous.is_some();
    stories::insert_story(&state.db, user.id, form.title.trim(), form.body.trim(), anonymous)
        .await?;
    Ok(Redirect::to("/community"))
}

// --- Profile ---

pub async fn get_profile(CurrentUser(user): CurrentUser) -> Html<String> {
    Html(pages::profile_page(&user, None))
}

pub async fn post_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let mut username = user.username.clone();
    let mut preferences = user.preferences.clone();
    preferences.daily_reminder = false;
    let mut avatar: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| SolaceError::Internal(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "username" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| SolaceError::Internal(e.to_string()))?;
                let value = value.trim().to_string();
                if !value.is_empty() {
                    username = value;
                }
            }
            "theme" => {
                preferences.theme = field
                    .text()
                    .await
                    .map_err(|e| SolaceError::Internal(e.to_string()))?;
            }
            "daily_reminder" => {
                preferences.daily_reminder = true;
            }
            "avatar" => {
                let original = field.file_name().unwrap_or_default().to_string();
                if original.is_empty() {
                    continue;
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| SolaceError::Internal(e.to_string()))?;
                if bytes.is_empty() {
                    continue;
                }
                avatar = Some(save_avatar(&state, &original, &bytes).await?);
            }
            _ => {}
        }
    }

    match users::update_profile(&state.db, user.id, &username, &preferences, avatar).await {
        Ok(()) => Ok(Redirect::to("/profile").into_response()),
        Err(SolaceError::UsernameTaken) => Ok(Html(pages::profile_page(
            &user,
            Some("That username is already taken."),
        ))
        .into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Writes an uploaded avatar under the configured upload directory with a
/// generated name, keeping only a sanitized extension from the original.
async fn save_avatar(
    state: &AppState,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, SolaceError> {
    let extension = std::path::Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin");
    let filename = format!("{}.{extension}", uuid::Uuid::new_v4());

    let path = state.upload_dir.join(&filename);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| SolaceError::Internal(format!("failed to store avatar: {e}")))?;
    info!(filename, size = bytes.len(), "avatar stored");
    Ok(filename)
}

// --- Data export ---

pub async fn get_export_data(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, WebError> {
    let history = transcripts::get_transcript(&state.db, user.id).await?;
    let all_moods = moods::all_moods(&state.db, user.id).await?;

    let document = serde_json::json!({
        "history": history,
        "metrics": user.metrics,
        "moods": all_moods,
    });
    let body = serde_json::to_string_pretty(&document)
        .map_err(|e| SolaceError::Internal(e.to_string()))?;

    let disposition = format!(
        "attachment; filename=\"solace_export_{}.json\"",
        user.username.replace(|c: char| !c.is_ascii_alphanumeric(), "_")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// --- Health ---

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
