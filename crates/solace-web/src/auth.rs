// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password hashing and cookie-backed sessions.
//!
//! Passwords are hashed with Argon2id into PHC strings. Sessions are
//! coarse: an opaque token in a cookie mapping to a user id in process
//! memory, logged-in or not, no expiry or refresh.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::CookieJar;
use dashmap::DashMap;
use solace_core::{SolaceError, User};
use solace_storage::queries::users;
use solace_storage::Database;
use std::sync::Arc;

use crate::server::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "solace_session";

/// Hashes a password into a PHC string.
pub fn hash_password(password: &str) -> Result<String, SolaceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SolaceError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string. An unreadable stored
/// hash verifies as false rather than erroring.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Checks a username/password pair against storage. Unknown users and
/// wrong passwords both come back as [`SolaceError::InvalidCredentials`]
/// so login failures stay indistinguishable to the caller.
pub async fn authenticate(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<User, SolaceError> {
    match users::get_user_by_name(db, username).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        _ => Err(SolaceError::InvalidCredentials),
    }
}

/// In-process session token -> user id map.
#[derive(Clone, Default)]
pub struct SessionStore {
    tokens: Arc<DashMap<String, i64>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session for the user and returns its token.
    pub fn create(&self, user_id: i64) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    /// Looks up the user id behind a token.
    pub fn user_id(&self, token: &str) -> Option<i64> {
        self.tokens.get(token).map(|entry| *entry.value())
    }

    /// Destroys a session. A missing token is a no-op.
    pub fn destroy(&self, token: &str) {
        self.tokens.remove(token);
    }
}

/// Extractor for the logged-in account. Requests without a live session
/// are redirected to the login page.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user_id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| state.sessions.user_id(cookie.value()))
            .ok_or_else(|| Redirect::to("/login"))?;

        match users::get_user(&state.db, user_id).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            // The session outlived its account, or storage failed; either
            // way the request is not authenticated.
            Ok(None) => Err(Redirect::to("/login")),
            Err(e) => {
                tracing::error!(user_id, error = %e, "session lookup failed");
                Err(Redirect::to("/login"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_verifies_false() {
        assert!(!verify_password("pw1", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_user_and_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        let hash = hash_password("right").unwrap();
        users::create_user(&db, "alice", &hash).await.unwrap();

        let user = authenticate(&db, "alice", "right").await.unwrap();
        assert_eq!(user.username, "alice");

        let err = authenticate(&db, "alice", "wrong").await.unwrap_err();
        assert!(matches!(err, SolaceError::InvalidCredentials));
        let err = authenticate(&db, "nobody", "right").await.unwrap_err();
        assert!(matches!(err, SolaceError::InvalidCredentials));
    }

    #[test]
    fn session_lifecycle() {
        let store = SessionStore::new();
        let token = store.create(42);
        assert_eq!(store.user_id(&token), Some(42));
        store.destroy(&token);
        assert_eq!(store.user_id(&token), None);
        store.destroy(&token);
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let store = SessionStore::new();
        assert_ne!(store.create(1), store.create(1));
    }
}
