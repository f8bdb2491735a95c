// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account CRUD operations.

use rusqlite::params;
use solace_core::types::Preferences;
use solace_core::{SolaceError, User};
use tracing::warn;

use crate::database::{map_tr_err, Database};

/// Raw row as read from SQLite; JSON columns still text.
type UserRow = (i64, String, String, Option<String>, String, Option<String>, String);

const USER_COLUMNS: &str =
    "id, username, password_hash, avatar, preferences, metrics, created_at";

/// Create a new account. Fails with [`SolaceError::UsernameTaken`] when the
/// name is already registered.
pub async fn create_user(
    db: &Database,
    username: &str,
    password_hash: &str,
) -> Result<i64, SolaceError> {
    let username = username.to_string();
    let password_hash = password_hash.to_string();
    let preferences = serde_json::to_string(&Preferences::default())
        .map_err(|e| SolaceError::Internal(e.to_string()))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash, avatar, preferences, metrics, created_at)
                 VALUES (?1, ?2, NULL, ?3, NULL, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![username, password_hash, preferences],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_unique_violation)
}

/// Fetch an account by username.
pub async fn get_user_by_name(
    db: &Database,
    username: &str,
) -> Result<Option<User>, SolaceError> {
    let username = username.to_string();
    let row = db
        .connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
            ))?;
            let result = stmt.query_row(params![username], row_to_tuple);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    Ok(row.map(tuple_to_user))
}

/// Fetch an account by id.
pub async fn get_user(db: &Database, id: i64) -> Result<Option<User>, SolaceError> {
    let row = db
        .connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], row_to_tuple);
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;
    Ok(row.map(tuple_to_user))
}

/// Update username, preferences, and (when provided) the avatar filename.
/// A `None` avatar keeps the existing one.
pub async fn update_profile(
    db: &Database,
    id: i64,
    username: &str,
    preferences: &Preferences,
    avatar: Option<String>,
) -> Result<(), SolaceError> {
    let username = username.to_string();
    let preferences = serde_json::to_string(preferences)
        .map_err(|e| SolaceError::Internal(e.to_string()))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users
                 SET username = ?1, preferences = ?2, avatar = COALESCE(?3, avatar)
                 WHERE id = ?4",
                params![username, preferences, avatar, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_unique_violation)
}

/// Replace the cached analysis report for an account.
pub async fn update_metrics(
    db: &Database,
    id: i64,
    metrics: &serde_json::Value,
) -> Result<(), SolaceError> {
    let metrics =
        serde_json::to_string(metrics).map_err(|e| SolaceError::Internal(e.to_string()))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE users SET metrics = ?1 WHERE id = ?2",
                params![metrics, id],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_tuple(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// JSON columns parse defensively: malformed or legacy preferences fall
/// back to defaults, malformed metrics read as absent.
fn tuple_to_user(
    (id, username, password_hash, avatar, preferences, metrics, created_at): UserRow,
) -> User {
    let preferences = serde_json::from_str(&preferences).unwrap_or_else(|e| {
        warn!(user_id = id, error = %e, "unreadable preferences, using defaults");
        Preferences::default()
    });
    let metrics = metrics.and_then(|m| serde_json::from_str(&m).ok());
    User {
        id,
        username,
        password_hash,
        avatar,
        preferences,
        metrics,
        created_at,
    }
}

/// UNIQUE violations on `users.username` become [`SolaceError::UsernameTaken`].
fn map_unique_violation(err: tokio_rusqlite::Error) -> SolaceError {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) = &err {
        if e.code == rusqlite::ErrorCode::ConstraintViolation {
            return SolaceError::UsernameTaken;
        }
    }
    map_tr_err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let (db, _dir) = setup_db().await;
        let id = create_user(&db, "alice", "$argon2id$fake").await.unwrap();
        assert!(id > 0);

        let user = get_user_by_name(&db, "alice").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "$argon2id$fake");
        assert!(user.avatar.is_none());
        assert!(user.metrics.is_none());
        assert_eq!(user.preferences, Preferences::default());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let (db, _dir) = setup_db().await;
        create_user(&db, "alice", "h1").await.unwrap();
        let err = create_user(&db, "alice", "h2").await.unwrap_err();
        assert!(matches!(err, SolaceError::UsernameTaken));
    }

    #[tokio::test]
    async fn unknown_user_reads_as_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_user_by_name(&db, "nobody").await.unwrap().is_none());
        assert!(get_user(&db, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_profile_changes_name_prefs_and_avatar() {
        let (db, _dir) = setup_db().await;
        let id = create_user(&db, "alice", "h").await.unwrap();

        let mut prefs = Preferences::default();
        prefs.theme = "dark".to_string();
        update_profile(&db, id, "alice2", &prefs, Some("a.png".to_string()))
            .await
            .unwrap();

        let user = get_user(&db, id).await.unwrap().unwrap();
        assert_eq!(user.username, "alice2");
        assert_eq!(user.preferences.theme, "dark");
        assert_eq!(user.avatar.as_deref(), Some("a.png"));

        // Omitting the avatar keeps the stored one.
        update_profile(&db, id, "alice2", &prefs, None).await.unwrap();
        let user = get_user(&db, id).await.unwrap().unwrap();
        assert_eq!(user.avatar.as_deref(), Some("a.png"));
    }

    #[tokio::test]
    async fn rename_onto_existing_username_is_rejected() {
        let (db, _dir) = setup_db().await;
        create_user(&db, "alice", "h").await.unwrap();
        let bob = create_user(&db, "bob", "h").await.unwrap();

        let err = update_profile(&db, bob, "alice", &Preferences::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SolaceError::UsernameTaken));
    }

    #[tokio::test]
    async fn update_metrics_replaces_cached_report() {
        let (db, _dir) = setup_db().await;
        let id = create_user(&db, "alice", "h").await.unwrap();

        let first = serde_json::json!({"risk_safety": {}});
        update_metrics(&db, id, &first).await.unwrap();

        let second = serde_json::json!({"error": "Failed to analyze metrics."});
        update_metrics(&db, id, &second).await.unwrap();

        let user = get_user(&db, id).await.unwrap().unwrap();
        assert_eq!(user.metrics, Some(second));
    }

    #[tokio::test]
    async fn malformed_preferences_fall_back_to_defaults() {
        let (db, _dir) = setup_db().await;
        let id = create_user(&db, "alice", "h").await.unwrap();

        db.connection()
            .call(move |conn| {
                conn.execute(
                    "UPDATE users SET preferences = 'not json' WHERE id = ?1",
                    params![id],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let user = get_user(&db, id).await.unwrap().unwrap();
        assert_eq!(user.preferences, Preferences::default());
    }
}
