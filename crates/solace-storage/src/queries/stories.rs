// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Peer-support story queries. The board is append-only; stories are
//! never edited or removed.

use rusqlite::params;
use solace_core::{SolaceError, Story};

use crate::database::{map_tr_err, Database};

/// Publish a story. When `anonymous` is set the stored row still carries
/// the author id, but listings render the byline as "Anonymous".
pub async fn insert_story(
    db: &Database,
    user_id: i64,
    title: &str,
    body: &str,
    anonymous: bool,
) -> Result<i64, SolaceError> {
    let title = title.to_string();
    let body = body.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO stories (user_id, title, body, anonymous, created_at)
                 VALUES (?1, ?2, ?3, ?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![user_id, title, body, anonymous],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// All stories, newest first, with the byline resolved server-side so
/// anonymous authors never leave the database layer.
pub async fn list_stories(db: &Database) -> Result<Vec<Story>, SolaceError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT s.id, s.user_id, s.title, s.body, s.anonymous,
                        CASE WHEN s.anonymous THEN 'Anonymous'
                             ELSE COALESCE(u.username, 'Anonymous') END,
                        s.created_at
                 FROM stories s
                 LEFT JOIN users u ON u.id = s.user_id
                 ORDER BY s.id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Story {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        title: row.get(2)?,
                        body: row.get(3)?,
                        anonymous: row.get(4)?,
                        byline: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::users::create_user;
    use tempfile::tempdir;

    async fn setup_user() -> (Database, i64, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let id = create_user(&db, "alice", "h").await.unwrap();
        (db, id, dir)
    }

    #[tokio::test]
    async fn named_story_carries_author_byline() {
        let (db, user_id, _dir) = setup_user().await;
        insert_story(&db, user_id, "First week", "It got easier.", false)
            .await
            .unwrap();

        let stories = list_stories(&db).await.unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].byline, "alice");
        assert!(!stories[0].anonymous);
    }

    #[tokio::test]
    async fn anonymous_story_hides_the_author() {
        let (db, user_id, _dir) = setup_user().await;
        insert_story(&db, user_id, "Hard day", "But I made it.", true)
            .await
            .unwrap();

        let stories = list_stories(&db).await.unwrap();
        assert_eq!(stories[0].byline, "Anonymous");
        assert!(stories[0].anonymous);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let (db, user_id, _dir) = setup_user().await;
        insert_story(&db, user_id, "one", "a", false).await.unwrap();
        insert_story(&db, user_id, "two", "b", false).await.unwrap();
        insert_story(&db, user_id, "three", "c", false).await.unwrap();

        let stories = list_stories(&db).await.unwrap();
        let titles: Vec<_> = stories.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "two", "one"]);
    }
}
