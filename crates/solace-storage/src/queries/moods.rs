// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood check-in queries. One entry per user per calendar day; a second
//! check-in on the same day overwrites the first.

use rusqlite::params;
use solace_core::{MoodEntry, SolaceError};

use crate::database::{map_tr_err, Database};

/// Record a check-in for `entry_date` (ISO `YYYY-MM-DD`), replacing any
/// entry already stored for that day.
pub async fn upsert_mood(
    db: &Database,
    user_id: i64,
    entry_date: &str,
    score: i64,
    note: Option<String>,
) -> Result<(), SolaceError> {
    let entry_date = entry_date.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO mood_entries (user_id, entry_date, score, note)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, entry_date)
                 DO UPDATE SET score = excluded.score, note = excluded.note",
                params![user_id, entry_date, score, note],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Entries on or after `since` (ISO date), oldest first.
pub async fn moods_since(
    db: &Database,
    user_id: i64,
    since: &str,
) -> Result<Vec<MoodEntry>, SolaceError> {
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, entry_date, score, note FROM mood_entries
                 WHERE user_id = ?1 AND entry_date >= ?2
                 ORDER BY entry_date ASC",
            )?;
            let rows = stmt
                .query_map(params![user_id, since], row_to_entry)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Full check-in history for a user, oldest first.
pub async fn all_moods(db: &Database, user_id: i64) -> Result<Vec<MoodEntry>, SolaceError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, entry_date, score, note FROM mood_entries
                 WHERE user_id = ?1
                 ORDER BY entry_date ASC",
            )?;
            let rows = stmt
                .query_map(params![user_id], row_to_entry)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodEntry> {
    Ok(MoodEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        entry_date: row.get(2)?,
        score: row.get(3)?,
        note: row.get(4)?,
    })
}
