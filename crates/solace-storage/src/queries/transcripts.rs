// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Companion transcript persistence. Each user has at most one
//! transcript row holding the full dialogue as a JSON array; writes
//! replace the document wholesale, so concurrent turns resolve
//! last-writer-wins.

use rusqlite::params;
use solace_core::{ChatTurn, SolaceError};
use tracing::warn;

use crate::database::{map_tr_err, Database};

/// Load a user's dialogue history. A missing row reads as an empty
/// history; an unreadable document is logged and also reads as empty.
pub async fn get_transcript(db: &Database, user_id: i64) -> Result<Vec<ChatTurn>, SolaceError> {
    let raw = db
        .connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT turns FROM transcripts WHERE user_id = ?1")?;
            let result = stmt.query_row(params![user_id], |row| row.get::<_, String>(0));
            match result {
                Ok(raw) => Ok(Some(raw)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)?;

    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(turns) => Ok(turns),
        Err(e) => {
            warn!(user_id, error = %e, "unreadable transcript, starting fresh");
            Ok(Vec::new())
        }
    }
}

/// Replace the stored dialogue with `turns`.
pub async fn replace_transcript(
    db: &Database,
    user_id: i64,
    turns: &[ChatTurn],
) -> Result<(), SolaceError> {
    let turns = serde_json::to_string(turns).map_err(|e| SolaceError::Internal(e.to_string()))?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO transcripts (user_id, turns, updated_at)
                 VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 ON CONFLICT(user_id)
                 DO UPDATE SET turns = excluded.turns, updated_at = excluded.updated_at",
                params![user_id, turns],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
