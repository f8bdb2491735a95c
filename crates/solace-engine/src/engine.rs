// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn conversation pipeline.
//!
//! Each turn appends the user's message, asks the model for a reply,
//! persists the grown transcript, then re-analyzes the whole dialogue and
//! caches the structured report. Model failures degrade to substitutes
//! rather than failing the turn: a canned apology for a failed reply, a
//! single-key error report for a failed analysis.

use std::sync::Arc;

use solace_core::{ChatTurn, CompanionModel, SolaceError};
use solace_storage::queries::{transcripts, users};
use solace_storage::Database;
use tracing::{debug, warn};

use crate::dialogue::render_dialogue;

/// Reply substituted when the generation call fails.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble finding my words right now. I'm still here with you, though. Could you tell me a little more?";

/// Report substituted when the analysis call fails or returns unparseable
/// content.
pub fn error_report() -> serde_json::Value {
    serde_json::json!({"error": "Failed to analyze metrics."})
}

/// Result of one conversation turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The assistant's reply (possibly [`FALLBACK_REPLY`]).
    pub reply: String,
    /// The cached analysis report (possibly the error report).
    pub report: serde_json::Value,
    /// The full transcript after this turn.
    pub history: Vec<ChatTurn>,
}

/// Drives the append-generate-persist-analyze cycle for companion chats.
pub struct ConversationEngine {
    db: Database,
    model: Arc<dyn CompanionModel>,
}

impl ConversationEngine {
    pub fn new(db: Database, model: Arc<dyn CompanionModel>) -> Self {
        Self { db, model }
    }

    /// Processes one user message and returns the grown transcript.
    ///
    /// The transcript write and the metrics write are independent: a crash
    /// between them can leave the cached report one turn stale, which the
    /// next turn repairs. Storage failures are real errors; model failures
    /// are not.
    pub async fn process_turn(
        &self,
        user_id: i64,
        message: &str,
    ) -> Result<ChatOutcome, SolaceError> {
        let mut turns = transcripts::get_transcript(&self.db, user_id).await?;
        turns.push(ChatTurn::user(message));

        let reply = match self.model.generate_reply(&render_dialogue(&turns)).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(user_id, error = %e, "reply generation failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
        };
        turns.push(ChatTurn::assistant(&reply));

        transcripts::replace_transcript(&self.db, user_id, &turns).await?;
        debug!(user_id, turn_count = turns.len(), "transcript persisted");

        let report = match self.model.analyze(&render_dialogue(&turns)).await {
            Ok(report) => serde_json::to_value(&report)
                .map_err(|e| SolaceError::Internal(e.to_string()))?,
            Err(e) => {
                warn!(user_id, error = %e, "transcript analysis failed, using error report");
                error_report()
            }
        };
        users::update_metrics(&self.db, user_id, &report).await?;

        Ok(ChatOutcome {
            reply,
            report,
            history: turns,
        })
    }

    /// Loads the user's transcript for display.
    pub async fn history(&self, user_id: i64) -> Result<Vec<ChatTurn>, SolaceError> {
        transcripts::get_transcript(&self.db, user_id).await
    }
}
