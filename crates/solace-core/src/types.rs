// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Solace crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who authored a chat turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Capitalized label used when flattening a transcript into dialogue text.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        }
    }
}

/// One turn in a user's chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Speaker,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// A registered account.
///
/// `preferences` and `metrics` are stored as JSON text columns; the query
/// layer deserializes them defensively (defaults on missing or malformed
/// content) so old rows keep loading as the shapes evolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub preferences: Preferences,
    /// Cached copy of the most recent analysis report, if any.
    pub metrics: Option<serde_json::Value>,
    pub created_at: String,
}

/// Versioned per-user preferences.
///
/// Every field carries a default so rows written by older versions
/// deserialize cleanly instead of drifting shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub daily_reminder: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme: default_theme(),
            daily_reminder: false,
        }
    }
}

fn default_schema_version() -> u32 {
    1
}

fn default_theme() -> String {
    "light".to_string()
}

/// One mood check-in. At most one row exists per (user, calendar date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: i64,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub entry_date: String,
    pub score: i64,
    pub note: Option<String>,
}

/// A peer-support forum post.
///
/// `byline` is resolved at query time: "Anonymous" whenever the post is
/// flagged anonymous or has no owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub body: String,
    pub anonymous: bool,
    pub byline: String,
    pub created_at: String,
}

/// A single leaf of the analysis report: an enumerated value plus the
/// model's justification for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default = "default_metric_value")]
    pub value: String,
    #[serde(default)]
    pub justification: String,
}

impl Default for Metric {
    fn default() -> Self {
        Self {
            value: default_metric_value(),
            justification: String::new(),
        }
    }
}

fn default_metric_value() -> String {
    "N/A".to_string()
}

/// Structured sentiment/risk report derived from a full transcript snapshot.
///
/// The shape is a contract with the external model: every field defaults to
/// `{"value": "N/A", "justification": ""}` when the model omits it, so a
/// partially-filled response still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub progress_engagement: ProgressEngagement,
    #[serde(default)]
    pub risk_safety: RiskSafety,
    #[serde(default)]
    pub well_being_indicators: WellBeingIndicators,
    #[serde(default)]
    pub linguistic_metrics: LinguisticMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEngagement {
    /// One of: getting better, worse, stable, N/A.
    #[serde(default)]
    pub sentiment_trend: Metric,
    /// One of: high, medium, low, N/A.
    #[serde(default)]
    pub engagement_level: Metric,
    /// One of: high, medium, low, N/A.
    #[serde(default)]
    pub openness: Metric,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSafety {
    /// One of: high, medium, low, none.
    #[serde(default)]
    pub self_harm_ideation: Metric,
    /// One of: high, medium, low, none.
    #[serde(default)]
    pub harm_to_others: Metric,
    /// One of: present, absent, N/A.
    #[serde(default)]
    pub crisis_indicators: Metric,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellBeingIndicators {
    /// One of: positive, negative, mixed, N/A.
    #[serde(default)]
    pub reported_mood: Metric,
    /// One of: high, medium, low, N/A.
    #[serde(default)]
    pub anxiety_level: Metric,
    /// One of: good, poor, disturbed, N/A.
    #[serde(default)]
    pub sleep_quality: Metric,
    /// One of: connected, isolated, N/A.
    #[serde(default)]
    pub social_connection: Metric,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticMetrics {
    /// One of: positive, negative, neutral, mixed, N/A.
    #[serde(default)]
    pub emotional_tone: Metric,
    /// One of: high, medium, low, N/A.
    #[serde(default)]
    pub self_focus: Metric,
    /// One of: high, medium, low, N/A.
    #[serde(default)]
    pub expressiveness: Metric,
}
