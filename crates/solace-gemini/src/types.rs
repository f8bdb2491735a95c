// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Conversation contents. Solace sends a single user turn carrying the
    /// full prompt text.
    pub contents: Vec<Content>,

    /// System instruction steering the model's persona.
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

impl GenerateRequest {
    /// Builds a request with one system instruction and one user turn.
    pub fn new(system: &str, user: &str) -> Self {
        Self {
            contents: vec![Content::user(user)],
            system_instruction: Some(Content::text(system)),
        }
    }
}

/// A content block: an optional role plus text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less content block (used for system instructions).
    pub fn text(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    /// A user-role content block.
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// A single text part within a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

// --- Response types ---

/// A response from the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate. Empty when the
    /// model returned no candidates.
    pub fn first_text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

/// One generation candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Content,
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub status: String,
}
