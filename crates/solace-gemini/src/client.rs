// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles request construction and
//! authentication. Requests are single-shot: a failed call surfaces to the
//! conversation engine, which substitutes degraded output rather than
//! retrying.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use solace_core::SolaceError;
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateRequest, GenerateResponse};

/// Base URL for the Gemini API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key for authentication
    /// * `model` - Model identifier (e.g., "gemini-1.5-flash")
    pub fn new(api_key: String, model: String) -> Result<Self, SolaceError> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(&api_key)
            .map_err(|e| SolaceError::Config(format!("invalid API key header value: {e}")))?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| SolaceError::Model {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a `generateContent` request and returns the first candidate's
    /// text. No retry: any failure is returned to the caller.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, SolaceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SolaceError::Model {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "generateContent response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(SolaceError::Model {
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| SolaceError::Model {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| SolaceError::Model {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let text = parsed.first_text();
        if text.is_empty() {
            return Err(SolaceError::Model {
                message: "model returned no candidates".into(),
                source: None,
            });
        }
        Ok(text)
    }
}
