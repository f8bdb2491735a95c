// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini model adapter for the Solace companion service.
//!
//! This crate implements [`CompanionModel`] on top of the Gemini
//! `generateContent` API, providing persona-driven reply generation and
//! full-transcript analysis.

pub mod client;
pub mod prompts;
pub mod types;

use async_trait::async_trait;
use solace_config::SolaceConfig;
use solace_core::types::AnalysisReport;
use solace_core::{CompanionModel, SolaceError};
use tracing::info;

use crate::client::GeminiClient;
use crate::types::GenerateRequest;

/// Gemini-backed companion model implementing [`CompanionModel`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
/// A missing key is a startup failure, not a degraded mode.
pub struct GeminiModel {
    client: GeminiClient,
    persona: String,
}

impl GeminiModel {
    /// Creates a new Gemini model from the given configuration.
    ///
    /// # API Key Resolution
    /// 1. `config.gemini.api_key` if set
    /// 2. `GEMINI_API_KEY` environment variable
    /// 3. Returns error if neither is available
    pub fn new(config: &SolaceConfig) -> Result<Self, SolaceError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(api_key, config.gemini.model.clone())?;

        info!(model = client.model(), "Gemini model initialized");

        Ok(Self {
            client,
            persona: prompts::persona_prompt(&config.agent.name),
        })
    }

    /// Creates a model with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient, persona: String) -> Self {
        Self { client, persona }
    }
}

#[async_trait]
impl CompanionModel for GeminiModel {
    async fn generate_reply(&self, dialogue: &str) -> Result<String, SolaceError> {
        let request = GenerateRequest::new(&self.persona, dialogue);
        let text = self.client.generate(&request).await?;
        Ok(text.trim().to_string())
    }

    async fn analyze(&self, dialogue: &str) -> Result<AnalysisReport, SolaceError> {
        let request = GenerateRequest::new(prompts::ANALYZER_PROMPT, dialogue);
        let text = self.client.generate(&request).await?;
        parse_analysis(&text)
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, SolaceError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("GEMINI_API_KEY").map_err(|_| {
        SolaceError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )
    })
}

/// Parses the analyzer's response into an [`AnalysisReport`].
///
/// Models often wrap JSON in a Markdown code fence; the fence is stripped
/// before parsing. Content that still fails to parse is an error, which the
/// conversation engine converts into its degraded report.
pub fn parse_analysis(raw: &str) -> Result<AnalysisReport, SolaceError> {
    let cleaned = strip_code_fence(raw);
    serde_json::from_str(cleaned).map_err(|e| SolaceError::Model {
        message: format!("analysis response was not valid JSON: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Strips a surrounding ```json ... ``` (or bare ```) fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
