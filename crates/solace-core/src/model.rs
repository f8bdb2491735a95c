// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The narrow interface to the hosted generative model.
//!
//! Nothing outside the provider crate depends on which model is behind
//! these two operations. Both take the transcript already flattened into
//! dialogue text ("Speaker: text" per line, in order).

use async_trait::async_trait;

use crate::error::SolaceError;
use crate::types::AnalysisReport;

/// The two external operations the conversation engine needs.
#[async_trait]
pub trait CompanionModel: Send + Sync {
    /// Produce the assistant's next reply for the given dialogue.
    /// The return value is opaque text.
    async fn generate_reply(&self, dialogue: &str) -> Result<String, SolaceError>;

    /// Derive a structured sentiment/risk report from the full dialogue.
    /// Implementations are responsible for stripping any code-fence
    /// decoration and parsing the model's response; a response that does
    /// not parse is an error (callers substitute).
    async fn analyze(&self, dialogue: &str) -> Result<AnalysisReport, SolaceError>;
}
