// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine for the Solace companion service.
//!
//! Owns the chat turn lifecycle: transcript append, model reply with a
//! static fallback, durable persistence, and full-transcript re-analysis
//! with a degraded error report on failure.

pub mod dialogue;
pub mod engine;

pub use engine::{error_report, ChatOutcome, ConversationEngine, FALLBACK_REPLY};
