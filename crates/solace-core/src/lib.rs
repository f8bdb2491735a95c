// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Solace journaling application.
//!
//! Provides the shared error type, domain types (users, mood entries,
//! forum stories, chat transcripts, analysis reports), and the
//! [`CompanionModel`] trait implemented by the generative-model provider.

pub mod error;
pub mod model;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SolaceError;
pub use model::CompanionModel;
pub use types::{
    AnalysisReport, ChatTurn, Metric, MoodEntry, Preferences, Speaker, Story, User,
};
