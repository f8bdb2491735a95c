// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `solace-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use solace_core::types::{ChatTurn, MoodEntry, Preferences, Story, User};
