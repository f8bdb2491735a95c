// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript flattening for model prompts.

use solace_core::ChatTurn;

/// Renders a transcript as labelled lines, one turn per line:
///
/// ```text
/// User: I had a rough day.
/// Assistant: I'm here. What made it rough?
/// ```
pub fn render_dialogue(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
        .collect::<Vec<_>>()
        .join("\n")
}
