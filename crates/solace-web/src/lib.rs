// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP presentation layer for the Solace companion service.
//!
//! Maps HTTP verbs and paths onto storage and the conversation engine,
//! rendering HTML pages or JSON documents. Sessions are cookie-backed
//! and held in process memory.

pub mod auth;
pub mod handlers;
pub mod pages;
pub mod server;

pub use server::{build_router, start_server, AppState};
