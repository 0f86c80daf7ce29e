// ABOUTME: Application constants shared with the core crate
// ABOUTME: Score bounds, language codes, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Application constants

pub use kaiwa_core::constants::{languages, scores, service_names};

/// Names used when logging reply-generator operations
pub mod operations {
    /// Conversational reply for a chat turn
    pub const CHAT_REPLY: &str = "chat_reply";
    /// Provider-assisted sentence correction
    pub const SENTENCE_CORRECTION: &str = "sentence_correction";
}
