// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, engine construction, and conversation builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `kaiwa_coach`

use anyhow::Result;
use kaiwa_coach::models::{Conversation, ConversationMode, JlptLevel, Message};
use kaiwa_intelligence::{AnalysisEngine, IntelligenceConfig};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level, quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Default configuration without environment overrides
pub fn default_config() -> Arc<IntelligenceConfig> {
    Arc::new(IntelligenceConfig::default())
}

/// Engine over the built-in rule tables
pub fn create_test_engine() -> Result<Arc<AnalysisEngine>> {
    init_test_logging();
    Ok(Arc::new(AnalysisEngine::new(default_config())?))
}

/// Conversation with the given learner messages, each answered by the partner
pub fn create_test_conversation(
    id: &str,
    level: JlptLevel,
    mode: ConversationMode,
    learner_messages: &[(&str, Option<f64>)],
) -> Conversation {
    let mut conversation = Conversation::new(id, "learner-1", "旅行", level, mode);
    for (content, latency) in learner_messages {
        let message = match latency {
            Some(ms) => Message::user(*content).with_latency(*ms),
            None => Message::user(*content),
        };
        conversation.push_message(message);
        conversation.push_message(Message::assistant("そうですか。"));
    }
    conversation
}
