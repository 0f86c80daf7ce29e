// ABOUTME: Storage contract for conversations and append-only conversation analyses
// ABOUTME: Async trait implemented by the in-memory store and by any persistent backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Conversation Storage
//!
//! Analyses are append-only: a new evaluation adds a record and never edits an
//! earlier one. Appending an analysis for an unknown conversation is an error.

mod memory;

pub use memory::InMemoryConversationStore;

use async_trait::async_trait;

use crate::errors::AppResult;
use kaiwa_core::models::{Conversation, ConversationAnalysis, JlptLevel, Message};

/// Persistence collaborator for conversations and their analyses
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Insert or replace a conversation
    async fn save_conversation(&self, conversation: Conversation) -> AppResult<()>;

    /// Fetch a conversation by id
    async fn get_conversation(&self, conversation_id: &str) -> AppResult<Option<Conversation>>;

    /// Append a message to a conversation
    ///
    /// Fails with a not-found error when the conversation does not exist.
    async fn append_message(&self, conversation_id: &str, message: Message) -> AppResult<()>;

    /// Append an analysis to the conversation's history
    ///
    /// Fails with a not-found error when the conversation does not exist.
    async fn append_analysis(&self, analysis: ConversationAnalysis) -> AppResult<()>;

    /// Most recent analysis of a conversation
    async fn latest_analysis(
        &self,
        conversation_id: &str,
    ) -> AppResult<Option<ConversationAnalysis>>;

    /// All analyses of a conversation, oldest first
    async fn analysis_history(&self, conversation_id: &str)
        -> AppResult<Vec<ConversationAnalysis>>;

    /// Record the summary of an evaluation on the conversation
    async fn record_evaluation(
        &self,
        conversation_id: &str,
        total: f64,
        estimation: JlptLevel,
    ) -> AppResult<()>;
}
