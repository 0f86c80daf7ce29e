// ABOUTME: In-memory conversation store backed by DashMap for the CLI and tests
// ABOUTME: Per-conversation sharded locking; analyses kept in insertion order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::ConversationStore;
use crate::errors::{AppError, AppResult};
use kaiwa_core::models::{Conversation, ConversationAnalysis, JlptLevel, Message};

/// In-memory store
///
/// Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<DashMap<String, Conversation>>,
    analyses: Arc<DashMap<String, Vec<ConversationAnalysis>>>,
}

impl InMemoryConversationStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations
    #[must_use]
    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    fn not_found(conversation_id: &str) -> AppError {
        AppError::not_found("Conversation").with_resource_id(conversation_id)
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn save_conversation(&self, conversation: Conversation) -> AppResult<()> {
        debug!(conversation_id = %conversation.id, "Saving conversation");
        self.conversations
            .insert(conversation.id.clone(), conversation);
        Ok(())
    }

    async fn get_conversation(&self, conversation_id: &str) -> AppResult<Option<Conversation>> {
        Ok(self
            .conversations
            .get(conversation_id)
            .map(|entry| entry.value().clone()))
    }

    async fn append_message(&self, conversation_id: &str, message: Message) -> AppResult<()> {
        let mut conversation = self
            .conversations
            .get_mut(conversation_id)
            .ok_or_else(|| Self::not_found(conversation_id))?;
        conversation.push_message(message);
        Ok(())
    }

    async fn append_analysis(&self, analysis: ConversationAnalysis) -> AppResult<()> {
        if !self.conversations.contains_key(&analysis.conversation_id) {
            return Err(Self::not_found(&analysis.conversation_id));
        }
        debug!(
            conversation_id = %analysis.conversation_id,
            analysis_id = %analysis.id,
            "Appending conversation analysis"
        );
        self.analyses
            .entry(analysis.conversation_id.clone())
            .or_default()
            .push(analysis);
        Ok(())
    }

    async fn latest_analysis(
        &self,
        conversation_id: &str,
    ) -> AppResult<Option<ConversationAnalysis>> {
        Ok(self
            .analyses
            .get(conversation_id)
            .and_then(|history| history.last().cloned()))
    }

    async fn analysis_history(
        &self,
        conversation_id: &str,
    ) -> AppResult<Vec<ConversationAnalysis>> {
        Ok(self
            .analyses
            .get(conversation_id)
            .map_or_else(Vec::new, |history| history.value().clone()))
    }

    async fn record_evaluation(
        &self,
        conversation_id: &str,
        total: f64,
        estimation: JlptLevel,
    ) -> AppResult<()> {
        let mut conversation = self
            .conversations
            .get_mut(conversation_id)
            .ok_or_else(|| Self::not_found(conversation_id))?;
        conversation.record_evaluation(total, estimation);
        Ok(())
    }
}
