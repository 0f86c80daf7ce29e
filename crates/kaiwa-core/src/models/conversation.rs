// ABOUTME: Conversation and message records exchanged between learners and the assistant
// ABOUTME: Messages carry optional latency and per-message analysis attached after evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::MessageAnalysis;
use super::level::{ConversationMode, JlptLevel};
use super::score_value::ScoreValue;
use crate::constants::languages;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The learner
    User,
    /// The conversation partner generated by the reply provider
    Assistant,
}

/// One turn in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message
    pub role: MessageRole,
    /// Raw text as written
    pub content: String,
    /// When the message was recorded
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Milliseconds the learner took to answer; may arrive as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_latency_ms: Option<ScoreValue>,
    /// Analysis attached to user messages once evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MessageAnalysis>,
}

impl Message {
    /// New learner message stamped with the current time
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// New assistant message stamped with the current time
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            response_latency_ms: None,
            analysis: None,
        }
    }

    /// Attach a response latency
    #[must_use]
    pub fn with_latency(mut self, latency_ms: impl Into<ScoreValue>) -> Self {
        self.response_latency_ms = Some(latency_ms.into());
        self
    }

    /// Attach a per-message analysis
    #[must_use]
    pub fn with_analysis(mut self, analysis: MessageAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Whether the learner wrote this message
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }
}

fn default_language() -> String {
    languages::JAPANESE.to_owned()
}

/// A practice conversation between a learner and the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation identifier
    pub id: String,
    /// Owner of the conversation
    pub user_id: String,
    /// Free-text topic chosen by the learner
    pub topic: String,
    /// Level the learner is practicing towards
    pub level: JlptLevel,
    /// Practice mode
    #[serde(default)]
    pub mode: ConversationMode,
    /// Language code; only "ja" is analyzable
    #[serde(default = "default_language")]
    pub language: String,
    /// Ordered message history
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Weighted total from the most recent evaluation
    #[serde(default)]
    pub overall_total: Option<f64>,
    /// Level estimated by the most recent evaluation
    #[serde(default)]
    pub jlpt_estimation: Option<JlptLevel>,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Start an empty Japanese conversation
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        topic: impl Into<String>,
        level: JlptLevel,
        mode: ConversationMode,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            topic: topic.into(),
            level,
            mode,
            language: languages::JAPANESE.to_owned(),
            messages: Vec::new(),
            overall_total: None,
            jlpt_estimation: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message and bump `updated_at`
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    /// Messages written by the learner, in order
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_user())
    }

    /// Whether the conversation language can be analyzed
    #[must_use]
    pub fn is_japanese(&self) -> bool {
        self.language.eq_ignore_ascii_case(languages::JAPANESE)
    }

    /// Store the summary of an evaluation on the conversation record
    pub fn record_evaluation(&mut self, total: f64, estimation: JlptLevel) {
        self.overall_total = Some(total);
        self.jlpt_estimation = Some(estimation);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_deserializes_from_text_or_number() -> Result<(), serde_json::Error> {
        let json = r#"[
            {"role":"user","content":"a","timestamp":"2025-01-01T00:00:00Z","response_latency_ms":"4500"},
            {"role":"user","content":"b","timestamp":"2025-01-01T00:00:00Z","response_latency_ms":4500},
            {"role":"assistant","content":"c","timestamp":"2025-01-01T00:00:00Z"}
        ]"#;
        let messages: Vec<Message> = serde_json::from_str(json)?;
        assert_eq!(
            messages[0].response_latency_ms,
            Some(ScoreValue::Text("4500".into()))
        );
        assert_eq!(
            messages[1].response_latency_ms,
            Some(ScoreValue::Number(4500.0))
        );
        assert!(messages[2].response_latency_ms.is_none());
        Ok(())
    }

    #[test]
    fn test_user_messages_skip_assistant_turns() {
        let mut conversation = Conversation::new(
            "c1",
            "u1",
            "旅行",
            JlptLevel::N4,
            ConversationMode::FreeConversation,
        );
        conversation.push_message(Message::user("こんにちは"));
        conversation.push_message(Message::assistant("こんにちは！"));
        conversation.push_message(Message::user("元気です"));
        assert_eq!(conversation.user_messages().count(), 2);
        assert!(conversation.is_japanese());
    }
}
