// ABOUTME: Reply generator abstraction for pluggable text-completion providers
// ABOUTME: Defines chat message types, the async generator contract, and correction parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Reply Generator Interface
//!
//! The analysis core never depends on a text-completion provider. Services that
//! want conversational replies or provider-assisted corrections take an optional
//! [`ReplyGenerator`] and treat every failure as "no reply".
//!
//! ```rust,no_run
//! use kaiwa_coach::llm::{ChatMessage, ReplyGenerator, ReplyRequest};
//!
//! async fn example(generator: &dyn ReplyGenerator) {
//!     let request = ReplyRequest::new(vec![
//!         ChatMessage::system("あなたは日本語の先生です。"),
//!         ChatMessage::user("こんにちは"),
//!     ]);
//!     let reply = generator.complete(&request).await;
//! }
//! ```

/// Prompt templates
pub mod prompts;

pub use prompts::{build_correction_prompt, build_system_prompt, level_guidelines};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use kaiwa_core::models::{Message, MessageRole};

/// Default sampling temperature for conversation replies
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Sampling temperature for structured output such as corrections
pub const STRUCTURED_TEMPERATURE: f32 = 0.3;

/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Role of a message sent to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// System instruction message
    System,
    /// Learner message
    User,
    /// Partner reply
    Assistant,
}

impl ChatRole {
    /// String representation for provider APIs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message sent to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: ChatRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Create an assistant message
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::User => ChatRole::User,
            MessageRole::Assistant => ChatRole::Assistant,
        };
        Self::new(role, message.content.clone())
    }
}

/// Completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    /// Conversation messages, system prompt first
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl ReplyRequest {
    /// Create a new request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Text-completion provider contract
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Generate a completion for the request
    async fn complete(&self, request: &ReplyRequest) -> Result<String, AppError>;
}

/// Correction returned by a provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderCorrection {
    /// Corrected sentence
    pub corrected: String,
    /// Vietnamese explanation
    pub explanation_vi: String,
}

/// Parse a provider correction, accepting JSON wrapped in a markdown code fence
///
/// # Errors
///
/// Returns an external-service error when the content is not the expected JSON or
/// either field is blank
pub fn parse_provider_correction(content: &str) -> Result<ProviderCorrection, AppError> {
    let json = strip_code_fence(content);
    let parsed: ProviderCorrection = serde_json::from_str(json).map_err(|e| {
        AppError::external_service("reply_generator", "Correction is not valid JSON")
            .with_source(e)
    })?;
    if parsed.corrected.trim().is_empty() || parsed.explanation_vi.trim().is_empty() {
        return Err(AppError::external_service(
            "reply_generator",
            "Correction has an empty field",
        ));
    }
    Ok(parsed)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after = &trimmed[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    after.find("```").map_or(after, |end| &after[..end]).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_correction() -> Result<(), AppError> {
        let content = "```json\n{\"corrected\": \"行きたいので\", \"explanation_vi\": \"Dùng ので\"}\n```";
        let parsed = parse_provider_correction(content)?;
        assert_eq!(parsed.corrected, "行きたいので");
        Ok(())
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_provider_correction("Câu này đúng rồi").is_err());
        let blank = r#"{"corrected": "", "explanation_vi": "x"}"#;
        assert!(parse_provider_correction(blank).is_err());
    }
}
