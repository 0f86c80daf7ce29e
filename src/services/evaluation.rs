// ABOUTME: Evaluation service tying the analysis engine to storage and the optional reply generator
// ABOUTME: Message analysis, conversation evaluation, sentence correction, and chat turns with fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Evaluation Service
//!
//! Every provider call runs under the configured timeout. A timeout, an error, or
//! an unusable answer never fails the request: the heuristic result is returned
//! and the response says it is degraded.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info};

use kaiwa_core::models::{
    ConversationAnalysis, ConversationMode, Course, JlptLevel, Message, MessageAnalysis,
    Recommendation, ScoreValue,
};
use kaiwa_intelligence::analyzers::AnalysisContext;
use kaiwa_intelligence::correction::Correction;
use kaiwa_intelligence::engine::AnalysisEngine;

use crate::constants::operations;
use crate::database::ConversationStore;
use crate::errors::{AppError, AppResult};
use crate::llm::{
    build_correction_prompt, build_system_prompt, parse_provider_correction, ChatMessage,
    ReplyGenerator, ReplyRequest, CHAT_TEMPERATURE, DEFAULT_MAX_TOKENS, STRUCTURED_TEMPERATURE,
};
use crate::logging::AppLogger;

/// Single-message analysis request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeMessageRequest {
    /// Learner text
    pub text: String,
    /// Level the learner is aiming for
    #[serde(default)]
    pub target_level: Option<JlptLevel>,
    /// Practice mode
    #[serde(default)]
    pub mode: Option<ConversationMode>,
    /// Response latency in milliseconds
    #[serde(default)]
    pub response_latency_ms: Option<ScoreValue>,
}

impl AnalyzeMessageRequest {
    /// Request for a bare text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn context(&self) -> AnalysisContext {
        AnalysisContext {
            target_level: self.target_level,
            mode: self.mode,
            response_latency_ms: self.response_latency_ms.clone(),
        }
    }
}

/// Where a correction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionSource {
    /// Rule-based rewrite
    Heuristic,
    /// Reply generator
    Provider,
}

/// Correction result with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionOutcome {
    /// The correction
    #[serde(flatten)]
    pub correction: Correction,
    /// Which path produced it
    pub source: CorrectionSource,
    /// Set when a configured generator failed and the heuristic was used instead
    pub degraded: bool,
}

/// Result of one chat turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Analysis of the learner's message
    pub analysis: MessageAnalysis,
    /// Partner reply, when one could be generated
    pub reply: Option<String>,
    /// Set when no reply could be generated
    pub degraded: bool,
}

/// Orchestrates analysis, storage, and reply generation
#[derive(Clone)]
pub struct EvaluationService {
    engine: Arc<AnalysisEngine>,
    store: Arc<dyn ConversationStore>,
    generator: Option<Arc<dyn ReplyGenerator>>,
    request_timeout: Duration,
}

impl EvaluationService {
    /// Create a service without a reply generator
    #[must_use]
    pub fn new(
        engine: Arc<AnalysisEngine>,
        store: Arc<dyn ConversationStore>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            store,
            generator: None,
            request_timeout,
        }
    }

    /// Attach a reply generator
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn ReplyGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Analysis engine in use
    #[must_use]
    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    /// Analyze a single message
    ///
    /// # Errors
    ///
    /// Returns an error for blank or non-Japanese text
    pub fn analyze_message(&self, request: &AnalyzeMessageRequest) -> AppResult<MessageAnalysis> {
        self.engine.ensure_japanese(&request.text)?;
        Ok(self
            .engine
            .analyze_message(&request.text, &request.context()))
    }

    /// Evaluate a stored conversation and append the analysis
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown conversation, the engine's input errors, and
    /// storage errors from the append
    pub async fn evaluate(
        &self,
        conversation_id: &str,
        target: JlptLevel,
    ) -> AppResult<ConversationAnalysis> {
        let started = Instant::now();
        let conversation = self
            .store
            .get_conversation(conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Conversation").with_resource_id(conversation_id)
            })?;

        let engine = Arc::clone(&self.engine);
        let analysis =
            task::spawn_blocking(move || engine.evaluate_conversation(&conversation, target))
                .await
                .map_err(|e| AppError::internal("Evaluation task failed").with_source(e))??;

        self.store.append_analysis(analysis.clone()).await?;
        self.store
            .record_evaluation(conversation_id, analysis.total, analysis.jlpt_estimation)
            .await?;

        AppLogger::log_evaluation(
            conversation_id,
            analysis.jlpt_estimation.as_str(),
            analysis.total,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(analysis)
    }

    /// Recommend catalog courses from the latest evaluation of a conversation
    ///
    /// # Errors
    ///
    /// Returns not-found when the conversation has never been evaluated, and
    /// storage errors
    pub async fn recommend_courses(
        &self,
        conversation_id: &str,
        courses: &[Course],
    ) -> AppResult<Vec<Recommendation>> {
        let analysis = self
            .store
            .latest_analysis(conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Conversation analysis").with_resource_id(conversation_id)
            })?;
        let recommendations = self.engine.recommend_courses(&analysis, courses);
        info!(
            conversation_id,
            recommendations = recommendations.len(),
            "Courses recommended"
        );
        Ok(recommendations)
    }

    /// Correct a sentence, preferring the reply generator when it answers in time
    ///
    /// # Errors
    ///
    /// Returns an error for blank or non-Japanese text
    pub async fn correct_sentence(&self, sentence: &str) -> AppResult<CorrectionOutcome> {
        self.engine.ensure_japanese(sentence)?;
        let heuristic = self.engine.correct_sentence(sentence);

        if self.generator.is_none() {
            return Ok(CorrectionOutcome {
                correction: heuristic,
                source: CorrectionSource::Heuristic,
                degraded: false,
            });
        }

        let request = ReplyRequest::new(vec![ChatMessage::user(build_correction_prompt(
            sentence.trim(),
        ))])
        .with_temperature(STRUCTURED_TEMPERATURE)
        .with_max_tokens(DEFAULT_MAX_TOKENS);

        let provider = self
            .generate(operations::SENTENCE_CORRECTION, &request)
            .await
            .and_then(|content| match parse_provider_correction(&content) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    self.log_fallback(operations::SENTENCE_CORRECTION, &e.to_string());
                    None
                }
            });

        Ok(match provider {
            Some(parsed) => CorrectionOutcome {
                correction: Correction {
                    original: sentence.to_owned(),
                    corrected: parsed.corrected,
                    explanation_vi: parsed.explanation_vi,
                },
                source: CorrectionSource::Provider,
                degraded: false,
            },
            None => CorrectionOutcome {
                correction: heuristic,
                source: CorrectionSource::Heuristic,
                degraded: true,
            },
        })
    }

    /// Record a learner message, analyze it, and ask for a partner reply
    ///
    /// The analysis is stored with the message before the generator is called, so a
    /// provider failure never loses it.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown conversation, unsupported-language for a
    /// non-Japanese conversation or message, and storage errors
    pub async fn chat(
        &self,
        conversation_id: &str,
        content: &str,
        response_latency_ms: Option<ScoreValue>,
    ) -> AppResult<ChatTurn> {
        let conversation = self
            .store
            .get_conversation(conversation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Conversation").with_resource_id(conversation_id)
            })?;
        if !conversation.is_japanese() {
            return Err(AppError::unsupported_language("Language not supported yet")
                .with_resource_id(conversation_id));
        }
        self.engine.ensure_japanese(content)?;

        let context = AnalysisContext {
            target_level: Some(conversation.level),
            mode: Some(conversation.mode),
            response_latency_ms: response_latency_ms.clone(),
        };
        let analysis = self.engine.analyze_message(content, &context);

        let mut message = Message::user(content).with_analysis(analysis.clone());
        message.response_latency_ms = response_latency_ms;
        self.store.append_message(conversation_id, message).await?;

        let mut history = vec![ChatMessage::system(build_system_prompt(
            &conversation.topic,
            conversation.level,
        ))];
        history.extend(conversation.messages.iter().map(ChatMessage::from));
        history.push(ChatMessage::user(content));

        let request = ReplyRequest::new(history)
            .with_temperature(CHAT_TEMPERATURE)
            .with_max_tokens(DEFAULT_MAX_TOKENS);
        let reply = self.generate(operations::CHAT_REPLY, &request).await;

        if let Some(text) = &reply {
            self.store
                .append_message(conversation_id, Message::assistant(text.clone()))
                .await?;
        }

        info!(
            conversation_id,
            replied = reply.is_some(),
            low_confidence = analysis.low_confidence,
            "Chat turn processed"
        );
        Ok(ChatTurn {
            analysis,
            degraded: reply.is_none(),
            reply,
        })
    }

    /// Call the generator under the timeout, `None` on any failure
    async fn generate(&self, operation: &str, request: &ReplyRequest) -> Option<String> {
        let Some(generator) = &self.generator else {
            debug!(operation, "No reply generator configured");
            return None;
        };

        match timeout(self.request_timeout, generator.complete(request)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text.trim().to_owned()),
            Ok(Ok(_)) => {
                self.log_fallback(operation, "empty response");
                None
            }
            Ok(Err(e)) => {
                self.log_fallback(operation, &e.to_string());
                None
            }
            Err(_) => {
                self.log_fallback(
                    operation,
                    &format!("timed out after {}ms", self.request_timeout.as_millis()),
                );
                None
            }
        }
    }

    fn log_fallback(&self, operation: &str, reason: &str) {
        let provider = self.generator.as_ref().map_or("none", |g| g.name());
        AppLogger::log_provider_fallback(operation, provider, reason);
    }
}
