// ABOUTME: Analyzer registry and the analysis engine that turns messages and conversations into analyses
// ABOUTME: Built once from an immutable configuration and shared across threads behind an Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Analysis Engine
//!
//! [`AnalysisEngine`] compiles every pattern table once at construction. After
//! that it is read-only: `analyze_message` and `evaluate_conversation` take `&self`
//! and can run from any number of threads. Conversation evaluation works on an
//! owned snapshot of the learner's messages and analyzes them in parallel.

use chrono::Utc;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use kaiwa_core::constants::scores::{SCORE_MAX, SCORE_MIN};
use kaiwa_core::errors::{AppError, AppResult};
use kaiwa_core::models::{
    Conversation, ConversationAnalysis, Course, JlptLevel, Message, MessageAnalysis,
    Recommendation, ScoreValue,
};

use crate::analyzers::{
    round1, AnalysisContext, AnalyzerKind, AnalyzerOutput, FluencyAnalyzer, GrammarAnalyzer,
    KeigoAnalyzer, MessageAnalyzer, ParticleAnalyzer, VocabularyAnalyzer,
};
use crate::config::{ConfigError, IntelligenceConfig};
use crate::correction::{Correction, SentenceCorrector};
use crate::jlpt_estimator::{JlptEstimate, JlptEstimator};
use crate::recommendation::CourseRecommender;
use crate::scoring::ScoringService;
use crate::text::looks_japanese;

/// Registry of message analyzers
///
/// Holds at most one analyzer per kind; registering a kind again replaces it.
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn MessageAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    /// Registry with the five built-in analyzers
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a configured pattern does not compile
    pub fn standard(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(Box::new(GrammarAnalyzer::new(config)?));
        registry.register(Box::new(ParticleAnalyzer::new(config)?));
        registry.register(Box::new(KeigoAnalyzer::new(config)?));
        registry.register(Box::new(VocabularyAnalyzer::new(config)));
        registry.register(Box::new(FluencyAnalyzer::new(config)));
        Ok(registry)
    }

    /// Register an analyzer, replacing any analyzer of the same kind
    pub fn register(&mut self, analyzer: Box<dyn MessageAnalyzer>) {
        let kind = analyzer.kind();
        self.analyzers.retain(|existing| existing.kind() != kind);
        self.analyzers.push(analyzer);
    }

    /// Get the analyzer for a kind
    #[must_use]
    pub fn get(&self, kind: AnalyzerKind) -> Option<&dyn MessageAnalyzer> {
        self.analyzers
            .iter()
            .find(|a| a.kind() == kind)
            .map(AsRef::as_ref)
    }

    /// Kinds currently registered, in registration order
    #[must_use]
    pub fn kinds(&self) -> Vec<AnalyzerKind> {
        self.analyzers.iter().map(|a| a.kind()).collect()
    }

    /// Run every registered analyzer on a text
    #[must_use]
    pub fn run_all(&self, text: &str, context: &AnalysisContext) -> Vec<AnalyzerOutput> {
        self.analyzers
            .iter()
            .map(|a| a.analyze(text, context))
            .collect()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable analysis engine
pub struct AnalysisEngine {
    config: Arc<IntelligenceConfig>,
    registry: AnalyzerRegistry,
    estimator: JlptEstimator,
    scoring: ScoringService,
    corrector: SentenceCorrector,
    recommender: CourseRecommender,
}

impl AnalysisEngine {
    /// Validate the configuration and compile every pattern table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a pattern does not compile
    pub fn new(config: Arc<IntelligenceConfig>) -> Result<Self, ConfigError> {
        let registry = AnalyzerRegistry::standard(&config)?;
        Self::with_registry(config, registry)
    }

    /// Build with a caller-supplied analyzer registry
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a pattern does not compile
    pub fn with_registry(
        config: Arc<IntelligenceConfig>,
        registry: AnalyzerRegistry,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let estimator = JlptEstimator::new(&config)?;
        let corrector = SentenceCorrector::new(&config)?;
        let scoring = ScoringService::from_config(&config);
        let recommender = CourseRecommender::from_config(&config);
        info!(
            version = %config.version,
            analyzers = registry.kinds().len(),
            "Analysis engine initialized"
        );
        Ok(Self {
            config,
            registry,
            estimator,
            scoring,
            corrector,
            recommender,
        })
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Analyzer registry in use
    #[must_use]
    pub const fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    /// Scoring service in use
    #[must_use]
    pub const fn scoring(&self) -> &ScoringService {
        &self.scoring
    }

    /// Whether a text is Japanese enough to analyze
    #[must_use]
    pub fn is_japanese(&self, text: &str) -> bool {
        looks_japanese(text, self.config.language.min_japanese_ratio)
    }

    /// Reject text that is empty or not Japanese
    ///
    /// # Errors
    ///
    /// Returns a missing-field error for blank text and an unsupported-language error otherwise
    pub fn ensure_japanese(&self, text: &str) -> AppResult<()> {
        if text.trim().is_empty() {
            return Err(AppError::missing_field("message"));
        }
        if !self.is_japanese(text) {
            return Err(AppError::unsupported_language(
                "Only Japanese text can be analyzed",
            ));
        }
        Ok(())
    }

    /// Analyze one message
    ///
    /// Degraded analyzers contribute no component score and set `low_confidence`.
    #[must_use]
    pub fn analyze_message(&self, text: &str, context: &AnalysisContext) -> MessageAnalysis {
        let mut analysis = MessageAnalysis::default();
        let mut particle_score = None;
        let mut keigo_component = None;
        let mut vocabulary_score = None;

        for output in self.registry.run_all(text, context) {
            analysis.low_confidence |= output.is_low_confidence();
            match output {
                AnalyzerOutput::Grammar(findings) => {
                    if !findings.low_confidence {
                        analysis.scores.grammar = Some(ScoreValue::Number(findings.score));
                    }
                    analysis.grammar_errors = findings.errors;
                }
                AnalyzerOutput::Particle(findings) => {
                    if !findings.low_confidence {
                        particle_score = Some(findings.score);
                    }
                    analysis.particle_errors = findings.errors;
                }
                AnalyzerOutput::Keigo(keigo) => {
                    if keigo.has_markers() {
                        keigo_component = keigo.score.map(|s| s * 10.0);
                    }
                    if keigo.score.is_some() {
                        analysis.keigo_level = Some(keigo.dominant);
                    }
                    analysis.keigo_score = keigo.score;
                    analysis.keigo_suggestions = keigo.suggestions;
                }
                AnalyzerOutput::Vocabulary(vocabulary) => {
                    if !vocabulary.low_confidence {
                        vocabulary_score = Some(vocabulary.score);
                        analysis.scores.vocabulary = Some(ScoreValue::Number(vocabulary.score));
                    }
                }
                AnalyzerOutput::Fluency(fluency) => {
                    if !fluency.low_confidence {
                        analysis.scores.fluency = Some(ScoreValue::Number(fluency.score));
                    }
                }
            }
        }

        analysis.scores.naturalness = naturalness(particle_score, keigo_component)
            .map(|score| ScoreValue::Number(round1(score.clamp(SCORE_MIN, SCORE_MAX))));

        if self.is_japanese(text) {
            let vocabulary = vocabulary_score.unwrap_or(self.config.scoring.neutral_score);
            analysis.jlpt_estimation = Some(
                self.estimator
                    .estimate(text, vocabulary, context.target_level)
                    .level,
            );
        }

        debug!(
            grammar_errors = analysis.grammar_errors.len(),
            particle_errors = analysis.particle_errors.len(),
            low_confidence = analysis.low_confidence,
            "Message analyzed"
        );
        analysis
    }

    /// Estimate the JLPT level of a text
    #[must_use]
    pub fn estimate_level(&self, text: &str, target: Option<JlptLevel>) -> JlptEstimate {
        let context = AnalysisContext {
            target_level: target,
            ..AnalysisContext::default()
        };
        let vocabulary = self
            .registry
            .get(AnalyzerKind::Vocabulary)
            .and_then(|analyzer| match analyzer.analyze(text, &context) {
                AnalyzerOutput::Vocabulary(v) if !v.low_confidence => Some(v.score),
                _ => None,
            })
            .unwrap_or(self.config.scoring.neutral_score);
        self.estimator.estimate(text, vocabulary, target)
    }

    /// Correct a sentence with the heuristic rewrite rules
    #[must_use]
    pub fn correct_sentence(&self, sentence: &str) -> Correction {
        self.corrector.correct(sentence)
    }

    /// Catalog courses for the weaknesses of an evaluation
    #[must_use]
    pub fn recommend_courses(
        &self,
        analysis: &ConversationAnalysis,
        courses: &[Course],
    ) -> Vec<Recommendation> {
        self.recommender.recommend(&analysis.weaknesses, courses)
    }

    /// Fallback explanation for corrections
    #[must_use]
    pub fn correction_fallback(&self) -> &str {
        self.corrector.fallback_explanation()
    }

    /// Attach an analysis to every learner message that lacks one
    ///
    /// Analyses already present (for example from a reply provider) are kept as-is.
    #[must_use]
    pub fn annotate_messages(
        &self,
        conversation: &Conversation,
        target: JlptLevel,
    ) -> Vec<Message> {
        let snapshot: Vec<Message> = conversation.user_messages().cloned().collect();
        snapshot
            .into_par_iter()
            .map(|mut message| {
                if message.analysis.is_none() {
                    let context = AnalysisContext {
                        target_level: Some(target),
                        mode: Some(conversation.mode),
                        response_latency_ms: message.response_latency_ms.clone(),
                    };
                    message.analysis = Some(self.analyze_message(&message.content, &context));
                }
                message
            })
            .collect()
    }

    /// Evaluate a whole conversation against a target level
    ///
    /// # Errors
    ///
    /// Returns an unsupported-language error for non-Japanese conversations and an
    /// invalid-input error when the conversation has no learner messages
    pub fn evaluate_conversation(
        &self,
        conversation: &Conversation,
        target: JlptLevel,
    ) -> AppResult<ConversationAnalysis> {
        if !conversation
            .language
            .eq_ignore_ascii_case(&self.config.language.supported_language)
        {
            return Err(AppError::unsupported_language("Language not supported yet")
                .with_resource_id(conversation.id.clone()));
        }
        if conversation.user_messages().next().is_none() {
            return Err(AppError::invalid_input(
                "No user messages found in conversation",
            )
            .with_resource_id(conversation.id.clone()));
        }

        let messages = self.annotate_messages(conversation, target);
        let scores = self.scoring.aggregate_scores(&messages);
        let total = self.scoring.overall_total(&scores, conversation.mode);

        let joined: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        let estimate = self.estimate_level(&joined.join("\n"), Some(target));

        let analysis = ConversationAnalysis {
            id: Uuid::new_v4(),
            conversation_id: conversation.id.clone(),
            user_id: conversation.user_id.clone(),
            jlpt_estimation: estimate.level,
            jlpt_confidence: estimate.confidence,
            matches_target: estimate.matches_target.unwrap_or(false),
            reaches_target: estimate.reaches_target.unwrap_or(false),
            scores,
            total,
            errors: ScoringService::collect_errors(&messages),
            common_mistakes: self.scoring.common_mistakes(&messages),
            weaknesses: self.scoring.identify_weaknesses(&scores),
            keigo_usage: ScoringService::keigo_usage(&messages),
            config_version: self.config.version.clone(),
            created_at: Utc::now(),
        };

        info!(
            conversation_id = %analysis.conversation_id,
            level = %analysis.jlpt_estimation,
            total = analysis.total,
            messages = messages.len(),
            "Conversation evaluated"
        );
        Ok(analysis)
    }
}

/// Mean of the particle score and the keigo score scaled to 0-100, when present
fn naturalness(particle: Option<f64>, keigo: Option<f64>) -> Option<f64> {
    match (particle, keigo) {
        (Some(p), Some(k)) => Some((p + k) / 2.0),
        (Some(score), None) | (None, Some(score)) => Some(score),
        (None, None) => None,
    }
}
