// ABOUTME: Versioned analysis configuration aggregating every analyzer, estimator, and scoring setting
// ABOUTME: Provides defaults, JSON loading, environment overrides, and validation before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Intelligence Configuration Module
//!
//! Configuration is an explicit value: build it once at startup (defaults, a JSON
//! document, environment overrides), validate it, and hand it to
//! [`AnalysisEngine`](crate::engine::AnalysisEngine) behind an `Arc`. The `version`
//! string is copied into every `ConversationAnalysis` so stored scores can be traced
//! back to the settings that produced them.
//!
//! # Module Structure
//!
//! - `scoring` - Dimension weights, neutral score, weakness threshold
//! - `rules` - Grammar, particle, and correction rule tables
//! - `keigo` - Register markers and penalties
//! - `vocabulary` - Vocabulary scoring curve and indicator words
//! - `fluency` - Latency bands and run-on limits
//! - `jlpt` - Level estimation patterns and thresholds
//! - `recommendation` - Course recommendation reasons and fallback size

pub mod error;
pub mod fluency;
pub mod jlpt;
pub mod keigo;
pub mod recommendation;
pub mod rules;
pub mod scoring;
pub mod vocabulary;

pub use error::ConfigError;
pub use fluency::{FluencyConfig, LatencyBand};
pub use jlpt::{JlptConfig, SIGNAL_MAX};
pub use keigo::{KeigoConfig, KeigoMarkers, KeigoScoring};
pub use recommendation::RecommendationConfig;
pub use rules::{CorrectionConfig, CorrectionRule, PatternRule, RuleTableConfig};
pub use scoring::{ScoringConfig, ScoringWeights};
pub use vocabulary::VocabularyConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Version tag of the built-in defaults
pub const DEFAULT_CONFIG_VERSION: &str = "2025.1";

/// Language input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Only language code accepted for analysis
    pub supported_language: String,
    /// Minimum share of kana and kanji among letters for text to count as Japanese
    pub min_japanese_ratio: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            supported_language: "ja".into(),
            min_japanese_ratio: 0.3,
        }
    }
}

/// Main intelligence configuration container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    /// Version carried into every analysis record
    pub version: String,
    /// Conversation-level aggregation
    pub scoring: ScoringConfig,
    /// Grammar rule table
    pub grammar: RuleTableConfig,
    /// Particle rule table
    pub particle: RuleTableConfig,
    /// Keigo analysis
    pub keigo: KeigoConfig,
    /// Vocabulary analysis
    pub vocabulary: VocabularyConfig,
    /// Fluency analysis
    pub fluency: FluencyConfig,
    /// JLPT level estimation
    pub jlpt: JlptConfig,
    /// Sentence correction rewrites
    pub correction: CorrectionConfig,
    /// Course recommendations
    pub recommendation: RecommendationConfig,
    /// Input language settings
    pub language: LanguageConfig,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.into(),
            scoring: ScoringConfig::default(),
            grammar: RuleTableConfig::grammar_defaults(),
            particle: RuleTableConfig::particle_defaults(),
            keigo: KeigoConfig::default(),
            vocabulary: VocabularyConfig::default(),
            fluency: FluencyConfig::default(),
            jlpt: JlptConfig::default(),
            correction: CorrectionConfig::default(),
            recommendation: RecommendationConfig::default(),
            language: LanguageConfig::default(),
        }
    }
}

impl IntelligenceConfig {
    /// Load defaults, apply environment overrides, and validate
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document, apply environment overrides, and validate
    ///
    /// Missing sections fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed, an override is invalid, or validation fails
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = config.apply_env_overrides()?;
        config.validate()?;
        debug!(version = %config.version, "Loaded intelligence configuration from JSON");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingField("version"));
        }

        self.validate_scoring()?;
        Self::validate_rule_table(&self.grammar)?;
        Self::validate_rule_table(&self.particle)?;
        self.validate_fluency()?;
        self.validate_jlpt()?;

        let vocab = &self.vocabulary;
        if vocab.kanji_saturation <= 0.0 || vocab.kanji_saturation > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "vocabulary kanji_saturation must be in (0, 1]",
            ));
        }
        if vocab.sparse_kanji_ratio >= vocab.dense_kanji_ratio {
            return Err(ConfigError::InvalidRange(
                "vocabulary sparse_kanji_ratio must be < dense_kanji_ratio",
            ));
        }

        let ratio = self.language.min_japanese_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::ValueOutOfRange(
                "language min_japanese_ratio must be between 0 and 1",
            ));
        }
        if self.language.supported_language.trim().is_empty() {
            return Err(ConfigError::MissingField("language.supported_language"));
        }
        if self.correction.fallback_explanation_vi.trim().is_empty() {
            return Err(ConfigError::MissingField("correction.fallback_explanation_vi"));
        }
        if self.recommendation.weakness_reason.trim().is_empty() {
            return Err(ConfigError::MissingField("recommendation.weakness_reason"));
        }
        if self.recommendation.fallback_reason.trim().is_empty() {
            return Err(ConfigError::MissingField("recommendation.fallback_reason"));
        }

        Ok(())
    }

    fn validate_scoring(&self) -> Result<(), ConfigError> {
        Self::validate_weights(&self.scoring.weights)?;
        for weights in self.scoring.mode_weights.values() {
            Self::validate_weights(weights)?;
        }
        if !(0.0..=100.0).contains(&self.scoring.neutral_score) {
            return Err(ConfigError::ValueOutOfRange(
                "neutral_score must be between 0 and 100",
            ));
        }
        if !(0.0..=100.0).contains(&self.scoring.weakness_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "weakness_threshold must be between 0 and 100",
            ));
        }
        Ok(())
    }

    fn validate_weights(weights: &ScoringWeights) -> Result<(), ConfigError> {
        let all = [
            weights.grammar,
            weights.vocabulary,
            weights.fluency,
            weights.naturalness,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "Scoring weights must be finite and non-negative",
            ));
        }
        if (weights.sum() - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Scoring weights must sum to 1.0",
            ));
        }
        Ok(())
    }

    fn validate_rule_table(table: &RuleTableConfig) -> Result<(), ConfigError> {
        if table.ceiling <= 0.0 || table.ceiling > 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Rule table ceiling must be in (0, 100]",
            ));
        }
        if table.penalty_per_error < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Rule table penalty_per_error must be non-negative",
            ));
        }
        if table.rules.iter().any(|rule| rule.description.trim().is_empty()) {
            return Err(ConfigError::MissingField("rule description"));
        }
        Ok(())
    }

    fn validate_fluency(&self) -> Result<(), ConfigError> {
        let bands = &self.fluency.bands;
        if bands.is_empty() {
            return Err(ConfigError::MissingField("fluency.bands"));
        }
        if bands
            .windows(2)
            .any(|pair| pair[0].below_seconds >= pair[1].below_seconds)
        {
            return Err(ConfigError::InvalidRange(
                "Fluency bands must be in ascending order of latency",
            ));
        }
        if bands
            .iter()
            .any(|band| !(0.0..=100.0).contains(&band.score))
            || !(0.0..=100.0).contains(&self.fluency.slowest_score)
        {
            return Err(ConfigError::ValueOutOfRange(
                "Fluency band scores must be between 0 and 100",
            ));
        }
        Ok(())
    }

    fn validate_jlpt(&self) -> Result<(), ConfigError> {
        let jlpt = &self.jlpt;
        if [jlpt.grammar_weight, jlpt.kanji_weight, jlpt.vocabulary_weight]
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "JLPT signal weights must be finite and non-negative",
            ));
        }
        let weight_sum = jlpt.grammar_weight + jlpt.kanji_weight + jlpt.vocabulary_weight;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights("JLPT signal weights must sum to 1.0"));
        }
        if jlpt.thresholds.windows(2).any(|pair| pair[0] >= pair[1])
            || jlpt.thresholds[0] <= 0.0
            || jlpt.thresholds[3] >= SIGNAL_MAX
        {
            return Err(ConfigError::InvalidRange(
                "JLPT thresholds must be strictly ascending inside (0, 5)",
            ));
        }
        if jlpt.kanji_reference_ratios[0] <= 0.0
            || jlpt
                .kanji_reference_ratios
                .windows(2)
                .any(|pair| pair[0] >= pair[1])
        {
            return Err(ConfigError::InvalidRange(
                "JLPT kanji reference ratios must be positive and strictly ascending",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable cannot be parsed
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        let weights = &mut self.scoring.weights;
        Self::apply_env_var("KAIWA_GRAMMAR_WEIGHT", &mut weights.grammar)?;
        Self::apply_env_var("KAIWA_VOCABULARY_WEIGHT", &mut weights.vocabulary)?;
        Self::apply_env_var("KAIWA_FLUENCY_WEIGHT", &mut weights.fluency)?;
        Self::apply_env_var("KAIWA_NATURALNESS_WEIGHT", &mut weights.naturalness)?;

        Self::apply_env_var("KAIWA_NEUTRAL_SCORE", &mut self.scoring.neutral_score)?;
        Self::apply_env_var(
            "KAIWA_WEAKNESS_THRESHOLD",
            &mut self.scoring.weakness_threshold,
        )?;
        Self::apply_env_var("KAIWA_CONFIG_VERSION", &mut self.version)?;

        Ok(self)
    }
}
