// ABOUTME: Per-message analyzer contract, analysis context, and the typed outputs of each analyzer kind
// ABOUTME: Analyzers are pure and immutable after construction so one instance serves every thread
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Message Analyzers
//!
//! Every analyzer implements [`MessageAnalyzer`]: given a message text and its
//! [`AnalysisContext`], it returns an [`AnalyzerOutput`] tagged with its kind.
//! Analyzers never fail. Empty or non-Japanese input yields a neutral result with
//! `low_confidence` set, which the engine turns into "no signal" for scoring.
//!
//! ```rust,no_run
//! use kaiwa_intelligence::analyzers::{AnalysisContext, GrammarAnalyzer, MessageAnalyzer};
//! use kaiwa_intelligence::config::IntelligenceConfig;
//!
//! # fn main() -> Result<(), kaiwa_intelligence::config::ConfigError> {
//! let analyzer = GrammarAnalyzer::new(&IntelligenceConfig::default())?;
//! let output = analyzer.analyze("昨日、日本へ行きます。", &AnalysisContext::default());
//! # Ok(())
//! # }
//! ```

mod fluency;
mod grammar;
mod keigo;
mod particle;
mod rules;
mod vocabulary;

pub use fluency::{FluencyAnalyzer, FluencyAssessment};
pub use grammar::GrammarAnalyzer;
pub use keigo::{KeigoAnalyzer, KeigoAssessment, KeigoConsistency};
pub use particle::ParticleAnalyzer;
pub use rules::RuleFindings;
pub use vocabulary::{VocabularyAnalyzer, VocabularyAssessment};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use kaiwa_core::models::{ConversationMode, JlptLevel, ScoreValue};

use crate::config::ConfigError;

/// Analyzer kinds known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    /// Tense, conjugation, and construction errors
    Grammar,
    /// Particle misuse
    Particle,
    /// Honorific register
    Keigo,
    /// Vocabulary level and variety
    Vocabulary,
    /// Response speed and sentence flow
    Fluency,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grammar => "grammar",
            Self::Particle => "particle",
            Self::Keigo => "keigo",
            Self::Vocabulary => "vocabulary",
            Self::Fluency => "fluency",
        };
        f.write_str(name)
    }
}

/// Context a message is analyzed in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisContext {
    /// Level the learner is aiming for
    pub target_level: Option<JlptLevel>,
    /// Practice mode of the conversation
    pub mode: Option<ConversationMode>,
    /// Time the learner took to answer, in milliseconds
    pub response_latency_ms: Option<ScoreValue>,
}

impl AnalysisContext {
    /// Set the target level
    #[must_use]
    pub const fn with_target(mut self, level: JlptLevel) -> Self {
        self.target_level = Some(level);
        self
    }

    /// Set the conversation mode
    #[must_use]
    pub const fn with_mode(mut self, mode: ConversationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the response latency
    #[must_use]
    pub fn with_latency(mut self, latency_ms: impl Into<ScoreValue>) -> Self {
        self.response_latency_ms = Some(latency_ms.into());
        self
    }
}

/// Typed result of one analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalyzerOutput {
    /// Grammar findings
    Grammar(RuleFindings),
    /// Particle findings
    Particle(RuleFindings),
    /// Keigo assessment
    Keigo(KeigoAssessment),
    /// Vocabulary assessment
    Vocabulary(VocabularyAssessment),
    /// Fluency assessment
    Fluency(FluencyAssessment),
}

impl AnalyzerOutput {
    /// Kind of analyzer that produced this output
    #[must_use]
    pub const fn kind(&self) -> AnalyzerKind {
        match self {
            Self::Grammar(_) => AnalyzerKind::Grammar,
            Self::Particle(_) => AnalyzerKind::Particle,
            Self::Keigo(_) => AnalyzerKind::Keigo,
            Self::Vocabulary(_) => AnalyzerKind::Vocabulary,
            Self::Fluency(_) => AnalyzerKind::Fluency,
        }
    }

    /// Whether the analyzer fell back to a neutral result
    #[must_use]
    pub const fn is_low_confidence(&self) -> bool {
        match self {
            Self::Grammar(f) | Self::Particle(f) => f.low_confidence,
            Self::Keigo(k) => k.low_confidence,
            Self::Vocabulary(v) => v.low_confidence,
            Self::Fluency(f) => f.low_confidence,
        }
    }
}

/// Contract for a single-message analyzer
pub trait MessageAnalyzer: Send + Sync {
    /// Which kind of analysis this implementation performs
    fn kind(&self) -> AnalyzerKind;

    /// Analyze one message
    fn analyze(&self, text: &str, context: &AnalysisContext) -> AnalyzerOutput;
}

/// Compile a configured pattern, reporting the source on failure
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    })
}

/// Compile a list of configured patterns
pub(crate) fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns.iter().map(|p| compile_pattern(p)).collect()
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
