// ABOUTME: Per-message and per-conversation analysis records produced by the intelligence crate
// ABOUTME: Scores are 0-100 per dimension; keigo scores stay on their own 0-10 scale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::level::JlptLevel;
use super::score_value::ScoreValue;

/// One of the four scored dimensions of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDimension {
    /// Grammatical correctness
    Grammar,
    /// Vocabulary range and level
    Vocabulary,
    /// Response speed and flow
    Fluency,
    /// Particle usage and register
    Naturalness,
}

impl ScoreDimension {
    /// All dimensions in reporting order
    pub const ALL: [Self; 4] = [
        Self::Grammar,
        Self::Vocabulary,
        Self::Fluency,
        Self::Naturalness,
    ];

    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Vocabulary => "vocabulary",
            Self::Fluency => "fluency",
            Self::Naturalness => "naturalness",
        }
    }
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register of honorific speech detected in an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeigoLevel {
    /// Plain speech
    None,
    /// Polite です/ます speech
    Teineigo,
    /// Humble speech
    Kenjougo,
    /// Respectful speech
    Sonkeigo,
}

/// Component scores attached to a single message
///
/// Values stay loosely typed because they may come from a provider; the
/// scoring service coerces them when aggregating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Grammar score
    #[serde(default)]
    pub grammar: Option<ScoreValue>,
    /// Vocabulary score
    #[serde(default)]
    pub vocabulary: Option<ScoreValue>,
    /// Fluency score
    #[serde(default)]
    pub fluency: Option<ScoreValue>,
    /// Naturalness score
    #[serde(default)]
    pub naturalness: Option<ScoreValue>,
}

impl ComponentScores {
    /// Raw value for a dimension
    #[must_use]
    pub const fn get(&self, dimension: ScoreDimension) -> Option<&ScoreValue> {
        match dimension {
            ScoreDimension::Grammar => self.grammar.as_ref(),
            ScoreDimension::Vocabulary => self.vocabulary.as_ref(),
            ScoreDimension::Fluency => self.fluency.as_ref(),
            ScoreDimension::Naturalness => self.naturalness.as_ref(),
        }
    }
}

/// Analysis of a single learner message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageAnalysis {
    /// Grammar error descriptions
    #[serde(default)]
    pub grammar_errors: Vec<String>,
    /// Particle error descriptions
    #[serde(default)]
    pub particle_errors: Vec<String>,
    /// Keigo score on the 0-10 scale; absent for empty text
    #[serde(default)]
    pub keigo_score: Option<f64>,
    /// Keigo improvement suggestions
    #[serde(default)]
    pub keigo_suggestions: Vec<String>,
    /// Strongest honorific register detected in the message
    #[serde(default)]
    pub keigo_level: Option<KeigoLevel>,
    /// Level estimated from this message alone
    #[serde(default)]
    pub jlpt_estimation: Option<JlptLevel>,
    /// Component scores
    #[serde(default)]
    pub scores: ComponentScores,
    /// Set when any analyzer fell back to a neutral result
    #[serde(default)]
    pub low_confidence: bool,
}

/// Aggregated 0-100 scores for a conversation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScores {
    /// Grammar score
    pub grammar: f64,
    /// Vocabulary score
    pub vocabulary: f64,
    /// Fluency score
    pub fluency: f64,
    /// Naturalness score
    pub naturalness: f64,
}

impl AnalysisScores {
    /// Score for a dimension
    #[must_use]
    pub const fn get(&self, dimension: ScoreDimension) -> f64 {
        match dimension {
            ScoreDimension::Grammar => self.grammar,
            ScoreDimension::Vocabulary => self.vocabulary,
            ScoreDimension::Fluency => self.fluency,
            ScoreDimension::Naturalness => self.naturalness,
        }
    }
}

/// Errors collected over a conversation, in message order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisErrors {
    /// Grammar errors
    pub grammar: Vec<String>,
    /// Particle errors
    pub particles: Vec<String>,
}

/// Summary of honorific usage over a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeigoUsage {
    /// Mean keigo score over messages that produced one
    pub average_score: Option<f64>,
    /// Messages with a keigo score
    pub scored_messages: usize,
    /// Most frequent register across the conversation
    pub dominant_level: Option<KeigoLevel>,
    /// Distinct suggestions in first-seen order
    pub suggestions: Vec<String>,
}

/// Full evaluation of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    /// Record identifier
    pub id: Uuid,
    /// Evaluated conversation
    pub conversation_id: String,
    /// Owner of the conversation
    pub user_id: String,
    /// Estimated JLPT level
    pub jlpt_estimation: JlptLevel,
    /// Confidence in the estimate, in [0, 1]
    pub jlpt_confidence: f64,
    /// Whether the estimate is exactly the conversation's target level
    pub matches_target: bool,
    /// Whether the estimate is at or above the target level
    #[serde(default)]
    pub reaches_target: bool,
    /// Aggregated scores
    pub scores: AnalysisScores,
    /// Weighted total in [0, 100]
    pub total: f64,
    /// Collected errors
    pub errors: AnalysisErrors,
    /// Most frequent error descriptions
    pub common_mistakes: Vec<String>,
    /// Dimensions scoring below the weakness threshold
    pub weaknesses: Vec<ScoreDimension>,
    /// Honorific usage summary
    pub keigo_usage: KeigoUsage,
    /// Version of the configuration used to score
    pub config_version: String,
    /// Evaluation time
    pub created_at: DateTime<Utc>,
}
