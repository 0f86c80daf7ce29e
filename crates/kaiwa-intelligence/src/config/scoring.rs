// ABOUTME: Scoring configuration for conversation-level aggregation of per-message scores
// ABOUTME: Holds dimension weights, the neutral fallback score, and the weakness threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Scoring Configuration
//!
//! Weights combine the four dimension scores into the overall total. A practice
//! mode may carry its own weights; modes without an entry use the base weights.
//! The neutral score is used whenever a dimension has no contributing signal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kaiwa_core::models::{ConversationMode, ScoreDimension};

/// Scoring Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weights for the overall total
    pub weights: ScoringWeights,
    /// Weights replacing `weights` for specific practice modes
    #[serde(default)]
    pub mode_weights: BTreeMap<ConversationMode, ScoringWeights>,
    /// Score reported for a dimension with no signal
    pub neutral_score: f64,
    /// Dimensions strictly below this score are weaknesses
    pub weakness_threshold: f64,
    /// Maximum number of entries kept in `common_mistakes`
    pub common_mistakes_limit: usize,
}

impl ScoringConfig {
    /// Weights applied to a conversation in `mode`
    #[must_use]
    pub fn weights_for(&self, mode: ConversationMode) -> &ScoringWeights {
        self.mode_weights.get(&mode).unwrap_or(&self.weights)
    }
}

/// Per-dimension weights for the overall total
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Grammar weight
    pub grammar: f64,
    /// Vocabulary weight
    pub vocabulary: f64,
    /// Fluency weight
    pub fluency: f64,
    /// Naturalness weight
    pub naturalness: f64,
}

impl ScoringWeights {
    /// Weight for a dimension
    #[must_use]
    pub const fn get(&self, dimension: ScoreDimension) -> f64 {
        match dimension {
            ScoreDimension::Grammar => self.grammar,
            ScoreDimension::Vocabulary => self.vocabulary,
            ScoreDimension::Fluency => self.fluency,
            ScoreDimension::Naturalness => self.naturalness,
        }
    }

    /// Sum of all four weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.grammar + self.vocabulary + self.fluency + self.naturalness
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            mode_weights: BTreeMap::from([
                (
                    ConversationMode::JlptExam,
                    ScoringWeights {
                        grammar: 0.4,
                        vocabulary: 0.3,
                        fluency: 0.1,
                        naturalness: 0.2,
                    },
                ),
                (
                    ConversationMode::RolePlay,
                    ScoringWeights {
                        grammar: 0.25,
                        vocabulary: 0.25,
                        fluency: 0.2,
                        naturalness: 0.3,
                    },
                ),
            ]),
            neutral_score: 70.0,
            weakness_threshold: 70.0,
            common_mistakes_limit: 10,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            grammar: 0.3,
            vocabulary: 0.3,
            fluency: 0.2,
            naturalness: 0.2,
        }
    }
}
