// ABOUTME: Conversation-level score aggregation over analyzed learner messages
// ABOUTME: Computes dimension means, weighted total, common mistakes, weaknesses, and keigo usage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Scoring Service
//!
//! Each dimension is the mean of the coerced per-message values that actually
//! carried a signal. Messages without a value are left out of the mean rather than
//! counted as zero, and a dimension with no contributing message falls back to the
//! configured neutral score. Fluency additionally falls back to the mean response
//! latency mapped through the latency bands.

use std::collections::HashMap;

use kaiwa_core::constants::scores::{SCORE_MAX, SCORE_MIN};
use kaiwa_core::models::{
    AnalysisErrors, AnalysisScores, ConversationMode, KeigoLevel, KeigoUsage, Message,
    MessageAnalysis, ScoreDimension,
};

use crate::analyzers::round1;
use crate::coercion::try_coerce;
use crate::config::{FluencyConfig, IntelligenceConfig, ScoringConfig};

/// Aggregates per-message analyses into conversation scores
#[derive(Debug, Clone)]
pub struct ScoringService {
    config: ScoringConfig,
    fluency: FluencyConfig,
}

impl ScoringService {
    /// Build from scoring and fluency settings
    #[must_use]
    pub const fn new(config: ScoringConfig, fluency: FluencyConfig) -> Self {
        Self { config, fluency }
    }

    /// Build from the full configuration
    #[must_use]
    pub fn from_config(config: &IntelligenceConfig) -> Self {
        Self::new(config.scoring.clone(), config.fluency.clone())
    }

    /// Scoring settings in use
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn analyzed(messages: &[Message]) -> impl Iterator<Item = (&Message, &MessageAnalysis)> {
        messages
            .iter()
            .filter(|m| m.is_user())
            .filter_map(|m| m.analysis.as_ref().map(|a| (m, a)))
    }

    /// Mean of the contributing values for one dimension, `None` without any
    #[must_use]
    pub fn dimension_mean(messages: &[Message], dimension: ScoreDimension) -> Option<f64> {
        let values: Vec<f64> = Self::analyzed(messages)
            .filter_map(|(_, analysis)| try_coerce(analysis.scores.get(dimension)))
            .map(|v| v.clamp(SCORE_MIN, SCORE_MAX))
            .collect();
        mean(&values)
    }

    /// Fluency from the mean positive response latency, `None` without any
    #[must_use]
    pub fn latency_fluency(&self, messages: &[Message]) -> Option<f64> {
        let latencies: Vec<f64> = messages
            .iter()
            .filter(|m| m.is_user())
            .filter_map(|m| try_coerce(m.response_latency_ms.as_ref()))
            .filter(|ms| *ms > 0.0)
            .collect();
        mean(&latencies).map(|ms| self.fluency.band_score(ms / 1000.0))
    }

    /// Aggregate the four dimension scores
    #[must_use]
    pub fn aggregate_scores(&self, messages: &[Message]) -> AnalysisScores {
        let neutral = self.config.neutral_score;
        let pick = |dimension| {
            let value = Self::dimension_mean(messages, dimension).unwrap_or(neutral);
            round1(value.clamp(SCORE_MIN, SCORE_MAX))
        };
        let fluency = Self::dimension_mean(messages, ScoreDimension::Fluency)
            .or_else(|| self.latency_fluency(messages))
            .unwrap_or(neutral);

        AnalysisScores {
            grammar: pick(ScoreDimension::Grammar),
            vocabulary: pick(ScoreDimension::Vocabulary),
            fluency: round1(fluency.clamp(SCORE_MIN, SCORE_MAX)),
            naturalness: pick(ScoreDimension::Naturalness),
        }
    }

    /// Weighted total of the four dimensions using the weights for `mode`
    #[must_use]
    pub fn overall_total(&self, scores: &AnalysisScores, mode: ConversationMode) -> f64 {
        let weights = self.config.weights_for(mode);
        let total: f64 = ScoreDimension::ALL
            .iter()
            .map(|d| scores.get(*d) * weights.get(*d))
            .sum();
        round1(total.clamp(SCORE_MIN, SCORE_MAX))
    }

    /// Dimensions strictly below the weakness threshold, in reporting order
    #[must_use]
    pub fn identify_weaknesses(&self, scores: &AnalysisScores) -> Vec<ScoreDimension> {
        ScoreDimension::ALL
            .into_iter()
            .filter(|d| scores.get(*d) < self.config.weakness_threshold)
            .collect()
    }

    /// Distinct grammar and particle errors in first-seen order
    #[must_use]
    pub fn collect_errors(messages: &[Message]) -> AnalysisErrors {
        let mut errors = AnalysisErrors::default();
        for (_, analysis) in Self::analyzed(messages) {
            push_distinct(&mut errors.grammar, &analysis.grammar_errors);
            push_distinct(&mut errors.particles, &analysis.particle_errors);
        }
        errors
    }

    /// Most frequent errors, by descending frequency then first occurrence
    #[must_use]
    pub fn common_mistakes(&self, messages: &[Message]) -> Vec<String> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, analysis) in Self::analyzed(messages) {
            for error in analysis.grammar_errors.iter().chain(&analysis.particle_errors) {
                let count = counts.entry(error.as_str()).or_insert(0);
                if *count == 0 {
                    order.push(error.as_str());
                }
                *count += 1;
            }
        }
        // stable sort keeps first-occurrence order among equal counts
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order
            .into_iter()
            .take(self.config.common_mistakes_limit)
            .map(str::to_owned)
            .collect()
    }

    /// Summary of keigo scores and registers across messages
    #[must_use]
    pub fn keigo_usage(messages: &[Message]) -> KeigoUsage {
        let mut scores = Vec::new();
        let mut levels: HashMap<KeigoLevel, usize> = HashMap::new();
        let mut suggestions: Vec<String> = Vec::new();

        for (_, analysis) in Self::analyzed(messages) {
            if let Some(score) = analysis.keigo_score.filter(|s| s.is_finite()) {
                scores.push(score);
            }
            if let Some(level) = analysis.keigo_level.filter(|l| *l != KeigoLevel::None) {
                *levels.entry(level).or_insert(0) += 1;
            }
            push_distinct(&mut suggestions, &analysis.keigo_suggestions);
        }

        // ties go to the stronger register
        let dominant_level = levels
            .into_iter()
            .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then(la.cmp(lb)))
            .map(|(level, _)| level);

        KeigoUsage {
            average_score: mean(&scores).map(round1),
            scored_messages: scores.len(),
            dominant_level,
            suggestions,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn push_distinct(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
