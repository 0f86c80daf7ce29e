// ABOUTME: Vocabulary analyzer combining kanji density, lexical variety, and level indicator words
// ABOUTME: Maps the combined evidence onto a fixed 0-100 curve with target-level adjustments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use kaiwa_core::constants::scores::{SCORE_MAX, SCORE_MIN};
use kaiwa_core::models::JlptLevel;

use super::round1;
use super::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
use crate::config::{IntelligenceConfig, VocabularyConfig};
use crate::text::{kanji_ratio, lexical_chunks, looks_japanese};

/// Result of vocabulary analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyAssessment {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Share of kanji among content characters
    pub kanji_ratio: f64,
    /// Distinct kanji/katakana chunks over all chunks
    pub distinct_chunk_ratio: f64,
    /// Level-weighted indicator word hits before capping
    pub indicator_hits: f64,
    /// False when the vocabulary looks too advanced for a beginner target
    pub level_appropriate: bool,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// Set when the text was empty or not Japanese
    pub low_confidence: bool,
}

/// Heuristic vocabulary scorer
pub struct VocabularyAnalyzer {
    config: VocabularyConfig,
    indicators: Vec<(f64, String)>,
    neutral_score: f64,
    min_japanese_ratio: f64,
}

impl VocabularyAnalyzer {
    /// Build from configuration
    #[must_use]
    pub fn new(config: &IntelligenceConfig) -> Self {
        let indicators = config
            .vocabulary
            .indicators
            .iter()
            .flat_map(|(level, words)| {
                words
                    .iter()
                    .map(move |word| (f64::from(level.rank()), word.clone()))
            })
            .collect();
        Self {
            config: config.vocabulary.clone(),
            indicators,
            neutral_score: config.scoring.neutral_score,
            min_japanese_ratio: config.language.min_japanese_ratio,
        }
    }

    /// Assess vocabulary against an optional target level
    #[must_use]
    pub fn assess(&self, text: &str, target: Option<JlptLevel>) -> VocabularyAssessment {
        if !looks_japanese(text, self.min_japanese_ratio) {
            return VocabularyAssessment {
                score: self.neutral_score,
                kanji_ratio: 0.0,
                distinct_chunk_ratio: 0.0,
                indicator_hits: 0.0,
                level_appropriate: true,
                suggestions: Vec::new(),
                low_confidence: true,
            };
        }

        let cfg = &self.config;
        let ratio = kanji_ratio(text);
        let chunks = lexical_chunks(text);
        let distinct_chunk_ratio = if chunks.is_empty() {
            0.0
        } else {
            let distinct: HashSet<&str> = chunks.iter().copied().collect();
            distinct.len() as f64 / chunks.len() as f64
        };
        let indicator_hits: f64 = self
            .indicators
            .iter()
            .filter(|(_, word)| text.contains(word.as_str()))
            .map(|(weight, _)| weight)
            .sum();

        let mut score = cfg.base
            + cfg.kanji_weight * (ratio / cfg.kanji_saturation).min(1.0)
            + cfg.chunk_weight * distinct_chunk_ratio
            + indicator_hits.min(cfg.indicator_cap);

        let mut suggestions = Vec::new();
        let mut level_appropriate = true;
        if let Some(level) = target {
            if level.is_advanced() && ratio < cfg.sparse_kanji_ratio {
                score -= cfg.sparse_kanji_penalty;
                suggestions.push(format!(
                    "Ở trình độ {level}, hãy dùng nhiều kanji và từ Hán Nhật hơn."
                ));
            }
            if level.is_beginner() && ratio > cfg.dense_kanji_ratio {
                level_appropriate = false;
                suggestions.push(format!(
                    "Từ vựng có thể quá khó so với trình độ mục tiêu {level}."
                ));
            }
        }

        let score = round1(score.clamp(SCORE_MIN, SCORE_MAX));
        debug!(score, kanji_ratio = ratio, "Vocabulary analysis complete");

        VocabularyAssessment {
            score,
            kanji_ratio: ratio,
            distinct_chunk_ratio,
            indicator_hits,
            level_appropriate,
            suggestions,
            low_confidence: false,
        }
    }
}

impl MessageAnalyzer for VocabularyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Vocabulary
    }

    fn analyze(&self, text: &str, context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Vocabulary(self.assess(text, context.target_level))
    }
}
