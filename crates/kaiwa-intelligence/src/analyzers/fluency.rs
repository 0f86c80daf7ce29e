// ABOUTME: Fluency analyzer scoring response latency bands and penalizing unpunctuated run-on sentences
// ABOUTME: Latency arrives loosely typed and is coerced; absent or non-positive latency is neutral
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};
use tracing::debug;

use kaiwa_core::constants::scores::{SCORE_MAX, SCORE_MIN};
use kaiwa_core::models::ScoreValue;

use super::round1;
use super::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
use crate::coercion::try_coerce;
use crate::config::{FluencyConfig, IntelligenceConfig};
use crate::text::{content_length, split_sentences};

/// Result of fluency analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluencyAssessment {
    /// Score on the 0-100 scale
    pub score: f64,
    /// Coerced latency in seconds, when one was usable
    pub latency_seconds: Option<f64>,
    /// Whether an overlong sentence without 、 was found
    pub run_on_detected: bool,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// Set when no usable latency was available
    pub low_confidence: bool,
}

/// Latency and flow scorer
pub struct FluencyAnalyzer {
    config: FluencyConfig,
    neutral_score: f64,
}

impl FluencyAnalyzer {
    /// Build from configuration
    #[must_use]
    pub fn new(config: &IntelligenceConfig) -> Self {
        Self {
            config: config.fluency.clone(),
            neutral_score: config.scoring.neutral_score,
        }
    }

    /// Score a latency in seconds without looking at text
    #[must_use]
    pub fn score_latency_seconds(&self, seconds: f64) -> f64 {
        self.config.band_score(seconds)
    }

    /// Assess fluency from the message text and its response latency
    #[must_use]
    pub fn assess(&self, text: &str, latency_ms: Option<&ScoreValue>) -> FluencyAssessment {
        let Some(latency_ms) = try_coerce(latency_ms).filter(|ms| *ms > 0.0) else {
            return FluencyAssessment {
                score: self.neutral_score,
                latency_seconds: None,
                run_on_detected: false,
                suggestions: Vec::new(),
                low_confidence: true,
            };
        };

        let cfg = &self.config;
        let seconds = latency_ms / 1000.0;
        let mut score = cfg.band_score(seconds);
        let mut suggestions = Vec::new();

        let run_on_detected = split_sentences(text)
            .iter()
            .any(|s| s.chars().count() > cfg.run_on_chars && !s.contains('、'));
        if run_on_detected {
            score -= cfg.run_on_penalty;
            suggestions
                .push("Câu quá dài và không có dấu 、; hãy chia thành các câu ngắn hơn.".to_owned());
        }
        if seconds > cfg.slow_response_seconds {
            suggestions
                .push("Hãy cố gắng trả lời nhanh hơn để cải thiện độ trôi chảy.".to_owned());
        }
        let length = content_length(text);
        if length > 0 && seconds / length as f64 > cfg.slow_seconds_per_char {
            suggestions.push("Hãy luyện nói các câu ngắn trước.".to_owned());
        }

        let score = round1(score.clamp(SCORE_MIN, SCORE_MAX));
        debug!(score, latency_seconds = seconds, "Fluency analysis complete");

        FluencyAssessment {
            score,
            latency_seconds: Some(seconds),
            run_on_detected,
            suggestions,
            low_confidence: false,
        }
    }
}

impl MessageAnalyzer for FluencyAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Fluency
    }

    fn analyze(&self, text: &str, context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Fluency(self.assess(text, context.response_latency_ms.as_ref()))
    }
}
