// ABOUTME: JLPT level estimator combining grammar-pattern, kanji-density, and vocabulary signals
// ABOUTME: Maps the 0-5 signal onto N5..N1 bands and reports confidence as distance from band edges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # JLPT Level Estimation
//!
//! Three signals, each on `[0, 5]`:
//!
//! - **grammar**: level-weighted mean of the levels whose patterns appear,
//!   `Σ rank² / Σ rank` over matching patterns (0 with no hits)
//! - **kanji**: piecewise-linear interpolation of the kanji ratio between the
//!   configured reference ratios, so it never decreases as the ratio grows
//! - **vocabulary**: the 0-100 vocabulary score divided by 20
//!
//! The weighted sum is compared with four ascending thresholds. A signal exactly
//! on a threshold belongs to the lower level.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kaiwa_core::models::JlptLevel;

use crate::analyzers::compile_pattern;
use crate::config::{ConfigError, IntelligenceConfig, JlptConfig, SIGNAL_MAX};
use crate::text::{content_length, kanji_ratio, split_sentences};

/// Raw signals fed into the level bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JlptSignals {
    /// Level-weighted grammar signal in `[0, 5]`
    pub grammar_signal: f64,
    /// Share of kanji among content characters
    pub kanji_ratio: f64,
    /// Vocabulary score on the 0-100 scale
    pub vocabulary_score: f64,
}

/// Observable features behind an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JlptIndicators {
    /// Share of kanji among content characters
    pub kanji_ratio: f64,
    /// Matching grammar patterns per level
    pub grammar_hits: BTreeMap<JlptLevel, usize>,
    /// Number of sentences
    pub sentence_count: usize,
    /// Mean sentence length in content characters
    pub average_sentence_length: f64,
    /// Whether any sentence exceeds the configured long-sentence length
    pub has_long_sentences: bool,
    /// Whether any N3-or-above grammar pattern matched
    pub has_complex_grammar: bool,
}

/// Estimated level with supporting detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JlptEstimate {
    /// Estimated level
    pub level: JlptLevel,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Combined signal in `[0, 5]`
    pub signal: f64,
    /// Whether the estimate is exactly the target level, when one was given
    pub matches_target: Option<bool>,
    /// Whether the estimate is at or above the target level, when one was given
    pub reaches_target: Option<bool>,
    /// Supporting features; absent when estimated from raw signals
    pub indicators: Option<JlptIndicators>,
}

/// Rule-based JLPT level estimator
pub struct JlptEstimator {
    config: JlptConfig,
    patterns: Vec<(JlptLevel, Regex)>,
}

impl JlptEstimator {
    /// Compile the grammar patterns
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a pattern does not compile
    pub fn new(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        let mut patterns = Vec::new();
        for (level, sources) in &config.jlpt.grammar_patterns {
            for source in sources {
                patterns.push((*level, compile_pattern(source)?));
            }
        }
        Ok(Self {
            config: config.jlpt.clone(),
            patterns,
        })
    }

    /// Estimate the level of a text
    ///
    /// `vocabulary_score` is the 0-100 vocabulary score of the same text.
    /// Empty text estimates N5 with zero confidence.
    #[must_use]
    pub fn estimate(
        &self,
        text: &str,
        vocabulary_score: f64,
        target: Option<JlptLevel>,
    ) -> JlptEstimate {
        let sentences = split_sentences(text);
        if sentences.is_empty() || content_length(text) == 0 {
            return JlptEstimate {
                level: JlptLevel::N5,
                confidence: 0.0,
                signal: 0.0,
                matches_target: target.map(|t| t == JlptLevel::N5),
                reaches_target: target.map(|t| JlptLevel::N5 >= t),
                indicators: None,
            };
        }

        let mut grammar_hits: BTreeMap<JlptLevel, usize> = BTreeMap::new();
        for (level, pattern) in &self.patterns {
            if pattern.is_match(text) {
                *grammar_hits.entry(*level).or_insert(0) += 1;
            }
        }

        let lengths: Vec<usize> = sentences.iter().map(|s| content_length(s)).collect();
        let ratio = kanji_ratio(text);
        let indicators = JlptIndicators {
            kanji_ratio: ratio,
            sentence_count: sentences.len(),
            average_sentence_length: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
            has_long_sentences: lengths
                .iter()
                .any(|len| *len > self.config.long_sentence_chars),
            has_complex_grammar: grammar_hits.keys().any(|level| *level >= JlptLevel::N3),
            grammar_hits,
        };

        let signals = JlptSignals {
            grammar_signal: Self::grammar_signal(&indicators.grammar_hits),
            kanji_ratio: ratio,
            vocabulary_score,
        };
        let mut estimate = self.estimate_from_signals(signals, target);
        estimate.indicators = Some(indicators);
        estimate
    }

    /// Estimate directly from raw signals
    #[must_use]
    pub fn estimate_from_signals(
        &self,
        signals: JlptSignals,
        target: Option<JlptLevel>,
    ) -> JlptEstimate {
        let signal = self.combined_signal(signals);
        let (level, confidence) = self.band(signal);
        JlptEstimate {
            level,
            confidence,
            signal,
            matches_target: target.map(|t| level == t),
            reaches_target: target.map(|t| level >= t),
            indicators: None,
        }
    }

    /// `Σ rank² / Σ rank` over matching patterns
    fn grammar_signal(hits: &BTreeMap<JlptLevel, usize>) -> f64 {
        let (weighted, total) = hits.iter().fold((0.0, 0.0), |(weighted, total), (level, count)| {
            let rank = f64::from(level.rank());
            let count = *count as f64;
            (weighted + rank * rank * count, total + rank * count)
        });
        if total > 0.0 {
            weighted / total
        } else {
            0.0
        }
    }

    /// Piecewise-linear kanji signal: 0 at ratio 0, `i + 1` at reference `i`, capped at 5
    #[must_use]
    pub fn kanji_signal(&self, ratio: f64) -> f64 {
        let refs = &self.config.kanji_reference_ratios;
        if ratio <= 0.0 {
            return 0.0;
        }
        if ratio < refs[0] {
            return ratio / refs[0];
        }
        for (i, pair) in refs.windows(2).enumerate() {
            if ratio < pair[1] {
                return (i + 1) as f64 + (ratio - pair[0]) / (pair[1] - pair[0]);
            }
        }
        SIGNAL_MAX
    }

    fn combined_signal(&self, signals: JlptSignals) -> f64 {
        let cfg = &self.config;
        let vocabulary = (signals.vocabulary_score / 20.0).clamp(0.0, SIGNAL_MAX);
        let grammar = signals.grammar_signal.clamp(0.0, SIGNAL_MAX);
        let signal = cfg.grammar_weight * grammar
            + cfg.kanji_weight * self.kanji_signal(signals.kanji_ratio)
            + cfg.vocabulary_weight * vocabulary;
        if signal.is_finite() {
            signal.clamp(0.0, SIGNAL_MAX)
        } else {
            0.0
        }
    }

    /// Level band and confidence for a signal
    fn band(&self, signal: f64) -> (JlptLevel, f64) {
        let thresholds = &self.config.thresholds;
        let index = thresholds
            .iter()
            .position(|upper| signal <= *upper)
            .unwrap_or(thresholds.len());

        let lower = if index == 0 { 0.0 } else { thresholds[index - 1] };
        let upper = thresholds.get(index).copied().unwrap_or(SIGNAL_MAX);
        let width = upper - lower;

        let confidence = if index == 0 {
            (upper - signal) / width
        } else if index == thresholds.len() {
            (signal - lower) / width
        } else {
            (signal - lower).min(upper - signal) / (width / 2.0)
        };
        let confidence = (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0;

        (JlptLevel::from_band_index(index), confidence)
    }
}
