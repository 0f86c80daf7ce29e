// ABOUTME: Keigo analyzer detecting sonkeigo, kenjougo, and teineigo and scoring register correctness
// ABOUTME: Penalizes honorifics with plain closings, mixed closings, double keigo, and missing registers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Keigo (honorific speech) analysis.
//!
//! Scores live on `[0, 10]`. Text with any register marker starts from
//! `marker_base`; text without one starts from `plain_base` and loses
//! `missing_register_penalty` when the conversation mode expects politeness.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use kaiwa_core::constants::scores::{KEIGO_MAX, KEIGO_MIN};
use kaiwa_core::models::{ConversationMode, KeigoLevel};

use super::{compile_pattern, compile_patterns, round1};
use super::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
use crate::config::{ConfigError, IntelligenceConfig, KeigoScoring};
use crate::text::{looks_japanese, split_sentences};

const SUGGEST_EXPECTED_REGISTER: &str =
    "Trong tình huống này nên dùng thể lịch sự です/ます hoặc kính ngữ.";
const SUGGEST_HONORIFIC_PLAIN: &str =
    "Câu có kính ngữ nhưng lại kết thúc bằng thể thường; hãy kết thúc bằng です/ます.";
const SUGGEST_MIXED: &str =
    "Không nên trộn thể lịch sự (です/ます) và thể thường trong cùng một lượt nói.";
const SUGGEST_DOUBLE_KEIGO: &str =
    "Tránh dùng kính ngữ kép (二重敬語), ví dụ: おっしゃられる → おっしゃる.";

/// How consistently sentence closings follow one register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeigoConsistency {
    /// Every classified closing is polite
    Polite,
    /// Every classified closing is plain
    Plain,
    /// Polite and plain closings are mixed
    Mixed,
    /// No closing could be classified
    Undetermined,
}

/// Result of keigo analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeigoAssessment {
    /// Score on the 0-10 scale; `None` when the text could not be analyzed
    pub score: Option<f64>,
    /// Registers detected anywhere in the text, weakest first
    pub registers: Vec<KeigoLevel>,
    /// Strongest register detected
    pub dominant: KeigoLevel,
    /// Closing consistency across sentences
    pub consistency: KeigoConsistency,
    /// Improvement suggestions
    pub suggestions: Vec<String>,
    /// Set when the text was empty or not Japanese
    pub low_confidence: bool,
}

impl KeigoAssessment {
    fn not_applicable() -> Self {
        Self {
            score: None,
            registers: Vec::new(),
            dominant: KeigoLevel::None,
            consistency: KeigoConsistency::Undetermined,
            suggestions: Vec::new(),
            low_confidence: true,
        }
    }

    /// Whether any honorific or polite marker was found
    #[must_use]
    pub fn has_markers(&self) -> bool {
        self.dominant != KeigoLevel::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing {
    Polite,
    Plain,
    Other,
}

/// Register analyzer for honorific speech
pub struct KeigoAnalyzer {
    sonkeigo: Vec<Regex>,
    kenjougo: Vec<Regex>,
    teineigo: Vec<Regex>,
    polite_closing: Regex,
    plain_closing: Regex,
    double_keigo: Vec<Regex>,
    scoring: KeigoScoring,
    polite_modes: Vec<ConversationMode>,
    min_japanese_ratio: f64,
}

impl KeigoAnalyzer {
    /// Compile marker and closing patterns
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a pattern does not compile
    pub fn new(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        let keigo = &config.keigo;
        Ok(Self {
            sonkeigo: compile_patterns(&keigo.markers.sonkeigo)?,
            kenjougo: compile_patterns(&keigo.markers.kenjougo)?,
            teineigo: compile_patterns(&keigo.markers.teineigo)?,
            polite_closing: compile_pattern(&keigo.polite_closing)?,
            plain_closing: compile_pattern(&keigo.plain_closing)?,
            double_keigo: compile_patterns(&keigo.double_keigo)?,
            scoring: keigo.scoring.clone(),
            polite_modes: keigo.polite_modes.clone(),
            min_japanese_ratio: config.language.min_japanese_ratio,
        })
    }

    /// Strongest register in a text, `KeigoLevel::None` when there is none
    #[must_use]
    pub fn detect_level(&self, text: &str) -> KeigoLevel {
        self.registers_in(text)
            .into_iter()
            .max()
            .unwrap_or(KeigoLevel::None)
    }

    fn registers_in(&self, sentence: &str) -> BTreeSet<KeigoLevel> {
        [
            (KeigoLevel::Sonkeigo, &self.sonkeigo),
            (KeigoLevel::Kenjougo, &self.kenjougo),
            (KeigoLevel::Teineigo, &self.teineigo),
        ]
        .into_iter()
        .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(sentence)))
        .map(|(level, _)| level)
        .collect()
    }

    fn closing(&self, sentence: &str) -> Closing {
        if self.polite_closing.is_match(sentence) {
            Closing::Polite
        } else if self.plain_closing.is_match(sentence) {
            Closing::Plain
        } else {
            Closing::Other
        }
    }

    /// Assess keigo usage in a text under an optional conversation mode
    #[must_use]
    pub fn assess(&self, text: &str, mode: Option<ConversationMode>) -> KeigoAssessment {
        if !looks_japanese(text, self.min_japanese_ratio) {
            return KeigoAssessment::not_applicable();
        }

        let mut registers = BTreeSet::new();
        let mut polite_closings = 0_usize;
        let mut plain_closings = 0_usize;
        let mut honorific_plain = 0_usize;

        for sentence in split_sentences(text) {
            let found = self.registers_in(sentence);
            let closing = self.closing(sentence);
            match closing {
                Closing::Polite => polite_closings += 1,
                Closing::Plain => plain_closings += 1,
                Closing::Other => {}
            }
            let honorific =
                found.contains(&KeigoLevel::Sonkeigo) || found.contains(&KeigoLevel::Kenjougo);
            if honorific && closing == Closing::Plain {
                honorific_plain += 1;
            }
            registers.extend(found);
        }

        let double_keigo = self
            .double_keigo
            .iter()
            .filter(|p| p.is_match(text))
            .count();
        let expects_polite = mode.is_some_and(|m| self.polite_modes.contains(&m));
        let s = &self.scoring;
        let mut suggestions = Vec::new();

        let raw_score = if registers.is_empty() {
            if expects_polite {
                suggestions.push(SUGGEST_EXPECTED_REGISTER.to_owned());
                s.plain_base - s.missing_register_penalty
            } else {
                s.plain_base
            }
        } else {
            let mut score = s.marker_base;
            if registers.len() > 1 {
                score += s.multiple_register_bonus;
            }
            let honorific = registers.contains(&KeigoLevel::Sonkeigo)
                || registers.contains(&KeigoLevel::Kenjougo);
            if expects_polite && honorific {
                score += s.expected_register_bonus;
            }
            if honorific_plain > 0 {
                score -= s.honorific_plain_closing_penalty * honorific_plain as f64;
                suggestions.push(SUGGEST_HONORIFIC_PLAIN.to_owned());
            }
            if polite_closings > 0 && plain_closings > 0 {
                score -= s.mixed_closing_penalty;
                suggestions.push(SUGGEST_MIXED.to_owned());
            }
            if double_keigo > 0 {
                score -= s.double_keigo_penalty * double_keigo as f64;
                suggestions.push(SUGGEST_DOUBLE_KEIGO.to_owned());
            }
            score
        };

        let consistency = match (polite_closings > 0, plain_closings > 0) {
            (true, true) => KeigoConsistency::Mixed,
            (true, false) => KeigoConsistency::Polite,
            (false, true) => KeigoConsistency::Plain,
            (false, false) => KeigoConsistency::Undetermined,
        };
        let dominant = registers.iter().copied().max().unwrap_or(KeigoLevel::None);
        let score = round1(raw_score.clamp(KEIGO_MIN, KEIGO_MAX));

        debug!(score, ?dominant, ?consistency, "Keigo analysis complete");

        KeigoAssessment {
            score: Some(score),
            registers: registers.into_iter().collect(),
            dominant,
            consistency,
            suggestions,
            low_confidence: false,
        }
    }
}

impl MessageAnalyzer for KeigoAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Keigo
    }

    fn analyze(&self, text: &str, context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Keigo(self.assess(text, context.mode))
    }
}
