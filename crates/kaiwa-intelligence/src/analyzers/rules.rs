// ABOUTME: Compiled rule table shared by the grammar and particle analyzers
// ABOUTME: Matches each rule per sentence and reports each description at most once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{compile_pattern, round1};
use crate::config::{ConfigError, RuleTableConfig};
use crate::text::{looks_japanese, split_sentences};

/// Errors found by a rule table and the resulting score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFindings {
    /// Distinct error descriptions in rule-table order
    pub errors: Vec<String>,
    /// Score on the 0-100 scale
    pub score: f64,
    /// Set when the text was empty or not Japanese
    pub low_confidence: bool,
}

impl RuleFindings {
    /// Neutral result for text that could not be analyzed
    #[must_use]
    pub const fn neutral(score: f64) -> Self {
        Self {
            errors: Vec::new(),
            score,
            low_confidence: true,
        }
    }
}

struct CompiledRule {
    pattern: Regex,
    unless: Option<Regex>,
    description: String,
}

impl CompiledRule {
    fn matches(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
            && !self
                .unless
                .as_ref()
                .is_some_and(|exception| exception.is_match(sentence))
    }
}

pub(super) struct CompiledRules {
    rules: Vec<CompiledRule>,
    ceiling: f64,
    penalty_per_error: f64,
    neutral_score: f64,
    min_japanese_ratio: f64,
}

impl CompiledRules {
    pub(super) fn compile(
        table: &RuleTableConfig,
        neutral_score: f64,
        min_japanese_ratio: f64,
    ) -> Result<Self, ConfigError> {
        let rules = table
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    pattern: compile_pattern(&rule.pattern)?,
                    unless: rule.unless.as_deref().map(compile_pattern).transpose()?,
                    description: rule.description.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            rules,
            ceiling: table.ceiling,
            penalty_per_error: table.penalty_per_error,
            neutral_score,
            min_japanese_ratio,
        })
    }

    pub(super) fn evaluate(&self, text: &str) -> RuleFindings {
        if !looks_japanese(text, self.min_japanese_ratio) {
            return RuleFindings::neutral(self.neutral_score);
        }

        let sentences = split_sentences(text);
        let mut errors: Vec<String> = Vec::new();
        for rule in &self.rules {
            let matched = sentences.iter().any(|s| rule.matches(s));
            if matched && !errors.contains(&rule.description) {
                errors.push(rule.description.clone());
            }
        }

        let penalty = self.penalty_per_error * errors.len() as f64;
        let score = round1((self.ceiling - penalty).clamp(0.0, self.ceiling));
        RuleFindings {
            errors,
            score,
            low_confidence: false,
        }
    }
}
