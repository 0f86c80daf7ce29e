// ABOUTME: Heuristic sentence corrector rewriting common learner mistakes with Vietnamese explanations
// ABOUTME: Applies configured regex rewrites in order and never returns an empty explanation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzers::compile_pattern;
use crate::config::{ConfigError, IntelligenceConfig};

/// Corrected sentence with explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Sentence as submitted
    pub original: String,
    /// Sentence after correction (equal to the input when nothing applied)
    pub corrected: String,
    /// Vietnamese explanation of the changes
    pub explanation_vi: String,
}

impl Correction {
    /// Whether any rewrite changed the sentence
    #[must_use]
    pub fn changed(&self) -> bool {
        self.original.trim() != self.corrected
    }
}

struct CompiledRewrite {
    pattern: Regex,
    unless: Option<Regex>,
    replacement: String,
    explanation_vi: String,
}

/// Rule-based sentence corrector
pub struct SentenceCorrector {
    rewrites: Vec<CompiledRewrite>,
    fallback_explanation_vi: String,
}

impl SentenceCorrector {
    /// Compile the correction rules
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a rule does not compile
    pub fn new(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        let rewrites = config
            .correction
            .rules
            .iter()
            .map(|rule| {
                Ok(CompiledRewrite {
                    pattern: compile_pattern(&rule.pattern)?,
                    unless: rule.unless.as_deref().map(compile_pattern).transpose()?,
                    replacement: rule.replacement.clone(),
                    explanation_vi: rule.explanation_vi.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            rewrites,
            fallback_explanation_vi: config.correction.fallback_explanation_vi.clone(),
        })
    }

    /// Correct a sentence
    #[must_use]
    pub fn correct(&self, sentence: &str) -> Correction {
        let mut corrected = sentence.trim().to_owned();
        let mut explanations: Vec<&str> = Vec::new();

        for rewrite in &self.rewrites {
            let exempt = rewrite
                .unless
                .as_ref()
                .is_some_and(|exception| exception.is_match(&corrected));
            if !exempt && rewrite.pattern.is_match(&corrected) {
                corrected = rewrite
                    .pattern
                    .replace_all(&corrected, rewrite.replacement.as_str())
                    .into_owned();
                explanations.push(&rewrite.explanation_vi);
            }
        }

        debug!(rewrites = explanations.len(), "Sentence correction complete");

        let explanation_vi = if explanations.is_empty() {
            self.fallback_explanation_vi.clone()
        } else {
            explanations.join(" ")
        };
        Correction {
            original: sentence.to_owned(),
            corrected,
            explanation_vi,
        }
    }

    /// Explanation used when no rule applies
    #[must_use]
    pub fn fallback_explanation(&self) -> &str {
        &self.fallback_explanation_vi
    }
}
