// ABOUTME: Grammar analyzer detecting tense mismatches, conjugation slips, and unnatural constructions
// ABOUTME: Scores 100 minus a fixed penalty per distinct error, clamped at zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use tracing::debug;

use super::rules::{CompiledRules, RuleFindings};
use super::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
use crate::config::{ConfigError, IntelligenceConfig};

/// Rule-based grammar checker
pub struct GrammarAnalyzer {
    rules: CompiledRules,
}

impl GrammarAnalyzer {
    /// Compile the grammar rule table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a rule does not compile
    pub fn new(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: CompiledRules::compile(
                &config.grammar,
                config.scoring.neutral_score,
                config.language.min_japanese_ratio,
            )?,
        })
    }

    /// Check a text and return its findings
    #[must_use]
    pub fn check(&self, text: &str) -> RuleFindings {
        let findings = self.rules.evaluate(text);
        debug!(
            errors = findings.errors.len(),
            score = findings.score,
            "Grammar analysis complete"
        );
        findings
    }
}

impl MessageAnalyzer for GrammarAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Grammar
    }

    fn analyze(&self, text: &str, _context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Grammar(self.check(text))
    }
}
