// ABOUTME: Particle analyzer for に/で, を/が, は/が and related confusions in learner sentences
// ABOUTME: Shares the rule-table engine with the grammar analyzer using its own table and penalty
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use tracing::debug;

use super::rules::{CompiledRules, RuleFindings};
use super::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
use crate::config::{ConfigError, IntelligenceConfig};

/// Rule-based particle checker
pub struct ParticleAnalyzer {
    rules: CompiledRules,
}

impl ParticleAnalyzer {
    /// Compile the particle rule table
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if a rule does not compile
    pub fn new(config: &IntelligenceConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: CompiledRules::compile(
                &config.particle,
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
            "Particle analysis complete"
        );
        findings
    }
}

impl MessageAnalyzer for ParticleAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Particle
    }

    fn analyze(&self, text: &str, _context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Particle(self.check(text))
    }
}
