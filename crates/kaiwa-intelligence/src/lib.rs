// ABOUTME: Japanese learner proficiency analysis engine for the kaiwa-coach platform
// ABOUTME: Rule-based analyzers, JLPT estimation, conversation scoring, and sentence correction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![deny(unsafe_code)]

//! # Kaiwa Intelligence
//!
//! CPU-bound analysis of learner Japanese. Nothing in this crate performs I/O:
//! the configuration is loaded once, every pattern is compiled when the
//! [`AnalysisEngine`] is built, and analysis is a pure function of its input.
//!
//! ## Modules
//!
//! - **analyzers**: grammar, particle, keigo, vocabulary, and fluency analyzers
//! - **`jlpt_estimator`**: maps grammar, kanji, and vocabulary signals onto N5..N1
//! - **scoring**: aggregates per-message analyses into conversation scores
//! - **correction**: heuristic sentence rewrites with Vietnamese explanations
//! - **recommendation**: catalog courses for weak dimensions
//! - **coercion**: numeric coercion of loosely typed score values
//! - **engine**: analyzer registry and the conversation evaluation entry point

/// Per-message analyzers and their typed outputs
pub mod analyzers;

/// Numeric coercion of loosely typed values
pub mod coercion;

/// Analysis configuration with defaults, JSON loading, and environment overrides
pub mod config;

/// Heuristic sentence correction
pub mod correction;

/// Analyzer registry and analysis engine
pub mod engine;

/// JLPT level estimation
pub mod jlpt_estimator;

/// Course recommendations for weak dimensions
pub mod recommendation;

/// Conversation score aggregation
pub mod scoring;

/// Character-class helpers for Japanese text
pub mod text;

pub use analyzers::{AnalysisContext, AnalyzerKind, AnalyzerOutput, MessageAnalyzer};
pub use config::{ConfigError, IntelligenceConfig};
pub use correction::{Correction, SentenceCorrector};
pub use engine::{AnalysisEngine, AnalyzerRegistry};
pub use jlpt_estimator::{JlptEstimate, JlptEstimator, JlptIndicators, JlptSignals};
pub use recommendation::CourseRecommender;
pub use scoring::ScoringService;
