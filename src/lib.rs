// ABOUTME: Main library entry point for the kaiwa-coach Japanese conversation practice platform
// ABOUTME: Wires the analysis engine to storage, reply generation, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![deny(unsafe_code)]

//! # Kaiwa Coach
//!
//! Proficiency feedback for learners practicing Japanese conversation. Learner
//! messages are scored for grammar, vocabulary, fluency, and naturalness, checked
//! for particle and keigo problems, and placed on the JLPT N5..N1 scale.
//!
//! ## Architecture
//!
//! - **`kaiwa-core`**: models, errors, and constants
//! - **`kaiwa-intelligence`**: the rule-based analysis engine
//! - **services**: evaluation, correction, and chat turns over a store and an
//!   optional reply generator
//! - **database**: the storage contract and an in-memory implementation
//! - **llm**: the reply generator contract and prompt templates
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kaiwa_coach::config::ServerConfig;
//! use kaiwa_coach::database::InMemoryConversationStore;
//! use kaiwa_coach::errors::AppResult;
//! use kaiwa_coach::services::{AnalyzeMessageRequest, EvaluationService};
//! use kaiwa_intelligence::AnalysisEngine;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let engine = AnalysisEngine::new(Arc::new(config.load_intelligence_config()?))?;
//!     let service = EvaluationService::new(
//!         Arc::new(engine),
//!         Arc::new(InMemoryConversationStore::new()),
//!         config.request_timeout,
//!     );
//!     let analysis = service.analyze_message(&AnalyzeMessageRequest::new("昨日、日本へ行きます。"))?;
//!     println!("{:?}", analysis.grammar_errors);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Conversation storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Reply generator contract and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain services
pub mod services;

pub use kaiwa_core::models;
