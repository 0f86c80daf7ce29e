// ABOUTME: Domain service layer combining analysis, storage, and reply generation
// ABOUTME: Protocol-agnostic entry points reusable from the CLI or an HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Domain service layer
//!
//! Services hold no protocol types so the same rules apply whatever the entry point.

/// Message analysis, conversation evaluation, correction, and chat turns
pub mod evaluation;

pub use evaluation::{
    AnalyzeMessageRequest, ChatTurn, CorrectionOutcome, CorrectionSource, EvaluationService,
};
