// ABOUTME: Data models for conversations, messages, JLPT levels, and analysis records
// ABOUTME: Re-exports every model type so callers can import from kaiwa_core::models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

mod analysis;
mod conversation;
mod level;
mod recommendation;
mod score_value;

pub use analysis::{
    AnalysisErrors, AnalysisScores, ComponentScores, ConversationAnalysis, KeigoLevel,
    KeigoUsage, MessageAnalysis, ScoreDimension,
};
pub use conversation::{Conversation, Message, MessageRole};
pub use level::{ConversationMode, JlptLevel};
pub use recommendation::{Course, CourseCategory, Recommendation, RecommendationKind};
pub use score_value::ScoreValue;
