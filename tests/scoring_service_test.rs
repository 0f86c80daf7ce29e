// ABOUTME: Tests for conversation score aggregation, weighting, and mistake ranking
// ABOUTME: Covers tolerant numeric coercion, latency fallback, weaknesses, and keigo summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use kaiwa_coach::models::{
    AnalysisScores, ComponentScores, ConversationMode, KeigoLevel, Message, MessageAnalysis,
    ScoreDimension, ScoreValue,
};
use kaiwa_intelligence::coercion::{coerce, coerce_clamped, try_coerce};
use kaiwa_intelligence::{IntelligenceConfig, ScoringService};

fn service() -> ScoringService {
    common::init_test_logging();
    ScoringService::from_config(&IntelligenceConfig::default())
}

fn analyzed(scores: ComponentScores) -> Message {
    Message::user("テスト").with_analysis(MessageAnalysis {
        scores,
        ..MessageAnalysis::default()
    })
}

fn with_errors(grammar: &[&str], particles: &[&str]) -> Message {
    Message::user("テスト").with_analysis(MessageAnalysis {
        grammar_errors: grammar.iter().map(|e| (*e).to_owned()).collect(),
        particle_errors: particles.iter().map(|e| (*e).to_owned()).collect(),
        ..MessageAnalysis::default()
    })
}

const fn uniform(score: f64) -> AnalysisScores {
    AnalysisScores {
        grammar: score,
        vocabulary: score,
        fluency: score,
        naturalness: score,
    }
}

#[test]
fn test_coercion_accepts_numbers_and_numeric_text() {
    assert_eq!(try_coerce(Some(&ScoreValue::Number(85.0))), Some(85.0));
    assert_eq!(try_coerce(Some(&ScoreValue::Text(" 85 ".into()))), Some(85.0));
    assert_eq!(try_coerce(Some(&ScoreValue::Text("abc".into()))), None);
    assert_eq!(try_coerce(Some(&ScoreValue::Number(f64::INFINITY))), None);
    assert_eq!(try_coerce(None), None);

    assert!((coerce(None, 70.0) - 70.0).abs() < f64::EPSILON);
    let clamped = coerce_clamped(Some(&ScoreValue::Number(140.0)), 70.0, 0.0, 100.0);
    assert!((clamped - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_dimension_values_are_skipped() {
    let messages = vec![
        analyzed(ComponentScores {
            grammar: Some(ScoreValue::Number(80.0)),
            ..ComponentScores::default()
        }),
        analyzed(ComponentScores::default()),
    ];

    let mean = ScoringService::dimension_mean(&messages, ScoreDimension::Grammar);
    assert_eq!(mean, Some(80.0));
}

#[test]
fn test_textual_scores_are_averaged() {
    let messages = vec![
        analyzed(ComponentScores {
            grammar: Some(ScoreValue::Text("90".into())),
            ..ComponentScores::default()
        }),
        analyzed(ComponentScores {
            grammar: Some(ScoreValue::Number(70.0)),
            ..ComponentScores::default()
        }),
        analyzed(ComponentScores {
            grammar: Some(ScoreValue::Text("n/a".into())),
            ..ComponentScores::default()
        }),
    ];

    let mean = ScoringService::dimension_mean(&messages, ScoreDimension::Grammar);
    assert_eq!(mean, Some(80.0));
}

#[test]
fn test_dimensions_without_signal_use_neutral_score() {
    let scores = service().aggregate_scores(&[analyzed(ComponentScores::default())]);

    assert!((scores.grammar - 70.0).abs() < f64::EPSILON);
    assert!((scores.vocabulary - 70.0).abs() < f64::EPSILON);
    assert!((scores.fluency - 70.0).abs() < f64::EPSILON);
    assert!((scores.naturalness - 70.0).abs() < f64::EPSILON);
}

#[test]
fn test_fluency_falls_back_to_latency() {
    let messages = vec![
        analyzed(ComponentScores::default()).with_latency(3000.0),
        analyzed(ComponentScores::default()).with_latency(5000.0),
    ];

    let scores = service().aggregate_scores(&messages);
    assert!((scores.fluency - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_assistant_messages_do_not_contribute() {
    let assistant = Message::assistant("どうぞ").with_analysis(MessageAnalysis {
        scores: ComponentScores {
            grammar: Some(ScoreValue::Number(0.0)),
            ..ComponentScores::default()
        },
        ..MessageAnalysis::default()
    });
    let messages = vec![
        analyzed(ComponentScores {
            grammar: Some(ScoreValue::Number(90.0)),
            ..ComponentScores::default()
        }),
        assistant,
    ];

    let mean = ScoringService::dimension_mean(&messages, ScoreDimension::Grammar);
    assert_eq!(mean, Some(90.0));
}

#[test]
fn test_overall_total_uses_weights() {
    let service = service();

    let mode = ConversationMode::SpeakingPractice;
    assert!((service.overall_total(&uniform(80.0), mode) - 80.0).abs() < f64::EPSILON);

    let scores = AnalysisScores {
        grammar: 100.0,
        vocabulary: 50.0,
        fluency: 50.0,
        naturalness: 100.0,
    };
    // 30 + 15 + 10 + 20
    assert!((service.overall_total(&scores, mode) - 75.0).abs() < f64::EPSILON);
}

#[test]
fn test_overall_total_follows_mode_weights() {
    let service = service();
    let scores = AnalysisScores {
        grammar: 40.0,
        vocabulary: 80.0,
        fluency: 90.0,
        naturalness: 80.0,
    };

    // 12 + 24 + 18 + 16
    let free = service.overall_total(&scores, ConversationMode::FreeConversation);
    assert!((free - 70.0).abs() < f64::EPSILON);
    // 16 + 24 + 9 + 16
    let exam = service.overall_total(&scores, ConversationMode::JlptExam);
    assert!((exam - 65.0).abs() < f64::EPSILON);
}

#[test]
fn test_mode_without_weights_uses_base_weights() {
    let mut config = IntelligenceConfig::default();
    config.scoring.mode_weights.clear();
    let service = ScoringService::from_config(&config);
    let scores = AnalysisScores {
        grammar: 40.0,
        vocabulary: 80.0,
        fluency: 90.0,
        naturalness: 80.0,
    };

    let exam = service.overall_total(&scores, ConversationMode::JlptExam);
    let free = service.overall_total(&scores, ConversationMode::FreeConversation);
    assert!((exam - free).abs() < f64::EPSILON);
}

#[test]
fn test_weaknesses_are_strictly_below_threshold() {
    let service = service();
    let scores = AnalysisScores {
        grammar: 69.9,
        vocabulary: 70.0,
        fluency: 40.0,
        naturalness: 95.0,
    };

    assert_eq!(
        service.identify_weaknesses(&scores),
        vec![ScoreDimension::Grammar, ScoreDimension::Fluency]
    );
    assert!(service.identify_weaknesses(&uniform(70.0)).is_empty());
}

#[test]
fn test_common_mistakes_order_by_frequency_then_first_seen() {
    let messages = vec![
        with_errors(&["A"], &["B"]),
        with_errors(&[], &["B"]),
        with_errors(&["C"], &["B"]),
        with_errors(&["D", "C"], &[]),
    ];

    let mistakes = service().common_mistakes(&messages);
    assert_eq!(mistakes, vec!["B", "C", "A", "D"]);
}

#[test]
fn test_collected_errors_are_distinct_in_message_order() {
    let messages = vec![
        with_errors(&["tense", "conjugation"], &["place"]),
        with_errors(&["tense"], &["place", "doubled"]),
    ];

    let errors = ScoringService::collect_errors(&messages);
    assert_eq!(errors.grammar, vec!["tense", "conjugation"]);
    assert_eq!(errors.particles, vec!["place", "doubled"]);
}

#[test]
fn test_keigo_usage_summary() {
    let keigo = |score: Option<f64>, level: KeigoLevel, suggestion: &str| {
        Message::user("テスト").with_analysis(MessageAnalysis {
            keigo_score: score,
            keigo_level: Some(level),
            keigo_suggestions: vec![suggestion.to_owned()],
            ..MessageAnalysis::default()
        })
    };
    let messages = vec![
        keigo(Some(7.0), KeigoLevel::Sonkeigo, "x"),
        keigo(Some(8.0), KeigoLevel::Teineigo, "y"),
        keigo(None, KeigoLevel::None, "x"),
        keigo(Some(6.0), KeigoLevel::Teineigo, "z"),
    ];

    let usage = ScoringService::keigo_usage(&messages);
    assert_eq!(usage.average_score, Some(7.0));
    assert_eq!(usage.scored_messages, 3);
    assert_eq!(usage.dominant_level, Some(KeigoLevel::Teineigo));
    assert_eq!(usage.suggestions, vec!["x", "y", "z"]);
}

#[test]
fn test_keigo_usage_ties_prefer_stronger_register() {
    let messages = vec![
        Message::user("テスト").with_analysis(MessageAnalysis {
            keigo_level: Some(KeigoLevel::Teineigo),
            ..MessageAnalysis::default()
        }),
        Message::user("テスト").with_analysis(MessageAnalysis {
            keigo_level: Some(KeigoLevel::Kenjougo),
            ..MessageAnalysis::default()
        }),
    ];

    let usage = ScoringService::keigo_usage(&messages);
    assert_eq!(usage.dominant_level, Some(KeigoLevel::Kenjougo));
    assert_eq!(usage.average_score, None);
}
