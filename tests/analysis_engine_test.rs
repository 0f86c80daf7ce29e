// ABOUTME: Integration tests for the analysis engine across message and conversation analysis
// ABOUTME: Covers the language guard, analyzer registry, evaluation scores, and error cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use kaiwa_coach::errors::ErrorCode;
use kaiwa_coach::models::{
    ComponentScores, Conversation, ConversationMode, JlptLevel, KeigoLevel, Message,
    MessageAnalysis, ScoreDimension, ScoreValue,
};
use kaiwa_intelligence::analyzers::RuleFindings;
use kaiwa_intelligence::{
    AnalysisContext, AnalysisEngine, AnalyzerKind, AnalyzerOutput, AnalyzerRegistry,
    MessageAnalyzer,
};

struct StrictGrammar;

impl MessageAnalyzer for StrictGrammar {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Grammar
    }

    fn analyze(&self, _text: &str, _context: &AnalysisContext) -> AnalyzerOutput {
        AnalyzerOutput::Grammar(RuleFindings {
            errors: vec!["always wrong".into()],
            score: 10.0,
            low_confidence: false,
        })
    }
}

fn scenario_conversation() -> Conversation {
    common::create_test_conversation(
        "conv-scenario",
        JlptLevel::N4,
        ConversationMode::SpeakingPractice,
        &[
            ("昨日、日本へ行きます。", Some(4200.0)),
            ("図書館に勉強します。", Some(8000.0)),
            ("週末は友達と映画を見ました。とても楽しかったです。", Some(12_000.0)),
        ],
    )
}

#[test]
fn test_message_analysis_flags_tense_error() -> Result<()> {
    let engine = common::create_test_engine()?;
    let context = AnalysisContext::default().with_latency(4000.0);

    let analysis = engine.analyze_message("昨日、日本へ行きます。", &context);

    assert!(!analysis.grammar_errors.is_empty());
    assert_eq!(analysis.scores.grammar, Some(ScoreValue::Number(85.0)));
    assert_eq!(analysis.scores.fluency, Some(ScoreValue::Number(100.0)));
    assert_eq!(analysis.keigo_level, Some(KeigoLevel::Teineigo));
    assert!(analysis.jlpt_estimation.is_some());
    assert!(!analysis.low_confidence);
    Ok(())
}

#[test]
fn test_naturalness_combines_particles_and_keigo() -> Result<()> {
    let engine = common::create_test_engine()?;
    let context = AnalysisContext::default().with_latency(4000.0);

    // particles clean (100), polite register scored 7/10
    let polite = engine.analyze_message("昨日、日本へ行きます。", &context);
    assert_eq!(polite.scores.naturalness, Some(ScoreValue::Number(85.0)));

    // plain speech: keigo has no markers, naturalness is the particle score alone
    let plain = engine.analyze_message("図書館に勉強した。", &context);
    assert_eq!(plain.scores.naturalness, Some(ScoreValue::Number(80.0)));
    Ok(())
}

#[test]
fn test_missing_latency_lowers_confidence_without_failing() -> Result<()> {
    let engine = common::create_test_engine()?;

    let analysis = engine.analyze_message("はい、そうです。", &AnalysisContext::default());

    assert_eq!(analysis.scores.fluency, None);
    assert!(analysis.low_confidence);
    assert!(analysis.scores.grammar.is_some());
    Ok(())
}

#[test]
fn test_non_japanese_message_degrades() -> Result<()> {
    let engine = common::create_test_engine()?;

    let analysis = engine.analyze_message("I went to Japan.", &AnalysisContext::default());

    assert!(analysis.low_confidence);
    assert_eq!(analysis.scores.grammar, None);
    assert_eq!(analysis.scores.naturalness, None);
    assert_eq!(analysis.keigo_score, None);
    assert_eq!(analysis.jlpt_estimation, None);
    Ok(())
}

#[test]
fn test_message_analysis_is_idempotent() -> Result<()> {
    let engine = common::create_test_engine()?;
    let context = AnalysisContext::default()
        .with_target(JlptLevel::N3)
        .with_mode(ConversationMode::RolePlay)
        .with_latency(6500.0);
    let text = "先生がおっしゃられました。図書館に勉強します。";

    assert_eq!(
        engine.analyze_message(text, &context),
        engine.analyze_message(text, &context)
    );
    Ok(())
}

#[test]
fn test_language_guard() -> Result<()> {
    let engine = common::create_test_engine()?;

    assert!(engine.ensure_japanese("日本語を勉強しています。").is_ok());

    let blank = engine.ensure_japanese("   ").unwrap_err();
    assert_eq!(blank.code, ErrorCode::MissingRequiredField);

    let english = engine.ensure_japanese("Hello there").unwrap_err();
    assert_eq!(english.code, ErrorCode::UnsupportedLanguage);
    Ok(())
}

#[test]
fn test_registry_replaces_same_kind() -> Result<()> {
    let config = common::default_config();
    let mut registry = AnalyzerRegistry::standard(&config)?;
    assert_eq!(registry.kinds().len(), 5);

    registry.register(Box::new(StrictGrammar));
    assert_eq!(registry.kinds().len(), 5);
    assert!(registry.get(AnalyzerKind::Grammar).is_some());

    let engine = AnalysisEngine::with_registry(config, registry)?;
    let analysis = engine.analyze_message("毎朝コーヒーを飲みます。", &AnalysisContext::default());
    assert_eq!(analysis.grammar_errors, vec!["always wrong"]);
    assert_eq!(analysis.scores.grammar, Some(ScoreValue::Number(10.0)));
    Ok(())
}

#[test]
fn test_engine_without_vocabulary_analyzer_still_estimates() -> Result<()> {
    let config = common::default_config();
    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(StrictGrammar));
    let engine = AnalysisEngine::with_registry(config, registry)?;

    let estimate = engine.estimate_level("会議の資料を準備しました。", Some(JlptLevel::N5));
    assert_eq!(estimate.reaches_target, Some(true));
    assert!((0.0..=1.0).contains(&estimate.confidence));
    Ok(())
}

#[test]
fn test_evaluate_conversation_scores_in_bounds() -> Result<()> {
    let engine = common::create_test_engine()?;
    let conversation = scenario_conversation();

    let analysis = engine.evaluate_conversation(&conversation, JlptLevel::N4)?;

    assert!(JlptLevel::ALL.contains(&analysis.jlpt_estimation));
    for dimension in ScoreDimension::ALL {
        let score = analysis.scores.get(dimension);
        assert!((0.0..=100.0).contains(&score), "{dimension}: {score}");
    }
    assert!((0.0..=100.0).contains(&analysis.total));
    assert!((0.0..=1.0).contains(&analysis.jlpt_confidence));
    assert_eq!(analysis.conversation_id, "conv-scenario");
    assert_eq!(analysis.user_id, "learner-1");
    assert_eq!(analysis.config_version, engine.config().version);
    assert_eq!(
        analysis.matches_target,
        analysis.jlpt_estimation == JlptLevel::N4
    );
    assert_eq!(
        analysis.reaches_target,
        analysis.jlpt_estimation >= JlptLevel::N4
    );
    Ok(())
}

#[test]
fn test_evaluate_conversation_weights_total_by_mode() -> Result<()> {
    let engine = common::create_test_engine()?;
    let lines = [
        ("昨日、日本へ行きます。", Some(3000.0)),
        ("毎朝コーヒーを飲みます。", Some(2500.0)),
    ];

    for mode in [ConversationMode::JlptExam, ConversationMode::FreeConversation] {
        let conversation =
            common::create_test_conversation("conv-mode", JlptLevel::N5, mode, &lines);
        let analysis = engine.evaluate_conversation(&conversation, JlptLevel::N5)?;

        let weights = engine.config().scoring.weights_for(mode);
        let expected: f64 = ScoreDimension::ALL
            .iter()
            .map(|d| analysis.scores.get(*d) * weights.get(*d))
            .sum();
        assert!((analysis.total - expected).abs() < 0.051, "{mode:?}");
    }

    let exam = engine.config().scoring.weights_for(ConversationMode::JlptExam);
    let free = engine.config().scoring.weights_for(ConversationMode::FreeConversation);
    assert!(exam.grammar > free.grammar);
    Ok(())
}

#[test]
fn test_evaluate_collects_errors_and_weaknesses() -> Result<()> {
    let engine = common::create_test_engine()?;
    let conversation = scenario_conversation();

    let analysis = engine.evaluate_conversation(&conversation, JlptLevel::N4)?;

    assert_eq!(analysis.errors.grammar.len(), 1);
    assert_eq!(analysis.errors.particles.len(), 1);
    assert_eq!(analysis.common_mistakes.len(), 2);
    assert_eq!(
        analysis.weaknesses,
        engine.scoring().identify_weaknesses(&analysis.scores)
    );
    assert_eq!(analysis.keigo_usage.scored_messages, 3);
    assert_eq!(analysis.keigo_usage.dominant_level, Some(KeigoLevel::Teineigo));
    Ok(())
}

#[test]
fn test_evaluate_keeps_existing_message_analyses() -> Result<()> {
    let engine = common::create_test_engine()?;
    let mut conversation = Conversation::new(
        "conv-provider",
        "learner-2",
        "仕事",
        JlptLevel::N3,
        ConversationMode::FreeConversation,
    );
    conversation.push_message(Message::user("昨日、会社へ行きました。").with_analysis(
        MessageAnalysis {
            scores: ComponentScores {
                grammar: Some(ScoreValue::Text("40".into())),
                ..ComponentScores::default()
            },
            ..MessageAnalysis::default()
        },
    ));

    let analysis = engine.evaluate_conversation(&conversation, JlptLevel::N3)?;

    assert!((analysis.scores.grammar - 40.0).abs() < f64::EPSILON);
    assert!(analysis.weaknesses.contains(&ScoreDimension::Grammar));
    Ok(())
}

#[test]
fn test_evaluate_rejects_unsupported_language() -> Result<()> {
    let engine = common::create_test_engine()?;
    let mut conversation = scenario_conversation();
    conversation.language = "en".into();

    let error = engine
        .evaluate_conversation(&conversation, JlptLevel::N4)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::UnsupportedLanguage);
    assert!(error.message.contains("Language not supported yet"));
    Ok(())
}

#[test]
fn test_evaluate_requires_user_messages() -> Result<()> {
    let engine = common::create_test_engine()?;
    let mut conversation = Conversation::new(
        "conv-empty",
        "learner-3",
        "天気",
        JlptLevel::N5,
        ConversationMode::FreeConversation,
    );
    conversation.push_message(Message::assistant("こんにちは。"));

    let error = engine
        .evaluate_conversation(&conversation, JlptLevel::N5)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.resource_id.as_deref(), Some("conv-empty"));
    Ok(())
}
