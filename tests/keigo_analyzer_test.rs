// ABOUTME: Tests for keigo register detection and scoring
// ABOUTME: Covers honorific registers, closings, double keigo, and polite-mode expectations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use kaiwa_coach::models::{ConversationMode, KeigoLevel};
use kaiwa_intelligence::analyzers::{KeigoAnalyzer, KeigoConsistency};
use kaiwa_intelligence::IntelligenceConfig;

fn analyzer() -> Result<KeigoAnalyzer> {
    common::init_test_logging();
    Ok(KeigoAnalyzer::new(&IntelligenceConfig::default())?)
}

fn score_of(analyzer: &KeigoAnalyzer, text: &str, mode: Option<ConversationMode>) -> f64 {
    analyzer
        .assess(text, mode)
        .score
        .expect("Japanese text should be scored")
}

#[test]
fn test_respectful_register_detected() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("先生がいらっしゃいました。", None);

    assert_eq!(assessment.dominant, KeigoLevel::Sonkeigo);
    assert_eq!(assessment.registers, vec![KeigoLevel::Sonkeigo]);
    assert_eq!(assessment.consistency, KeigoConsistency::Polite);
    assert_eq!(assessment.score, Some(7.0));
    assert!(assessment.suggestions.is_empty());
    Ok(())
}

#[test]
fn test_detect_level_picks_strongest_register() -> Result<()> {
    let keigo = analyzer()?;

    assert_eq!(keigo.detect_level("これは本です。"), KeigoLevel::Teineigo);
    assert_eq!(keigo.detect_level("私がいたします。"), KeigoLevel::Kenjougo);
    assert_eq!(
        keigo.detect_level("社長がいらっしゃいます。"),
        KeigoLevel::Sonkeigo
    );
    assert_eq!(keigo.detect_level("本を読む。"), KeigoLevel::None);
    Ok(())
}

#[test]
fn test_multiple_registers_earn_bonus() -> Result<()> {
    let keigo = analyzer()?;

    let score = score_of(&keigo, "先生がいらっしゃいます。", None);
    assert!((score - 8.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_double_keigo_is_penalized() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("社長がおっしゃられました。", None);

    assert_eq!(assessment.score, Some(5.5));
    assert_eq!(assessment.suggestions.len(), 1);
    Ok(())
}

#[test]
fn test_mixed_closings_are_penalized() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("先生がいらっしゃいます。私は行く。", None);

    assert_eq!(assessment.consistency, KeigoConsistency::Mixed);
    assert_eq!(assessment.score, Some(6.5));
    Ok(())
}

#[test]
fn test_plain_speech_without_mode_expectation() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("元気だ。", None);

    assert_eq!(assessment.dominant, KeigoLevel::None);
    assert_eq!(assessment.score, Some(8.0));
    assert!(!assessment.has_markers());
    Ok(())
}

#[test]
fn test_plain_speech_in_role_play_loses_points() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("元気だ。", Some(ConversationMode::RolePlay));

    assert_eq!(assessment.score, Some(5.0));
    assert!(!assessment.suggestions.is_empty());
    Ok(())
}

#[test]
fn test_honorific_expected_in_polite_mode() -> Result<()> {
    let keigo = analyzer()?;

    let free = score_of(&keigo, "先生がいらっしゃいました。", None);
    let exam = score_of(
        &keigo,
        "先生がいらっしゃいました。",
        Some(ConversationMode::JlptExam),
    );
    assert!(exam > free);
    Ok(())
}

#[test]
fn test_scores_stay_on_ten_point_scale() -> Result<()> {
    let keigo = analyzer()?;
    let texts = [
        "先生がおっしゃられた。社長がいらっしゃられる。",
        "申し上げます。いたします。ございます。",
        "うん、行く。",
    ];
    for text in texts {
        for mode in [None, Some(ConversationMode::RolePlay)] {
            let score = score_of(&keigo, text, mode);
            assert!((0.0..=10.0).contains(&score), "{text}: {score}");
        }
    }
    Ok(())
}

#[test]
fn test_non_japanese_text_is_not_scored() -> Result<()> {
    let keigo = analyzer()?;
    let assessment = keigo.assess("Thank you very much.", None);

    assert_eq!(assessment.score, None);
    assert!(assessment.low_confidence);
    Ok(())
}
