// ABOUTME: Tests for heuristic sentence correction with Vietnamese explanations
// ABOUTME: Covers rewrite rules, chained rewrites, and the already-correct fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use kaiwa_intelligence::config::CorrectionRule;
use kaiwa_intelligence::{ConfigError, IntelligenceConfig, SentenceCorrector};

fn corrector() -> Result<SentenceCorrector> {
    common::init_test_logging();
    Ok(SentenceCorrector::new(&IntelligenceConfig::default())?)
}

#[test]
fn test_reason_with_desire_is_rewritten() -> Result<()> {
    let correction = corrector()?.correct("日本へ行きたいですから勉強します");

    assert_eq!(correction.original, "日本へ行きたいですから勉強します");
    assert_eq!(correction.corrected, "日本へ行きたいので、勉強します");
    assert!(correction.changed());
    assert!(!correction.explanation_vi.trim().is_empty());
    assert!(correction.explanation_vi.contains("ので"));
    Ok(())
}

#[test]
fn test_past_tense_rewrite_keeps_punctuation() -> Result<()> {
    let correction = corrector()?.correct("昨日、映画を見ます。");

    assert_eq!(correction.corrected, "昨日、映画を見ました。");
    Ok(())
}

#[test]
fn test_particle_rewrites() -> Result<()> {
    let corrector = corrector()?;

    assert_eq!(corrector.correct("日本語を話せます").corrected, "日本語が話せます");
    assert_eq!(corrector.correct("音楽を好きです").corrected, "音楽が好きです");
    assert_eq!(
        corrector.correct("図書館に勉強します").corrected,
        "図書館で勉強します"
    );
    Ok(())
}

#[test]
fn test_textbook_sentences_are_left_unchanged() -> Result<()> {
    let corrector = corrector()?;
    let sentences = [
        "公園に遊びに行きます。",
        "図書館に勉強しに行きました。",
        "授業はいつはじまりますか。",
        "去年から日本に住んでいます。",
        "昨日から雨が降っています。",
    ];

    for sentence in sentences {
        let correction = corrector.correct(sentence);
        assert_eq!(correction.corrected, correction.original, "{sentence}");
        assert!(!correction.changed());
    }
    Ok(())
}

#[test]
fn test_place_rewrite_keeps_following_text() -> Result<()> {
    let corrector = corrector()?;

    assert_eq!(
        corrector.correct("毎日図書館に勉強しています。").corrected,
        "毎日図書館で勉強しています。"
    );
    assert_eq!(corrector.correct("公園に遊んだ").corrected, "公園で遊んだ");
    Ok(())
}

#[test]
fn test_adjective_rewrites() -> Result<()> {
    let corrector = corrector()?;

    assert_eq!(corrector.correct("部屋は静かなです").corrected, "部屋は静かです");
    assert_eq!(
        corrector.correct("旅行は楽しいでした").corrected,
        "旅行は楽しかったです"
    );
    Ok(())
}

#[test]
fn test_multiple_rewrites_join_explanations() -> Result<()> {
    let corrector = corrector()?;
    let single = corrector.correct("日本語を話せます");
    let double = corrector.correct("昨日、日本語を話せます");

    assert_eq!(double.corrected, "昨日、日本語が話せました");
    assert!(double.explanation_vi.len() > single.explanation_vi.len());
    Ok(())
}

#[test]
fn test_correct_sentence_uses_fallback() -> Result<()> {
    let corrector = corrector()?;
    let correction = corrector.correct("毎朝コーヒーを飲みます。");

    assert!(!correction.changed());
    assert_eq!(correction.corrected, "毎朝コーヒーを飲みます。");
    assert_eq!(correction.explanation_vi, "Câu này đã đúng ngữ pháp cơ bản.");
    assert_eq!(corrector.fallback_explanation(), correction.explanation_vi);
    Ok(())
}

#[test]
fn test_invalid_correction_pattern_is_rejected() {
    let mut config = IntelligenceConfig::default();
    config
        .correction
        .rules
        .push(CorrectionRule::new("[", "x", "broken"));

    assert!(matches!(
        SentenceCorrector::new(&config),
        Err(ConfigError::InvalidPattern { .. })
    ));
}
