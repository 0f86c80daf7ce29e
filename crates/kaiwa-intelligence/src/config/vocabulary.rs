// ABOUTME: Vocabulary analyzer configuration with the scoring curve and level indicator words
// ABOUTME: Indicator words are grouped by JLPT level and weighted by level rank
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kaiwa_core::models::JlptLevel;

/// Vocabulary Analyzer Configuration
///
/// `score = base + kanji_weight * min(kanji_ratio / kanji_saturation, 1)
///          + chunk_weight * distinct_chunk_ratio + min(weighted_indicator_hits, indicator_cap)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Score floor for any non-empty Japanese text
    pub base: f64,
    /// Points available from kanji density
    pub kanji_weight: f64,
    /// Kanji ratio at which the kanji term saturates
    pub kanji_saturation: f64,
    /// Points available from lexical variety
    pub chunk_weight: f64,
    /// Maximum points from indicator words
    pub indicator_cap: f64,
    /// Penalty for sparse kanji at advanced targets
    pub sparse_kanji_penalty: f64,
    /// Kanji ratio below which advanced targets are penalized
    pub sparse_kanji_ratio: f64,
    /// Kanji ratio above which beginner targets are flagged
    pub dense_kanji_ratio: f64,
    /// Indicator words per level
    pub indicators: BTreeMap<JlptLevel, Vec<String>>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        let indicators = [
            (
                JlptLevel::N5,
                &["私", "あなた", "これ", "それ", "あれ", "食べる", "飲む", "行く", "来る"][..],
            ),
            (
                JlptLevel::N4,
                &["準備", "練習", "説明", "経験", "約束", "心配", "大切"][..],
            ),
            (
                JlptLevel::N3,
                &["影響", "関係", "状況", "条件", "理由", "方法", "目的"][..],
            ),
            (
                JlptLevel::N2,
                &["実施", "促進", "改善", "対応", "検討", "確認", "調整"][..],
            ),
            (
                JlptLevel::N1,
                &["抽象的", "具体的", "概念", "把握", "懸念", "妥当", "顕著"][..],
            ),
        ]
        .into_iter()
        .map(|(level, words)| (level, words.iter().map(|w| (*w).to_owned()).collect()))
        .collect();

        Self {
            base: 55.0,
            kanji_weight: 25.0,
            kanji_saturation: 0.35,
            chunk_weight: 10.0,
            indicator_cap: 10.0,
            sparse_kanji_penalty: 10.0,
            sparse_kanji_ratio: 0.1,
            dense_kanji_ratio: 0.5,
            indicators,
        }
    }
}
