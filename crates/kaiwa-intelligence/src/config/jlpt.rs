// ABOUTME: JLPT estimator configuration with grammar patterns per level, kanji bands, and thresholds
// ABOUTME: Signal weights combine grammar, kanji, and vocabulary evidence on a 0-5 scale
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! JLPT Estimator Configuration
//!
//! The combined signal lives on `[0, 5]`. Four ascending thresholds split it into
//! the five levels; a signal equal to a threshold belongs to the lower level.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kaiwa_core::models::JlptLevel;

/// Upper end of the signal scale
pub const SIGNAL_MAX: f64 = 5.0;

/// JLPT Estimator Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JlptConfig {
    /// Weight of the grammar signal
    pub grammar_weight: f64,
    /// Weight of the kanji signal
    pub kanji_weight: f64,
    /// Weight of the vocabulary signal
    pub vocabulary_weight: f64,
    /// Kanji ratios mapping to signal 1, 2, 3, 4, 5
    pub kanji_reference_ratios: [f64; 5],
    /// Band upper bounds for N5, N4, N3, N2
    pub thresholds: [f64; 4],
    /// Grammar pattern sources per level
    pub grammar_patterns: BTreeMap<JlptLevel, Vec<String>>,
    /// Sentence length reported as "long" in the indicators
    pub long_sentence_chars: usize,
}

impl Default for JlptConfig {
    fn default() -> Self {
        let grammar_patterns = [
            (
                JlptLevel::N5,
                &["です", "ます", "だ", "である", "たい", "ない", "ている"][..],
            ),
            (
                JlptLevel::N4,
                &[
                    "てください",
                    "てもいい",
                    "てはいけない",
                    "なければならない",
                    "ほうがいい",
                    "ので",
                    "から",
                    "けど",
                    "ようだ",
                    "そうだ",
                    "らしい",
                ][..],
            ),
            (
                JlptLevel::N3,
                &[
                    "ば",
                    "なら",
                    "たら",
                    "ところ",
                    "ばかり",
                    "だけ",
                    "によって",
                    "について",
                    "に対して",
                    "ように",
                    "ために",
                    "のに",
                ][..],
            ),
            (
                JlptLevel::N2,
                &[
                    "ばかりか",
                    "どころか",
                    "ばかりでなく",
                    "に限らず",
                    "に応じて",
                    "に伴って",
                    "に加えて",
                    "に代わって",
                    "に基づいて",
                    "に従って",
                    "に沿って",
                    "に反して",
                ][..],
            ),
            (
                JlptLevel::N1,
                &[
                    "を余儀なくされ",
                    "を禁じ得ない",
                    "に越したことはない",
                    "に足る",
                    "をものともせず",
                    "をよそに",
                    "を皮切りに",
                    "を機に",
                    "を問わず",
                    "を抜きにして",
                ][..],
            ),
        ]
        .into_iter()
        .map(|(level, patterns)| {
            (
                level,
                patterns.iter().map(|p| (*p).to_owned()).collect(),
            )
        })
        .collect();

        Self {
            grammar_weight: 0.4,
            kanji_weight: 0.35,
            vocabulary_weight: 0.25,
            kanji_reference_ratios: [0.10, 0.20, 0.30, 0.40, 0.50],
            thresholds: [1.0, 2.0, 3.0, 4.0],
            grammar_patterns,
            long_sentence_chars: 50,
        }
    }
}
