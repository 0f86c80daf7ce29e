// ABOUTME: Keigo analyzer configuration with register markers, closing patterns, and penalties
// ABOUTME: Marker lists are regex sources grouped by sonkeigo, kenjougo, and teineigo register
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};

use kaiwa_core::models::ConversationMode;

/// Keigo Analyzer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeigoConfig {
    /// Marker patterns per register
    pub markers: KeigoMarkers,
    /// Sentence-final pattern for polite closings
    pub polite_closing: String,
    /// Sentence-final pattern for plain closings
    pub plain_closing: String,
    /// Over-honorific forms such as おっしゃられる
    pub double_keigo: Vec<String>,
    /// Scoring curve and penalties
    pub scoring: KeigoScoring,
    /// Modes in which the learner is expected to speak politely
    pub polite_modes: Vec<ConversationMode>,
}

/// Marker regex sources per register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeigoMarkers {
    /// Respectful forms
    pub sonkeigo: Vec<String>,
    /// Humble forms
    pub kenjougo: Vec<String>,
    /// Polite forms
    pub teineigo: Vec<String>,
}

/// Keigo scoring parameters on the 0-10 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeigoScoring {
    /// Starting score when any marker is present
    pub marker_base: f64,
    /// Starting score when no marker is present
    pub plain_base: f64,
    /// Bonus for using more than one register correctly
    pub multiple_register_bonus: f64,
    /// Bonus for honorific or humble speech where politeness is expected
    pub expected_register_bonus: f64,
    /// Penalty per sentence pairing an honorific or humble marker with a plain closing
    pub honorific_plain_closing_penalty: f64,
    /// Penalty for mixing polite and plain closings within one utterance
    pub mixed_closing_penalty: f64,
    /// Penalty per distinct double-keigo form
    pub double_keigo_penalty: f64,
    /// Penalty when the register expected by the mode is absent
    pub missing_register_penalty: f64,
}

impl Default for KeigoConfig {
    fn default() -> Self {
        Self {
            markers: KeigoMarkers::default(),
            polite_closing: "(です|ます|ました|ません|ませんでした|でした|でしょう|ましょう|ください|ございます|くださいませ)(か|ね|よ|よね)?$".into(),
            plain_closing: "(だ|だった|である|ない|なかった|た|[うくぐすつぬぶむる])(よ|ね|な|よね)?$".into(),
            double_keigo: vec![
                "おっしゃられ".into(),
                "いらっしゃられ".into(),
                "ご覧になられ".into(),
                "お召し上がりになられ".into(),
                "お\\p{Han}+になられ".into(),
            ],
            scoring: KeigoScoring::default(),
            polite_modes: vec![ConversationMode::RolePlay, ConversationMode::JlptExam],
        }
    }
}

impl Default for KeigoMarkers {
    fn default() -> Self {
        Self {
            sonkeigo: [
                "いらっしゃ",
                "おっしゃ",
                "なさい",
                "なさる",
                "なさっ",
                "くださ",
                "召し上が",
                "ご覧にな",
                "おいでにな",
                "お\\p{Han}+にな",
            ]
            .map(String::from)
            .to_vec(),
            kenjougo: [
                "いたし",
                "いたす",
                "申し上げ",
                "申し",
                "いただ",
                "頂",
                "拝見",
                "拝読",
                "お目にかか",
                "存じ",
                "参り",
                "参る",
                "伺",
            ]
            .map(String::from)
            .to_vec(),
            teineigo: ["でございます", "ございます", "です", "ます"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Default for KeigoScoring {
    fn default() -> Self {
        Self {
            marker_base: 7.0,
            plain_base: 8.0,
            multiple_register_bonus: 1.0,
            expected_register_bonus: 1.0,
            honorific_plain_closing_penalty: 2.0,
            mixed_closing_penalty: 1.5,
            double_keigo_penalty: 1.5,
            missing_register_penalty: 3.0,
        }
    }
}
