// ABOUTME: Prompt templates for reply generation and sentence correction loaded at compile time
// ABOUTME: Fills topic, JLPT level, and level guidelines into the conversation partner prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Prompts
//!
//! Templates are kept as markdown files next to this module and loaded with
//! `include_str!`. Placeholders use `{name}` and are filled by plain replacement.

use kaiwa_core::models::JlptLevel;

/// Conversation partner system prompt template
pub const PARTNER_SYSTEM_PROMPT: &str = include_str!("partner_system.md");

/// Sentence correction prompt template
pub const SENTENCE_CORRECTION_PROMPT: &str = include_str!("sentence_correction.md");

/// What the partner should use at each level, in Vietnamese
#[must_use]
pub const fn level_guidelines(level: JlptLevel) -> &'static str {
    match level {
        JlptLevel::N5 => "câu cơ bản, thì hiện tại/quá khứ, từ vựng phổ biến (～です、～ます)",
        JlptLevel::N4 => {
            "đoạn hội thoại đơn giản, thể te, các trợ từ cơ bản (～て、～から、～ので)"
        }
        JlptLevel::N3 => "chủ đề hàng ngày, thể điều kiện, từ vựng trung cấp (～ば、～たら)",
        JlptLevel::N2 => {
            "chủ đề trừu tượng, cơ bản kính ngữ, từ vựng trình độ tin tức (尊敬語、謙譲語)"
        }
        JlptLevel::N1 => "thảo luận phức tạp, kính ngữ nâng cao, từ vựng học thuật",
    }
}

/// System prompt for a conversation on `topic` at `level`
#[must_use]
pub fn build_system_prompt(topic: &str, level: JlptLevel) -> String {
    PARTNER_SYSTEM_PROMPT
        .replace("{topic}", topic)
        .replace("{level}", level.as_str())
        .replace("{guidelines}", level_guidelines(level))
}

/// Prompt asking for a JSON correction of `sentence`
#[must_use]
pub fn build_correction_prompt(sentence: &str) -> String {
    SENTENCE_CORRECTION_PROMPT.replace("{sentence}", sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_fills_placeholders() {
        let prompt = build_system_prompt("旅行", JlptLevel::N4);
        assert!(prompt.contains("Chủ đề: 旅行"));
        assert!(prompt.contains("N4 (đoạn hội thoại đơn giản"));
        assert!(!prompt.contains("{level}"));
    }
}
