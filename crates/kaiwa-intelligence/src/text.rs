// ABOUTME: Japanese text metrics shared by the analyzers: script classes, ratios, and segmentation
// ABOUTME: Sentences split on Japanese and ASCII terminators; chunks are runs of kanji or katakana
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

/// Sentence terminators
const SENTENCE_TERMINATORS: [char; 7] = ['。', '．', '！', '？', '!', '?', '\n'];

/// Kanji (CJK unified ideographs, extension A, and the iteration mark 々)
#[must_use]
pub const fn is_kanji(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '々')
}

/// Hiragana
#[must_use]
pub const fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{309F}')
}

/// Katakana, including the prolonged sound mark
#[must_use]
pub const fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

/// Any Japanese script character
#[must_use]
pub const fn is_japanese(c: char) -> bool {
    is_kanji(c) || is_hiragana(c) || is_katakana(c)
}

/// Characters that carry content (letters, digits, kana, kanji)
fn letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| c.is_alphanumeric())
}

fn ratio_of(text: &str, predicate: fn(char) -> bool) -> f64 {
    let (hits, total) = letters(text).fold((0_usize, 0_usize), |(hits, total), c| {
        (hits + usize::from(predicate(c)), total + 1)
    });
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

/// Share of kanji among content characters, 0 for text without any
#[must_use]
pub fn kanji_ratio(text: &str) -> f64 {
    ratio_of(text, is_kanji)
}

/// Share of Japanese script among content characters
#[must_use]
pub fn japanese_ratio(text: &str) -> f64 {
    ratio_of(text, is_japanese)
}

/// Whether text is non-empty and predominantly Japanese
#[must_use]
pub fn looks_japanese(text: &str, min_ratio: f64) -> bool {
    letters(text).next().is_some() && japanese_ratio(text) >= min_ratio
}

/// Number of content characters
#[must_use]
pub fn content_length(text: &str) -> usize {
    letters(text).count()
}

/// Split text into trimmed sentences without their terminators
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(|c| SENTENCE_TERMINATORS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Maximal runs of kanji or katakana, the content-word approximation used for lexical variety
#[must_use]
pub fn lexical_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (idx, c) in text.char_indices() {
        let class = if is_kanji(c) {
            Some(true)
        } else if is_katakana(c) {
            Some(false)
        } else {
            None
        };
        match (start, class) {
            (Some((begin, was_kanji)), Some(now_kanji)) if was_kanji != now_kanji => {
                chunks.push(&text[begin..idx]);
                start = Some((idx, now_kanji));
            }
            (Some((begin, _)), None) => {
                chunks.push(&text[begin..idx]);
                start = None;
            }
            (None, Some(now_kanji)) => start = Some((idx, now_kanji)),
            _ => {}
        }
    }
    if let Some((begin, _)) = start {
        chunks.push(&text[begin..]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_drops_terminators() {
        let sentences = split_sentences("昨日、日本へ行きました。楽しかった！\n また行きたい？");
        assert_eq!(sentences, vec!["昨日、日本へ行きました", "楽しかった", "また行きたい"]);
    }

    #[test]
    fn test_lexical_chunks_split_on_script_change() {
        let chunks = lexical_chunks("私はコーヒーを飲みます");
        assert_eq!(chunks, vec!["私", "コーヒー", "飲"]);
    }

    #[test]
    fn test_ratios_ignore_punctuation() {
        assert!((kanji_ratio("日本、。") - 1.0).abs() < f64::EPSILON);
        assert!(kanji_ratio("。、").abs() < f64::EPSILON);
        assert!(looks_japanese("こんにちは", 0.3));
        assert!(!looks_japanese("hello world", 0.3));
        assert!(!looks_japanese("   ", 0.0));
    }
}
