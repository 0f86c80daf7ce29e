// ABOUTME: JLPT level and conversation mode enumerations with strict parsing
// ABOUTME: JlptLevel is totally ordered from N5 (beginner) up to N1 (most advanced)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Japanese-Language Proficiency Test level
///
/// Variants are declared from least to most advanced so the derived `Ord`
/// gives `N5 < N4 < N3 < N2 < N1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    /// Beginner
    N5,
    /// Elementary
    N4,
    /// Intermediate
    N3,
    /// Upper intermediate
    N2,
    /// Advanced
    N1,
}

impl JlptLevel {
    /// All levels in ascending order of difficulty
    pub const ALL: [Self; 5] = [Self::N5, Self::N4, Self::N3, Self::N2, Self::N1];

    /// Rank from 1 (N5) to 5 (N1)
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::N5 => 1,
            Self::N4 => 2,
            Self::N3 => 3,
            Self::N2 => 4,
            Self::N1 => 5,
        }
    }

    /// Level for a zero-based band index, clamped to the valid range
    #[must_use]
    pub const fn from_band_index(index: usize) -> Self {
        match index {
            0 => Self::N5,
            1 => Self::N4,
            2 => Self::N3,
            3 => Self::N2,
            _ => Self::N1,
        }
    }

    /// Canonical tag ("N5" .. "N1")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::N5 => "N5",
            Self::N4 => "N4",
            Self::N3 => "N3",
            Self::N2 => "N2",
            Self::N1 => "N1",
        }
    }

    /// Beginner levels expect the learner to stay in です/ます form
    #[must_use]
    pub const fn is_beginner(self) -> bool {
        matches!(self, Self::N5 | Self::N4)
    }

    /// Advanced levels expect kanji-rich vocabulary
    #[must_use]
    pub const fn is_advanced(self) -> bool {
        matches!(self, Self::N2 | Self::N1)
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JlptLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N5" => Ok(Self::N5),
            "N4" => Ok(Self::N4),
            "N3" => Ok(Self::N3),
            "N2" => Ok(Self::N2),
            "N1" => Ok(Self::N1),
            other => Err(AppError::invalid_input(format!(
                "Unknown JLPT level '{other}', expected one of N5, N4, N3, N2, N1"
            ))),
        }
    }
}

/// Practice mode chosen when a conversation is created
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConversationMode {
    /// Guided speaking drills
    #[default]
    SpeakingPractice,
    /// Scenario role play (e.g. customer talking to staff)
    RolePlay,
    /// Exam-style question and answer
    JlptExam,
    /// Unstructured chat
    FreeConversation,
}

impl ConversationMode {
    /// Wire name of the mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeakingPractice => "speaking_practice",
            Self::RolePlay => "role_play",
            Self::JlptExam => "jlpt_exam",
            Self::FreeConversation => "free_conversation",
        }
    }
}

impl fmt::Display for ConversationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "speaking_practice" => Ok(Self::SpeakingPractice),
            "role_play" => Ok(Self::RolePlay),
            "jlpt_exam" => Ok(Self::JlptExam),
            "free_conversation" => Ok(Self::FreeConversation),
            other => Err(AppError::invalid_input(format!(
                "Unknown conversation mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_beginner_first() {
        assert!(JlptLevel::N5 < JlptLevel::N4);
        assert!(JlptLevel::N2 < JlptLevel::N1);
        assert_eq!(JlptLevel::ALL.iter().max(), Some(&JlptLevel::N1));
    }

    #[test]
    fn test_level_parsing_rejects_unknown_tags() {
        assert_eq!("n3".parse::<JlptLevel>().ok(), Some(JlptLevel::N3));
        assert!("N6".parse::<JlptLevel>().is_err());
        assert!("".parse::<JlptLevel>().is_err());
    }
}
