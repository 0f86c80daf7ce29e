// ABOUTME: Course catalog entries and the course recommendations derived from weak dimensions
// ABOUTME: Categories map each weak score dimension to the kind of course that trains it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{JlptLevel, ScoreDimension};

/// What a course trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    /// Grammar drills
    Grammar,
    /// Vocabulary building
    Vocabulary,
    /// Speaking speed and flow
    Fluency,
    /// Natural conversation practice
    Conversation,
}

impl CourseCategory {
    /// Category of course that trains a weak dimension
    #[must_use]
    pub const fn for_dimension(dimension: ScoreDimension) -> Self {
        match dimension {
            ScoreDimension::Grammar => Self::Grammar,
            ScoreDimension::Vocabulary => Self::Vocabulary,
            ScoreDimension::Fluency => Self::Fluency,
            ScoreDimension::Naturalness => Self::Conversation,
        }
    }
}

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// What the course trains
    pub category: CourseCategory,
    /// Level the course is written for
    #[serde(default)]
    pub level: Option<JlptLevel>,
}

impl Course {
    /// Create a course without a level
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, category: CourseCategory) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category,
            level: None,
        }
    }

    /// Set the level the course is written for
    #[must_use]
    pub const fn with_level(mut self, level: JlptLevel) -> Self {
        self.level = Some(level);
        self
    }
}

/// Why a course was recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    /// Trains a dimension scored below the weakness threshold
    Weakness(ScoreDimension),
    /// No weakness matched a course
    General,
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weakness(dimension) => f.write_str(dimension.as_str()),
            Self::General => f.write_str("general"),
        }
    }
}

/// A course suggested to the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Why it was suggested
    pub kind: RecommendationKind,
    /// Recommended course
    pub course_id: String,
    /// Japanese reason shown to the learner
    pub reason: String,
}
