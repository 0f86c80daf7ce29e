// ABOUTME: Course recommender matching weak score dimensions to catalog courses
// ABOUTME: Falls back to the first catalog courses when no weakness has a matching course
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use tracing::debug;

use kaiwa_core::models::{
    Course, CourseCategory, Recommendation, RecommendationKind, ScoreDimension,
};

use crate::config::recommendation::AREA_PLACEHOLDER;
use crate::config::{IntelligenceConfig, RecommendationConfig};

/// Japanese label of a dimension used in recommendation reasons
const fn area_label(dimension: ScoreDimension) -> &'static str {
    match dimension {
        ScoreDimension::Grammar => "文法",
        ScoreDimension::Vocabulary => "語彙",
        ScoreDimension::Fluency => "流暢さ",
        ScoreDimension::Naturalness => "自然な会話",
    }
}

/// Suggests catalog courses for a learner's weaknesses
#[derive(Debug, Clone)]
pub struct CourseRecommender {
    config: RecommendationConfig,
}

impl CourseRecommender {
    /// Build from recommendation settings
    #[must_use]
    pub const fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Build from the full configuration
    #[must_use]
    pub fn from_config(config: &IntelligenceConfig) -> Self {
        Self::new(config.recommendation.clone())
    }

    /// Courses for each weakness in order, catalog order within a weakness
    ///
    /// When no course matches any weakness (including when there are no
    /// weaknesses), the first `fallback_count` catalog courses are returned as
    /// general recommendations.
    #[must_use]
    pub fn recommend(
        &self,
        weaknesses: &[ScoreDimension],
        courses: &[Course],
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = weaknesses
            .iter()
            .flat_map(|dimension| {
                let category = CourseCategory::for_dimension(*dimension);
                let reason = self
                    .config
                    .weakness_reason
                    .replace(AREA_PLACEHOLDER, area_label(*dimension));
                courses
                    .iter()
                    .filter(move |course| course.category == category)
                    .map(move |course| Recommendation {
                        kind: RecommendationKind::Weakness(*dimension),
                        course_id: course.id.clone(),
                        reason: reason.clone(),
                    })
            })
            .collect();

        if recommendations.is_empty() {
            recommendations = courses
                .iter()
                .take(self.config.fallback_count)
                .map(|course| Recommendation {
                    kind: RecommendationKind::General,
                    course_id: course.id.clone(),
                    reason: self.config.fallback_reason.clone(),
                })
                .collect();
        }

        debug!(
            weaknesses = weaknesses.len(),
            recommendations = recommendations.len(),
            "Course recommendations built"
        );
        recommendations
    }
}
