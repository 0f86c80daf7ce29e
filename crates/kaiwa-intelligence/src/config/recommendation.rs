// ABOUTME: Course recommendation settings with the reason templates shown to the learner
// ABOUTME: Controls how many catalog courses are offered when no weakness matches a course
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the weak area's label in `weakness_reason`
pub const AREA_PLACEHOLDER: &str = "{area}";

/// Recommendation Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Reason for a course that trains a weak dimension
    pub weakness_reason: String,
    /// Reason for a catalog course offered when nothing matched
    pub fallback_reason: String,
    /// Number of leading catalog courses offered when nothing matched
    pub fallback_count: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            weakness_reason: format!("{AREA_PLACEHOLDER}を強化しましょう"),
            fallback_reason: "学習を続けましょう".to_owned(),
            fallback_count: 3,
        }
    }
}
