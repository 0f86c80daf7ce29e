// ABOUTME: Tests for course recommendations built from weak score dimensions
// ABOUTME: Covers category matching, reason text, ordering, and the catalog fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use kaiwa_coach::models::{
    Course, CourseCategory, JlptLevel, Recommendation, RecommendationKind, ScoreDimension,
};
use kaiwa_intelligence::{CourseRecommender, IntelligenceConfig};

fn recommender() -> CourseRecommender {
    common::init_test_logging();
    CourseRecommender::from_config(&IntelligenceConfig::default())
}

fn catalog() -> Vec<Course> {
    vec![
        Course::new("c-grammar-1", "て形マスター", CourseCategory::Grammar)
            .with_level(JlptLevel::N5),
        Course::new("c-vocab", "毎日の語彙", CourseCategory::Vocabulary),
        Course::new("c-grammar-2", "敬語入門", CourseCategory::Grammar)
            .with_level(JlptLevel::N4),
        Course::new("c-talk", "日常会話", CourseCategory::Conversation),
        Course::new("c-fluency", "瞬間作文", CourseCategory::Fluency),
    ]
}

fn ids(recommendations: &[Recommendation]) -> Vec<&str> {
    recommendations.iter().map(|r| r.course_id.as_str()).collect()
}

#[test]
fn test_weakness_matches_courses_in_catalog_order() {
    let recommendations = recommender().recommend(&[ScoreDimension::Grammar], &catalog());

    assert_eq!(ids(&recommendations), vec!["c-grammar-1", "c-grammar-2"]);
    assert!(recommendations
        .iter()
        .all(|r| r.kind == RecommendationKind::Weakness(ScoreDimension::Grammar)));
    assert_eq!(recommendations[0].reason, "文法を強化しましょう");
}

#[test]
fn test_naturalness_maps_to_conversation_courses() {
    let recommendations = recommender().recommend(
        &[ScoreDimension::Fluency, ScoreDimension::Naturalness],
        &catalog(),
    );

    assert_eq!(ids(&recommendations), vec!["c-fluency", "c-talk"]);
    assert_eq!(
        recommendations[1].kind,
        RecommendationKind::Weakness(ScoreDimension::Naturalness)
    );
    assert_eq!(recommendations[1].reason, "自然な会話を強化しましょう");
}

#[test]
fn test_no_weakness_falls_back_to_leading_courses() {
    let recommendations = recommender().recommend(&[], &catalog());

    assert_eq!(
        ids(&recommendations),
        vec!["c-grammar-1", "c-vocab", "c-grammar-2"]
    );
    for recommendation in &recommendations {
        assert_eq!(recommendation.kind, RecommendationKind::General);
        assert_eq!(recommendation.reason, "学習を続けましょう");
    }
}

#[test]
fn test_unmatched_weakness_falls_back() {
    let courses = vec![Course::new("c-vocab", "毎日の語彙", CourseCategory::Vocabulary)];

    let recommendations = recommender().recommend(&[ScoreDimension::Fluency], &courses);

    assert_eq!(ids(&recommendations), vec!["c-vocab"]);
    assert_eq!(recommendations[0].kind, RecommendationKind::General);
}

#[test]
fn test_empty_catalog_recommends_nothing() {
    let recommendations = recommender().recommend(&ScoreDimension::ALL, &[]);

    assert!(recommendations.is_empty());
}

#[test]
fn test_fallback_count_is_configurable() {
    let mut config = IntelligenceConfig::default();
    config.recommendation.fallback_count = 1;

    let recommendations = CourseRecommender::from_config(&config).recommend(&[], &catalog());

    assert_eq!(ids(&recommendations), vec!["c-grammar-1"]);
}

#[test]
fn test_recommendation_kind_wire_format() {
    let weakness = serde_json::to_value(RecommendationKind::Weakness(ScoreDimension::Grammar))
        .unwrap();
    let general = serde_json::to_value(RecommendationKind::General).unwrap();

    assert_eq!(weakness, serde_json::json!({ "weakness": "grammar" }));
    assert_eq!(general, serde_json::json!("general"));
    assert_eq!(RecommendationKind::General.to_string(), "general");
}
