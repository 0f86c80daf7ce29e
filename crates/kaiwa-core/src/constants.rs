// ABOUTME: Shared constants for score bounds, language codes, and service naming
// ABOUTME: Single source for values that every crate in the workspace agrees on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

/// Score bounds for the four `AnalysisScores` dimensions
pub mod scores {
    /// Lowest score any dimension can take
    pub const SCORE_MIN: f64 = 0.0;
    /// Highest score any dimension can take
    pub const SCORE_MAX: f64 = 100.0;
    /// Lowest keigo score
    pub const KEIGO_MIN: f64 = 0.0;
    /// Highest keigo score
    pub const KEIGO_MAX: f64 = 10.0;
}

/// Language codes
pub mod languages {
    /// The only language the analyzers support
    pub const JAPANESE: &str = "ja";
}

/// Service names used in structured logs
pub mod service_names {
    /// Name of the kaiwa-coach service
    pub const KAIWA_COACH: &str = "kaiwa-coach";
}
