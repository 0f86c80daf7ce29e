// ABOUTME: Fluency analyzer configuration with response-latency bands and run-on sentence limits
// ABOUTME: Bands widen as latency grows so each extra second costs less than the one before
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};

/// A latency band: responses faster than `below_seconds` earn `score`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyBand {
    /// Exclusive upper bound in seconds
    pub below_seconds: f64,
    /// Score for this band
    pub score: f64,
}

/// Fluency Analyzer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluencyConfig {
    /// Ascending latency bands
    pub bands: Vec<LatencyBand>,
    /// Score when slower than every band
    pub slowest_score: f64,
    /// Sentence length (characters) above which an unpunctuated sentence is a run-on
    pub run_on_chars: usize,
    /// Points removed when a run-on sentence is found
    pub run_on_penalty: f64,
    /// Latency (seconds) above which a speed suggestion is given
    pub slow_response_seconds: f64,
    /// Seconds per character above which a shorter-sentence suggestion is given
    pub slow_seconds_per_char: f64,
}

impl FluencyConfig {
    /// Score for a latency in seconds
    #[must_use]
    pub fn band_score(&self, seconds: f64) -> f64 {
        self.bands
            .iter()
            .find(|band| seconds < band.below_seconds)
            .map_or(self.slowest_score, |band| band.score)
    }
}

impl Default for FluencyConfig {
    fn default() -> Self {
        let bands = [(5.0, 100.0), (10.0, 90.0), (20.0, 80.0), (30.0, 70.0), (45.0, 60.0)]
            .into_iter()
            .map(|(below_seconds, score)| LatencyBand {
                below_seconds,
                score,
            })
            .collect();
        Self {
            bands,
            slowest_score: 50.0,
            run_on_chars: 60,
            run_on_penalty: 10.0,
            slow_response_seconds: 30.0,
            slow_seconds_per_char: 2.0,
        }
    }
}
