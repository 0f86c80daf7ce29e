// ABOUTME: Loosely typed score-like value as it arrives from reply providers and stored documents
// ABOUTME: Holds either a native number or text so coercion can happen at the arithmetic boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

use serde::{Deserialize, Serialize};

/// A score or latency value whose upstream type is not guaranteed
///
/// Providers sometimes answer `"score": "85"` instead of `"score": 85`. Both shapes
/// deserialize into this type; absence is modelled with `Option<ScoreValue>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    /// Native JSON number
    Number(f64),
    /// Anything that arrived as a string
    Text(String),
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ScoreValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for ScoreValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ScoreValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
