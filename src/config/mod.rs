// ABOUTME: Configuration module for service settings and analysis configuration
// ABOUTME: Re-exports the environment config and the intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Configuration module for kaiwa-coach
//!
//! - **Environment**: service configuration from environment variables
//! - **Intelligence**: analyzer weights, rule tables, and JLPT bands, re-exported
//!   from `kaiwa-intelligence`

/// Environment and service configuration
pub mod environment;

pub use environment::{Environment, ServerConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use kaiwa_intelligence::config::{ConfigError, IntelligenceConfig};
