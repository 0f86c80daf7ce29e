// ABOUTME: Application error types re-exported from the core crate
// ABOUTME: Keeps crate::errors paths stable for services, storage, and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! # Unified Error Handling
//!
//! All fallible operations in this crate return [`AppResult`]. Configuration
//! problems surface as [`ConfigError`] and convert into [`AppError`] with `?`.

pub use kaiwa_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use kaiwa_intelligence::config::ConfigError;
