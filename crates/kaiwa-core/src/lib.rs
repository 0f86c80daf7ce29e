// ABOUTME: Core types and constants for the kaiwa-coach Japanese proficiency platform
// ABOUTME: Foundation crate with error handling, conversation models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![deny(unsafe_code)]

//! # Kaiwa Core
//!
//! Foundation crate providing shared types for the kaiwa-coach analysis platform.
//! This crate is designed to change infrequently so the intelligence crate and the
//! application crate can compile against a stable set of models.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Conversations, messages, JLPT levels, and analysis records
//! - **constants**: Score bounds, language codes, and other shared values

/// Unified error handling system with standard error codes
pub mod errors;

/// Conversation, message, and analysis data models
pub mod models;

/// Application constants shared across crates
pub mod constants;
