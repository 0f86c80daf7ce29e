// ABOUTME: Unit tests for server and logging configuration loaded from the environment
// ABOUTME: Validates defaults, overrides, invalid values, and intelligence config file loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use kaiwa_coach::config::{Environment, ServerConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use kaiwa_coach::errors::ErrorCode;
use kaiwa_coach::logging::{LogFormat, LoggingConfig};
use kaiwa_intelligence::ConfigError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const SERVER_VARS: [&str; 3] = [
    "KAIWA_REQUEST_TIMEOUT_SECS",
    "ENVIRONMENT",
    "KAIWA_INTELLIGENCE_CONFIG",
];

fn clear_server_env() {
    for var in SERVER_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_server_config_defaults() {
    clear_server_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
    assert!(config.intelligence_config_path.is_none());
    assert_eq!(config.supported_language, "ja");
}

#[test]
#[serial]
fn test_server_config_overrides() {
    clear_server_env();
    env::set_var("KAIWA_REQUEST_TIMEOUT_SECS", "5");
    env::set_var("ENVIRONMENT", "production");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert!(config.environment.is_production());
    assert!(config.summary().contains("Request Timeout: 5s"));

    clear_server_env();
}

#[test]
#[serial]
fn test_invalid_timeout_is_config_error() {
    clear_server_env();
    env::set_var("KAIWA_REQUEST_TIMEOUT_SECS", "soon");
    let error = ServerConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);

    env::set_var("KAIWA_REQUEST_TIMEOUT_SECS", "0");
    assert!(ServerConfig::from_env().is_err());

    clear_server_env();
}

#[test]
#[serial]
fn test_intelligence_config_loaded_from_file() {
    clear_server_env();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"version": "file-config-7"}}"#).unwrap();
    env::set_var("KAIWA_INTELLIGENCE_CONFIG", file.path());

    let config = ServerConfig::from_env().unwrap();
    let intelligence = config.load_intelligence_config().unwrap();

    assert_eq!(intelligence.version, "file-config-7");
    assert!(config.summary().contains(&file.path().display().to_string()));

    clear_server_env();
}

#[test]
#[serial]
fn test_missing_intelligence_config_file() {
    clear_server_env();
    let config = ServerConfig {
        intelligence_config_path: Some("/nonexistent/kaiwa/intelligence.json".into()),
        ..ServerConfig::default()
    };

    let result = config.load_intelligence_config();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "kaiwa-test");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_thread);
    assert_eq!(config.service_name, "kaiwa-test");

    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
    env::remove_var("SERVICE_NAME");
}

#[test]
#[serial]
fn test_logging_config_development_defaults() {
    for var in [
        "LOG_FORMAT",
        "ENVIRONMENT",
        "SERVICE_NAME",
        "LOG_INCLUDE_LOCATION",
        "LOG_INCLUDE_THREAD",
        "LOG_INCLUDE_SPANS",
    ] {
        env::remove_var(var);
    }

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Pretty);
    assert!(!config.include_location);
    assert!(!config.include_spans);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, "kaiwa-coach");
}
