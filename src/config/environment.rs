// ABOUTME: Environment configuration for the analysis service and CLI
// ABOUTME: Reads deployment mode, provider timeout, and the intelligence config location from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kaiwa-coach contributors

//! Environment-based service configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use kaiwa_core::constants::{languages, service_names};
use kaiwa_core::errors::{AppError, AppResult};
use kaiwa_intelligence::config::{ConfigError, IntelligenceConfig};

/// Default timeout for reply-generator calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Service name used in logs
    pub service_name: String,
    /// Service version (from Cargo.toml)
    pub service_version: String,
    /// Deployment environment
    pub environment: Environment,
    /// Upper bound for each reply-generator call
    pub request_timeout: Duration,
    /// Optional JSON file with intelligence configuration overrides
    pub intelligence_config_path: Option<PathBuf>,
    /// Only conversation language accepted
    pub supported_language: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service_name: service_names::KAIWA_COACH.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: Environment::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            intelligence_config_path: None,
            supported_language: languages::JAPANESE.into(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable holds an invalid value
    pub fn from_env() -> AppResult<Self> {
        let timeout_secs = match env::var("KAIWA_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::config(format!("Invalid KAIWA_REQUEST_TIMEOUT_SECS: {raw}"))
                    .with_source(e)
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let config = Self {
            environment: Environment::from_str_or_default(
                &env::var("ENVIRONMENT").unwrap_or_default(),
            ),
            request_timeout: Duration::from_secs(timeout_secs),
            intelligence_config_path: env::var("KAIWA_INTELLIGENCE_CONFIG")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ..Self::default()
        };

        config.validate()?;
        info!(
            environment = %config.environment,
            timeout_secs,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero timeout or a non-Japanese language
    pub fn validate(&self) -> AppResult<()> {
        if self.request_timeout.is_zero() {
            return Err(AppError::config(
                "KAIWA_REQUEST_TIMEOUT_SECS must be greater than zero",
            ));
        }
        if self.supported_language != languages::JAPANESE {
            return Err(AppError::config(format!(
                "Unsupported analysis language: {}",
                self.supported_language
            )));
        }
        Ok(())
    }

    /// Load the intelligence configuration
    ///
    /// Reads the configured JSON file when one is set, otherwise uses the built-in
    /// defaults. Environment overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the configuration is invalid
    pub fn load_intelligence_config(&self) -> Result<IntelligenceConfig, ConfigError> {
        match &self.intelligence_config_path {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|e| {
                    ConfigError::Parse(format!("Cannot read {}: {e}", path.display()))
                })?;
                IntelligenceConfig::from_json_str(&json)
            }
            None => IntelligenceConfig::load(),
        }
    }

    /// Summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Kaiwa Coach Configuration:\n\
             - Environment: {}\n\
             - Request Timeout: {}s\n\
             - Intelligence Config: {}\n\
             - Language: {}",
            self.environment,
            self.request_timeout.as_secs(),
            self.intelligence_config_path
                .as_ref()
                .map_or_else(|| "built-in defaults".to_owned(), |p| p.display().to_string()),
            self.supported_language
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PRODUCTION"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        config.request_timeout = Duration::from_secs(5);
        config.supported_language = "en".into();
        assert!(config.validate().is_err());
    }
}
