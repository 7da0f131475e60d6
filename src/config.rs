//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration management for the case law assistant, supporting
//! configuration files and environment variables with validation and type-safe
//! access to all system settings.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables, CLI arguments
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Type checking, range validation
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Command line arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration files
//! 4. Default values (lowest priority)
//!
//! The generative API key is deliberately environment-only by default
//! (`ANTHROPIC_API_KEY`), so it never has to live in a checked-in TOML file.

use crate::errors::{AssistError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server and API configuration
    pub server: ServerConfig,
    /// Generative-text service configuration
    pub generative: GenerativeConfig,
    /// Search behavior
    pub search: SearchConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Origins allowed by CORS (web frontend dev servers by default)
    pub cors_origins: Vec<String>,
}

/// Generative-text service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerativeConfig {
    /// Messages API base URL
    pub api_url: String,
    /// API key; absent means the service is unavailable and every
    /// summarization/report call degrades to fallback content
    pub api_key: Option<String>,
    /// API version header value
    pub api_version: String,
    /// Model used for per-case summaries
    pub summary_model: String,
    /// Token budget for per-case summaries
    pub summary_max_tokens: u32,
    /// Sampling temperature for per-case summaries
    pub summary_temperature: f32,
    /// Model used for actionable reports
    pub report_model: String,
    /// Token budget for actionable reports
    pub report_max_tokens: u32,
    /// Sampling temperature for actionable reports
    pub report_temperature: f32,
    /// Per-call timeout in seconds; a timed-out call is treated as unavailable
    pub request_timeout_seconds: u64,
}

/// Search behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Default maximum number of ranked results
    pub default_max_results: usize,
    /// Maximum refinement suggestions returned with a clarification
    pub max_suggestions: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| AssistError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;
            toml::from_str(&content).map_err(|e| AssistError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("CASELAW_ASSIST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CASELAW_ASSIST_PORT") {
            self.server.port = port.parse().map_err(|_| AssistError::Config {
                message: "Invalid port number in CASELAW_ASSIST_PORT".to_string(),
            })?;
        }
        if let Ok(level) = std::env::var("CASELAW_ASSIST_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(url) = std::env::var("CASELAW_ASSIST_API_URL") {
            self.generative.api_url = url;
        }
        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            if !api_key.trim().is_empty() {
                self.generative.api_key = Some(api_key);
            }
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AssistError::ValidationFailed {
                field: "server.port".to_string(),
                reason: "Port cannot be zero".to_string(),
            });
        }

        if self.search.default_max_results == 0 {
            return Err(AssistError::ValidationFailed {
                field: "search.default_max_results".to_string(),
                reason: "Must return at least one result".to_string(),
            });
        }

        if self.search.max_suggestions == 0 {
            return Err(AssistError::ValidationFailed {
                field: "search.max_suggestions".to_string(),
                reason: "Clarifications must carry at least one suggestion".to_string(),
            });
        }

        if self.generative.request_timeout_seconds == 0 {
            return Err(AssistError::ValidationFailed {
                field: "generative.request_timeout_seconds".to_string(),
                reason: "Timeout must be greater than zero".to_string(),
            });
        }

        for (field, temp) in [
            ("generative.summary_temperature", self.generative.summary_temperature),
            ("generative.report_temperature", self.generative.report_temperature),
        ] {
            if !(0.0..=1.0).contains(&temp) {
                return Err(AssistError::ValidationFailed {
                    field: field.to_string(),
                    reason: format!("Temperature {} outside [0.0, 1.0]", temp),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generative: GenerativeConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            enable_cors: true,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:5174".to_string(),
                "http://127.0.0.1:5174".to_string(),
            ],
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com".to_string(),
            api_key: None,
            api_version: "2023-06-01".to_string(),
            summary_model: "claude-3-5-haiku-20241022".to_string(),
            summary_max_tokens: 1000,
            summary_temperature: 0.3,
            report_model: "claude-sonnet-4-20250514".to_string(),
            report_max_tokens: 2000,
            report_temperature: 0.2,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: 10,
            max_suggestions: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::from_file("/nonexistent/config.toml").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.search.default_max_results, 10);
        assert_eq!(config.generative.summary_model, "claude-3-5-haiku-20241022");
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9001\n\n[search]\ndefault_max_results = 5\n"
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.search.default_max_results, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.generative.request_timeout_seconds, 30);
    }

    #[test]
    fn zero_port_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0\n").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generative]\nsummary_temperature = 1.5\n").unwrap();

        assert!(Config::from_file(file.path()).is_err());
    }
}
