// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The Gemini credential is optional here: a missing key is not a startup
//! failure, it surfaces per call as a configuration error.

use std::env;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key (absent means "feature unavailable")
    pub gemini_api_key: Option<String>,
    /// Model used for every completion call
    pub gemini_model: String,
    /// Base URL of the Generative Language API
    pub gemini_base_url: String,
    /// Client-side timeout for a single completion call
    pub request_timeout_secs: u64,
    /// Quiet period before a search prediction is requested
    pub prediction_debounce_ms: u64,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if gemini_api_key.is_none() {
            tracing::warn!("No Gemini API key configured; AI features will be unavailable");
        }

        Ok(Self {
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            request_timeout_secs: parse_var("GEMINI_TIMEOUT_SECS", 30)?,
            prediction_debounce_ms: parse_var("PREDICTION_DEBOUNCE_MS", 300)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
        })
    }

    /// Config for tests: no credential, default endpoints.
    pub fn test_default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 5,
            prediction_debounce_ms: 300,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn prediction_debounce(&self) -> Duration {
        Duration::from_millis(self.prediction_debounce_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("GEMINI_API_KEY", "  test_key  ");
        env::set_var("GEMINI_BASE_URL", "http://localhost:9999/v1beta/");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.gemini_base_url, "http://localhost:9999/v1beta");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.port, 8080);
        assert_eq!(config.prediction_debounce(), Duration::from_millis(300));

        env::remove_var("GEMINI_API_KEY");
        env::remove_var("GEMINI_BASE_URL");
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("GETAWAY_TEST_NUMBER", "thirty");
        let result: Result<u64, _> = parse_var("GETAWAY_TEST_NUMBER", 30);
        assert!(matches!(result, Err(ConfigError::Invalid("GETAWAY_TEST_NUMBER", _))));
        env::remove_var("GETAWAY_TEST_NUMBER");
    }
}
