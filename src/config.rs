// src/config.rs
// Startup configuration. Built once from the process environment and passed
// by reference into the gateway - no ambient mutable state.

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API credential, from GEMINI_API_KEY.
    pub api_key: String,
    /// Model to query, e.g. "gemini-2.5-flash".
    pub model: String,
    /// API base URL. Overridable so tests never talk to the real service.
    pub endpoint: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY not found in environment variables")]
    MissingApiKey,
}

impl AppConfig {
    /// Read configuration from the environment. A missing API key is fatal
    /// for the whole program, before any request is attempted. Call
    /// `dotenv::dotenv()` beforehand if a .env file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            model,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Construct a config directly, bypassing the environment.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_construction() {
        let config = AppConfig::new("key-123", DEFAULT_MODEL, DEFAULT_ENDPOINT);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.endpoint.starts_with("https://generativelanguage"));
    }

    #[test]
    fn test_from_env_round_trip() {
        // Set and clear in one test so parallel test threads never race on
        // the same variable.
        std::env::set_var("GEMINI_API_KEY", "test-key");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        std::env::remove_var("GEMINI_API_KEY");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));
    }
}
