//! Advisor configuration parsed from environment variables.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The environment variable holding the API key is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl AdviceTimeouts {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for AdviceTimeouts {
    fn default() -> Self {
        Self {
            request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: AdviceTimeouts,
}

impl AdviceConfig {
    /// Config with default model, endpoint and timeouts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: AdviceTimeouts::default(),
        }
    }

    /// Build typed config from environment variables.
    ///
    /// - `CANOPY_ADVICE_API_KEY_ENV`: names the env var holding the key
    ///   (default `GEMINI_API_KEY`)
    /// - `CANOPY_ADVICE_MODEL`: default `gemini-2.5-flash`
    /// - `CANOPY_ADVICE_BASE_URL`: default public endpoint
    /// - `CANOPY_ADVICE_TIMEOUT_SECS`: request timeout, default 60
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key_var = lookup("CANOPY_ADVICE_API_KEY_ENV").unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
        let api_key = lookup(&key_var)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey { var: key_var.clone() })?;

        let model = lookup("CANOPY_ADVICE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = lookup("CANOPY_ADVICE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let request_secs = match lookup("CANOPY_ADVICE_TIMEOUT_SECS") {
            Some(raw) => parse_secs(&raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeouts: AdviceTimeouts {
                request_secs,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
        })
    }
}

fn parse_secs(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(ConfigError::Parse(format!(
            "CANOPY_ADVICE_TIMEOUT_SECS must be a positive number of seconds, got '{raw}'"
        ))),
        Ok(secs) => Ok(secs),
    }
}
