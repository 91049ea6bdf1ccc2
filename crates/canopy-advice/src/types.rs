//! Request, response and error types shared by every advisor.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the traveller tells us about the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Free-text description of the current weather.
    pub weather: String,
    pub destination: String,
    /// How the traveller gets there (walking, metro, driving...).
    pub mode: String,
}

/// Structured rainy-day checklist.
///
/// Field names follow the generative service's response schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelChecklist {
    pub weather_summary: String,
    pub gear: Vec<String>,
    pub safety_tips: Vec<String>,
    pub clothing_recommendation: String,
}

/// Who said a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One prior message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Errors from an advice or chat call.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// The advisor could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The service answered without any text.
    #[error("API returned no content")]
    EmptyResponse,
}

/// Result type for advisor calls.
pub type AdviceResult<T> = Result<T, AdviceError>;
