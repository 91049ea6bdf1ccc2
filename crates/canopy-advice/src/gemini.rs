//! Client for the generative-text service's `generateContent` endpoint.
//!
//! Each call is one blocking request with no retry. Travel advice asks for a
//! JSON response constrained by a schema; chat sends the prior turns plus
//! the new message under a fixed system instruction.

use crate::Advisor;
use crate::config::AdviceConfig;
use crate::types::{AdviceError, AdviceResult, ChatRole, ChatTurn, TravelChecklist, TravelRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const CHAT_INSTRUCTION: &str = "\
You are RainGuard, an assistant that helps people travel safely and stay dry in the rain.
Draw on these abilities in the conversation:
1. Driest routes: prefer underground passages, mall walkways and covered streets.
2. Shelter spots: suggest nearby malls, convenience stores and metro stations to wait out the rain.
3. Travel advice: depending on how hard it rains, suggest delaying the trip or switching transport.
4. Safety: warn about flooded stretches, vehicle blind spots and slippery surfaces.
5. Rain gear: point out nearby shared-umbrella stations.
Under an orange or red rainstorm warning, strongly advise staying indoors.
Keep answers short, warm and practical.";

/// Calls the hosted model over HTTPS.
pub struct GeminiAdvisor {
    http: reqwest::blocking::Client,
    config: AdviceConfig,
}

impl GeminiAdvisor {
    /// Build a client for `config`.
    pub fn new(config: AdviceConfig) -> AdviceResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| AdviceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Build a client configured from environment variables.
    pub fn from_env() -> AdviceResult<Self> {
        Self::new(AdviceConfig::from_env()?)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn generate(&self, body: &GenerateRequest<'_>) -> AdviceResult<String> {
        let url = format!("{}/models/{}:generateContent", self.config.base_url, self.config.model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .map_err(|e| AdviceError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| AdviceError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(AdviceError::ApiResponse { status, body: text });
        }
        parse_response_text(&text)
    }
}

impl Advisor for GeminiAdvisor {
    fn travel_advice(&self, request: &TravelRequest) -> AdviceResult<TravelChecklist> {
        let text = self.generate(&advice_request(request))?;
        parse_checklist(&text)
    }

    fn chat(&self, history: &[ChatTurn], message: &str) -> AdviceResult<String> {
        self.generate(&chat_request(history, message))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: std::borrow::Cow<'a, str>,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'static str>, text: impl Into<std::borrow::Cow<'a, str>>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn advice_prompt(request: &TravelRequest) -> String {
    format!(
        "Current weather: {}.\n\
         Trip: heading to {} by {}.\n\
         Write a rainy-day travel checklist with safety advice.\n\
         Focus on getting as little rain as possible and on safety first.\n\
         Include:\n\
         1. A short weather summary (how it feels, chance of rain)\n\
         2. Gear to bring (umbrella, non-slip shoes, waterproof bags...)\n\
         3. Safety tips for this way of travelling (avoid standing water, slow down...)\n\
         4. What to wear",
        request.weather, request.destination, request.mode
    )
}

fn checklist_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "weatherSummary": { "type": "STRING" },
            "gear": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Items to bring on the trip"
            },
            "safetyTips": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Safety tips for this trip"
            },
            "clothingRecommendation": { "type": "STRING", "description": "What to wear" }
        }
    })
}

fn advice_request(request: &TravelRequest) -> GenerateRequest<'static> {
    GenerateRequest {
        system_instruction: None,
        contents: vec![Content::text(Some(ChatRole::User.as_str()), advice_prompt(request))],
        generation_config: Some(json!({
            "responseMimeType": "application/json",
            "responseSchema": checklist_schema(),
        })),
    }
}

fn chat_request<'a>(history: &'a [ChatTurn], message: &'a str) -> GenerateRequest<'a> {
    let mut contents: Vec<Content<'a>> = history
        .iter()
        .map(|turn| Content::text(Some(turn.role.as_str()), turn.text.as_str()))
        .collect();
    contents.push(Content::text(Some(ChatRole::User.as_str()), message));
    GenerateRequest {
        system_instruction: Some(Content::text(None, CHAT_INSTRUCTION)),
        contents,
        generation_config: None,
    }
}

/// Concatenated text of the first candidate.
fn parse_response_text(body: &str) -> AdviceResult<String> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| AdviceError::ApiParse(e.to_string()))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AdviceError::EmptyResponse);
    }
    Ok(text)
}

fn parse_checklist(text: &str) -> AdviceResult<TravelChecklist> {
    serde_json::from_str(text).map_err(|e| AdviceError::ApiParse(e.to_string()))
}
