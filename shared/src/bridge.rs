use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    model::{TripRequest, parse_leading_int},
    prompt::{build_system_prompt, build_user_prompt},
};

pub const DEFAULT_MAX_TOKENS: u32 = 900;
pub const TEMPERATURE: f64 = 0.8;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("To use AI, provide endpoint, model, and API key — or toggle off 'Use AI'.")]
    MissingConfig,
    #[error("AI request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("AI error: {status} — {body}")]
    Status { status: u16, body: String },
    #[error("AI response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Status and body of an HTTP response, whatever the client library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The one outbound call the bridge makes: a JSON POST with a bearer token.
pub trait HttpTransport {
    fn post_json(
        &self,
        endpoint: &str,
        api_key: &str,
        payload: &ChatRequest,
    ) -> impl Future<Output = Result<HttpReply, TransportError>>;
}

/// AI settings exactly as typed into the form.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl AiConfig {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, BridgeError> {
        let config = Self {
            endpoint: endpoint.into().trim().to_string(),
            model: model.into().trim().to_string(),
            api_key: api_key.into().trim().to_string(),
            max_tokens,
        };
        config.check()?;
        Ok(config)
    }

    pub fn from_settings(settings: &AiSettings) -> Result<Self, BridgeError> {
        let max_tokens = match parse_leading_int(&settings.max_tokens) {
            Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => DEFAULT_MAX_TOKENS,
        };
        Self::new(
            settings.endpoint.as_str(),
            settings.model.as_str(),
            settings.api_key.as_str(),
            max_tokens,
        )
    }

    fn check(&self) -> Result<(), BridgeError> {
        if self.endpoint.is_empty() || self.model.is_empty() || self.api_key.is_empty() {
            return Err(BridgeError::MissingConfig);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ChatRequest {
    pub fn for_trip(config: &AiConfig, request: &TripRequest) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: build_system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: build_user_prompt(request),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: config.max_tokens,
        }
    }
}

/// Sends the trip prompt to the configured chat-completion endpoint and
/// returns the generated text.
///
/// The configuration is checked before anything is sent, so an incomplete
/// config never reaches the network. No retry is attempted.
pub async fn call_external_generator<T: HttpTransport>(
    transport: &T,
    config: &AiConfig,
    request: &TripRequest,
) -> Result<String, BridgeError> {
    config.check()?;
    let payload = ChatRequest::for_trip(config, request);

    tracing::info!(endpoint = %config.endpoint, model = %config.model, "calling AI endpoint");
    let reply = transport
        .post_json(&config.endpoint, &config.api_key, &payload)
        .await?;

    if !reply.is_success() {
        tracing::warn!(status = reply.status, "AI endpoint returned an error status");
        return Err(BridgeError::Status {
            status: reply.status,
            body: reply.body,
        });
    }

    let data: Value = serde_json::from_str(&reply.body)?;
    Ok(extract_generated_text(&data).trim().to_string())
}

/// Pulls generated text out of a chat-completion style body.
///
/// Tries `choices[0].message.content`, then `choices[0].text`, and falls back
/// to the serialized body so unfamiliar shapes are still shown to the user.
pub fn extract_generated_text(data: &Value) -> String {
    let first = data.pointer("/choices/0");
    first
        .and_then(|c| c.pointer("/message/content"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            first
                .and_then(|c| c.get("text"))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| data.to_string())
}
