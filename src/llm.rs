use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::http;

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self { kind: "json_object" }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl<'a> ChatRequest<'a> {
    /// A request carrying a single user message.
    pub fn user(model: &'a str, prompt: &'a str, temperature: f64) -> Self {
        Self {
            model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens: None,
            response_format: None,
        }
    }
}

/// Returns the API key, failing when the service runs without one.
pub fn require_api_key(config: &Config) -> Result<&str> {
    config.openrouter_api_key.as_deref().ok_or(AppError::MissingApiKey)
}

/// Sends a chat completion and returns the first choice's message content,
/// if the upstream produced one.
pub async fn call_openrouter(config: &Config, api_key: &str, body: &ChatRequest<'_>) -> Result<Option<String>> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("http-referer", header_value(&config.referer)?);

    let body = serde_json::to_value(body)?;
    let response = http::send(
        Method::POST,
        &config.openrouter_url,
        headers,
        Some(&body),
        config.llm_timeout,
        false,
    )
    .await
    .map_err(AppError::from_upstream)?;

    let json: Value = serde_json::from_slice(&response.body)?;
    let content = first_choice_content(&json);
    debug!("LLM replied with {} chars", content.map_or(0, str::len));
    Ok(content.map(str::to_string))
}

fn first_choice_content(json: &Value) -> Option<&str> {
    json["choices"][0]["message"]["content"].as_str()
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| AppError::Other(format!("Invalid header value: {}", e)))
}
