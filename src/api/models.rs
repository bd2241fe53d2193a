use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_MAX_LENGTH: usize = 5000;

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_max_length() -> Option<usize> {
    Some(DEFAULT_MAX_LENGTH)
}

#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl TaskRequest {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::InvalidRequest(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(AppError::InvalidRequest("max_tokens must be positive".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    /// `null` or `0` disables truncation.
    #[serde(default = "default_max_length")]
    pub max_length: Option<usize>,
}

impl ScrapeRequest {
    pub fn validate(&self) -> Result<()> {
        let parsed = reqwest::Url::parse(&self.url)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid URL '{}': {}", self.url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::InvalidRequest(format!(
                "Invalid URL '{}': unsupported scheme {}",
                self.url, scheme
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    pub schema: Map<String, Value>,
    #[serde(default = "default_model")]
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct TaskData {
    pub content: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeData {
    pub text: String,
    pub url: String,
    pub length: usize,
}

#[derive(Debug, Serialize)]
pub struct ExtractData {
    pub structured_data: Value,
    pub schema: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: "workflow-builder-api",
        }
    }
}
