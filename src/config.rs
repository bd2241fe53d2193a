use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use axum::http::HeaderValue;
use crate::error::{AppError, Result};
use crate::http::LLM_TIMEOUT;

pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Checked per request; a missing key only fails the LLM endpoints.
    pub openrouter_api_key: Option<String>,
    pub openrouter_url: String,
    pub llm_timeout: Duration,
    pub referer: String,
    pub allowed_origin: HeaderValue,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openrouter_api_key = var("OPENROUTER_API_KEY").filter(|key| !key.is_empty());

        // Load server configuration with defaults
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("PORT").unwrap_or_else(|| "8000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let llm_timeout = match var("OPENROUTER_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| AppError::ConfigError(format!("Invalid OpenRouter timeout: {}", e)))?,
            None => LLM_TIMEOUT,
        };

        let origin = var("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string());
        let allowed_origin = HeaderValue::from_str(&origin)
            .map_err(|e| AppError::ConfigError(format!("Invalid CORS origin: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            openrouter_api_key,
            openrouter_url: var("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_URL.to_string()),
            llm_timeout,
            referer: var("OPENROUTER_REFERER").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string()),
            allowed_origin,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            openrouter_api_key: None,
            openrouter_url: DEFAULT_OPENROUTER_URL.to_string(),
            llm_timeout: LLM_TIMEOUT,
            referer: DEFAULT_FRONTEND_ORIGIN.to_string(),
            allowed_origin: HeaderValue::from_static(DEFAULT_FRONTEND_ORIGIN),
        }
    }
}
