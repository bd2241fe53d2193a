pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod prompt;
pub mod scraper;

use std::sync::Arc;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
