use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
    response::Response,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api::models::{
    ExtractData, ExtractRequest, HealthResponse, ScrapeData, ScrapeRequest, TaskData, TaskRequest,
};
use crate::api::response;
use crate::config::Config;
use crate::error::Result;
use crate::llm::{call_openrouter, require_api_key, ChatRequest, ResponseFormat};
use crate::prompt::build_extraction_prompt;
use crate::scraper::{fetch_page, normalize};

/// Structured extraction always runs at this temperature, whatever the caller sends.
const EXTRACTION_TEMPERATURE: f64 = 0.3;

pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(app_state.config.allowed_origin.clone()))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/fastapi/llm-task", post(llm_task_handler))
        .route("/api/fastapi/web-scrape", post(web_scrape_handler))
        .route("/api/fastapi/structured-extract", post(structured_extract_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

async fn llm_task_handler(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> Response {
    info!("LLM task with model {}", req.model);
    response::respond(process_llm_task(&state.config, &req).await)
}

async fn web_scrape_handler(Json(req): Json<ScrapeRequest>) -> Response {
    info!("Scraping URL: {}", req.url);
    response::respond(process_web_scrape(&req).await)
}

async fn structured_extract_handler(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Response {
    info!("Structured extraction with model {} ({} schema fields)", req.model, req.schema.len());
    response::respond(process_structured_extract(&state.config, req).await)
}

async fn process_llm_task(config: &Config, req: &TaskRequest) -> Result<TaskData> {
    req.validate()?;
    let api_key = require_api_key(config)?;

    let mut body = ChatRequest::user(&req.model, &req.prompt, req.temperature);
    body.max_tokens = Some(req.max_tokens);

    let content = call_openrouter(config, api_key, &body).await?.unwrap_or_default();
    info!("LLM task completed with {} chars", content.chars().count());

    Ok(TaskData {
        content,
        model: req.model.clone(),
    })
}

async fn process_web_scrape(req: &ScrapeRequest) -> Result<ScrapeData> {
    req.validate()?;

    let html = fetch_page(&req.url).await?;
    let text = normalize(&html, req.max_length);
    let length = text.chars().count();
    info!("Scraped {} chars from {}", length, req.url);

    Ok(ScrapeData {
        text,
        url: req.url.clone(),
        length,
    })
}

async fn process_structured_extract(config: &Config, req: ExtractRequest) -> Result<ExtractData> {
    let api_key = require_api_key(config)?;

    let prompt = build_extraction_prompt(&req.schema, &req.text)?;
    let mut body = ChatRequest::user(&req.model, &prompt, EXTRACTION_TEMPERATURE);
    body.response_format = Some(ResponseFormat::json_object());

    let content = call_openrouter(config, api_key, &body)
        .await?
        .unwrap_or_else(|| "{}".to_string());
    let structured_data = parse_structured(content);

    Ok(ExtractData {
        structured_data,
        schema: req.schema,
    })
}

/// Model output that is not JSON is handed back untouched under `raw`.
fn parse_structured(content: String) -> Value {
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(_) => json!({ "raw": content }),
    }
}
