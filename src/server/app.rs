//! Axum app: shared state, router and the two handlers.
//!
//! `GET /` is a static liveness check. `POST /search` checks the service secret,
//! pulls the provider keys out of the headers, builds an agent bound to them and
//! forwards the query.

use crate::core::{AgentFactory, ProviderKeys, SearchRequest, SearchResponse};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::validate_non_empty_string;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::Instrument;
use uuid::Uuid;

pub const SERVICE_KEY_HEADER: &str = "x-api-key";
pub const SERPER_KEY_HEADER: &str = "serper-api-key";
pub const OPENROUTER_KEY_HEADER: &str = "openrouter-api-key";

/// Shared state. Holds no per-tenant data: provider keys live only inside one request.
#[derive(Clone)]
pub struct AppState {
    pub factory: Arc<dyn AgentFactory>,
    pub service_secret: String,
}

impl AppState {
    pub fn new(factory: Arc<dyn AgentFactory>, service_secret: impl Into<String>) -> Self {
        Self {
            factory,
            service_secret: service_secret.into(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/search", post(search_handler))
        .with_state(state)
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Deep search gateway is running",
        "status": "ok",
    }))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// 先驗證服務密鑰 (401)，再檢查兩把供應商金鑰 (400)
pub fn extract_credentials(headers: &HeaderMap, service_secret: &str) -> Result<ProviderKeys> {
    match header_value(headers, SERVICE_KEY_HEADER) {
        Some(key) if bool::from(key.as_bytes().ct_eq(service_secret.as_bytes())) => {}
        _ => return Err(GatewayError::Unauthorized),
    }

    let serper = header_value(headers, SERPER_KEY_HEADER);
    let openrouter = header_value(headers, OPENROUTER_KEY_HEADER);

    match (serper, openrouter) {
        (Some(serper), Some(openrouter)) => Ok(ProviderKeys {
            serper: serper.to_string(),
            openrouter: openrouter.to_string(),
        }),
        _ => {
            let missing: Vec<&str> = [
                (SERPER_KEY_HEADER, serper.is_none()),
                (OPENROUTER_KEY_HEADER, openrouter.is_none()),
            ]
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect();
            Err(GatewayError::MissingCredentialError {
                headers: missing.join(", "),
            })
        }
    }
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("search", %request_id);
    handle_search(&state, &headers, body)
        .instrument(span)
        .await
}

async fn handle_search(
    state: &AppState,
    headers: &HeaderMap,
    body: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>> {
    let keys = extract_credentials(headers, &state.service_secret)
        .inspect_err(|e| tracing::warn!("Rejected search request: {}", e))?;

    // body 解析失敗也要回 {"detail": ...}，保留 axum 判定的狀態碼
    let Json(request) = body
        .map_err(|rejection| GatewayError::RequestBodyError {
            status: rejection.status().as_u16(),
            message: rejection.body_text(),
        })
        .inspect_err(|e| tracing::warn!("Rejected search request: {}", e))?;

    validate_non_empty_string("query", &request.query).map_err(|_| {
        GatewayError::ValidationError {
            message: "query must not be empty".to_string(),
        }
    })?;

    tracing::info!(
        "Processing search query ({} chars)",
        request.query.chars().count()
    );

    match run_agent(state, &keys, &request.query).await {
        Ok(answer) => {
            tracing::info!("Search completed");
            Ok(Json(SearchResponse::success(answer)))
        }
        Err(e) => {
            tracing::error!("Search failed: {} (Category: {:?})", e, e.category());
            Err(e)
        }
    }
}

async fn run_agent(state: &AppState, keys: &ProviderKeys, query: &str) -> Result<String> {
    let agent = state.factory.build(keys)?;
    agent.ask(query).await
}
