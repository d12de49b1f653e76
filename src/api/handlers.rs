//! API Handlers
//!
//! HTTP request handlers for each endpoint. Handlers only extract input,
//! call the store or proxy, and shape the JSON envelope; every failure is a
//! `KeeperError` rendered at this boundary.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;

use crate::api::CorsPolicy;
use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::error::{KeeperError, Result};
use crate::models::{
    DeleteResponse, ErrorResponse, FetchResponse, KeyQuery, LoadResponse, SaveRequest,
    SaveResponse, UrlQuery,
};
use crate::proxy::FetchProxy;
use crate::store::{Deletion, DocumentStore};

/// Application state shared across all handlers.
///
/// Holds the long-lived store and proxy clients, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub proxy: FetchProxy,
    pub cors: CorsPolicy,
    /// Report 404 when deleting a key that holds nothing
    pub strict_delete: bool,
    /// Largest accepted request body in bytes
    pub body_limit: usize,
}

impl AppState {
    /// Creates state with the default origin allow-list and idempotent deletes.
    pub fn new(store: DocumentStore, proxy: FetchProxy) -> Self {
        Self {
            store,
            proxy,
            cors: CorsPolicy::default(),
            strict_delete: false,
            body_limit: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_strict_delete(mut self, strict_delete: bool) -> Self {
        self.strict_delete = strict_delete;
        self
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

fn required_key(query: std::result::Result<Query<KeyQuery>, QueryRejection>) -> Result<String> {
    let Query(query) = query.map_err(|e| KeeperError::Validation(e.body_text()))?;
    query
        .key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| KeeperError::Validation("missing 'key' parameter".to_string()))
}

fn log_rejection(operation: &'static str) -> impl Fn(&KeeperError) {
    move |e| {
        if e.status_code().is_client_error() {
            warn!(operation, error = %e, "Request rejected");
        }
    }
}

fn decode_save_request(
    body: std::result::Result<Bytes, BytesRejection>,
    body_limit: usize,
) -> Result<SaveRequest> {
    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            KeeperError::PayloadTooLarge(body_limit)
        } else {
            KeeperError::Validation(e.body_text())
        }
    })?;

    serde_json::from_slice(&body)
        .map_err(|e| KeeperError::Validation(format!("invalid JSON: {}", e)))
}

/// Handler for POST /api/save
///
/// The body is decoded as JSON whatever its declared content type.
pub async fn save_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<SaveResponse>> {
    let req = decode_save_request(body, state.body_limit).inspect_err(log_rejection("save"))?;

    let saved_at = state
        .store
        .save(&req.key, &req.data)
        .await
        .inspect_err(log_rejection("save"))?;

    Ok(Json(SaveResponse::new(req.key, saved_at)))
}

/// Handler for GET /api/load
pub async fn load_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<LoadResponse>> {
    let key = required_key(query).inspect_err(log_rejection("load"))?;
    let loaded = state
        .store
        .load(&key)
        .await
        .inspect_err(log_rejection("load"))?;

    Ok(Json(LoadResponse::new(key, loaded.data, loaded.loaded_at)))
}

/// Handler for DELETE /api/delete
///
/// Deleting a key that holds nothing succeeds unless strict deletes are on.
pub async fn delete_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<DeleteResponse>> {
    let key = required_key(query).inspect_err(log_rejection("delete"))?;

    let deletion = state
        .store
        .delete(&key)
        .await
        .inspect_err(log_rejection("delete"))?;

    match deletion {
        Deletion::Absent if state.strict_delete => {
            Err(KeeperError::NotFound("save key not found".to_string()))
        }
        Deletion::Deleted | Deletion::Absent => Ok(Json(DeleteResponse::new(key))),
    }
}

/// Handler for GET /api/character
///
/// Relays the body of an external URL to the caller.
pub async fn character_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<FetchResponse>> {
    let Query(query) = query
        .map_err(|e| KeeperError::Validation(e.body_text()))
        .inspect_err(log_rejection("character"))?;
    let url = query.url.unwrap_or_default();

    let fetched = state
        .proxy
        .fetch(&url)
        .await
        .inspect_err(log_rejection("character"))?;

    Ok(Json(FetchResponse {
        url: fetched.url,
        content: fetched.content,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("method not allowed")),
    )
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("not found")))
}
