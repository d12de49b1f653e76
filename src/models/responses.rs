//! Response DTOs for the HTTP API
//!
//! Field names follow the camelCase envelope the web client expects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Response body for POST /api/save
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    /// Always "saved"
    pub status: &'static str,
    pub key: String,
    pub saved_at: DateTime<Utc>,
}

impl SaveResponse {
    pub fn new(key: impl Into<String>, saved_at: DateTime<Utc>) -> Self {
        Self {
            status: "saved",
            key: key.into(),
            saved_at,
        }
    }
}

/// Response body for GET /api/load
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub key: String,
    pub data: Value,
    pub loaded_at: DateTime<Utc>,
}

impl LoadResponse {
    pub fn new(key: impl Into<String>, data: Value, loaded_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            data,
            loaded_at,
        }
    }
}

/// Response body for DELETE /api/delete
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Always "deleted"
    pub status: &'static str,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            status: "deleted",
            key: key.into(),
        }
    }
}

/// Response body for GET /api/character
#[derive(Debug, Clone, Serialize)]
pub struct FetchResponse {
    /// The URL as the caller supplied it
    pub url: String,
    /// Raw upstream body
    pub content: String,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_response_serialize() {
        let saved_at = Utc::now();
        let resp = SaveResponse::new("hero1", saved_at);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["status"], "saved");
        assert_eq!(value["key"], "hero1");
        assert!(value["savedAt"].is_string());
    }

    #[test]
    fn test_load_response_serialize() {
        let resp = LoadResponse::new("hero1", json!({"hp": 30}), Utc::now());
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["key"], "hero1");
        assert_eq!(value["data"], json!({"hp": 30}));
        assert!(value["loadedAt"].is_string());
        assert!(value.get("loaded_at").is_none());
    }

    #[test]
    fn test_delete_response_serialize() {
        let value = serde_json::to_value(DeleteResponse::new("hero1")).unwrap();
        assert_eq!(value, json!({"status": "deleted", "key": "hero1"}));
    }

    #[test]
    fn test_error_response_serialize() {
        let value = serde_json::to_value(ErrorResponse::new("invalid url format")).unwrap();
        assert_eq!(value, json!({"error": "invalid url format"}));
    }
}
