//! Request DTOs for the HTTP API
//!
//! Fields are optional or defaulted so that absent input reaches the
//! validation layer and produces the envelope error rather than an
//! extractor rejection.

use serde::Deserialize;
use serde_json::Value;

/// Request body for POST /api/save
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    /// The logical key
    #[serde(default)]
    pub key: String,
    /// The document to store; absent means `null`
    #[serde(default)]
    pub data: Value,
}

/// Query string for GET /api/load and DELETE /api/delete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// Query string for GET /api/character
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_deserialize() {
        let json = r#"{"key": "hero1", "data": {"hp": 30}}"#;
        let req: SaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "hero1");
        assert_eq!(req.data, json!({"hp": 30}));
    }

    #[test]
    fn test_save_request_missing_fields() {
        let req: SaveRequest = serde_json::from_str("{}").unwrap();
        assert!(req.key.is_empty());
        assert_eq!(req.data, Value::Null);
    }

    #[test]
    fn test_save_request_wrong_key_type() {
        let result = serde_json::from_str::<SaveRequest>(r#"{"key": 5, "data": 1}"#);
        assert!(result.is_err());
    }
}
