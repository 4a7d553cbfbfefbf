use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response variant for a preset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    /// Unique identifier for this variant within the preset
    pub id: String,
    /// HTTP status code for the response (100-599), 200 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Response body (JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Delay in milliseconds before sending response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u64>,
}

impl Variant {
    pub const DEFAULT_STATUS: u16 = 200;

    /// JSON response with `Content-Type: application/json` and status 200.
    pub fn json(id: impl Into<String>, body: serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            id: id.into(),
            status: None,
            headers: Some(headers),
            body: Some(body),
            delay: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(Self::DEFAULT_STATUS)
    }
}
