//! Canned responses produced from variants.

use crate::mocks::manager::ActiveRoute;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Response replayed for a matched request.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    /// `route:preset:variant` that produced this response
    pub source: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    /// How long to wait before answering
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body serialized as JSON text; empty when the variant has no body.
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body
            .as_ref()
            .map(|body| body.to_string().into_bytes())
            .unwrap_or_default()
    }
}

impl From<&ActiveRoute> for MockResponse {
    fn from(active: &ActiveRoute) -> Self {
        let variant = &active.variant;
        Self {
            source: active.reference().to_string(),
            status: variant.status_code(),
            headers: variant
                .headers
                .iter()
                .flatten()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            body: variant.body.clone(),
            delay: variant.delay.map(Duration::from_millis),
        }
    }
}
