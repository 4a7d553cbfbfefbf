//! Core route types.

use crate::types::preset::Preset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method for route matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of the supported verbs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod(s.to_owned())),
        }
    }
}

/// Mock route definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Unique identifier for this route
    pub id: String,
    /// URL pattern (supports `{param}` placeholders and `*` wildcards)
    pub url: String,
    /// HTTP method; `None` matches any method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Request matching presets
    pub presets: Vec<Preset>,
}

/// Parsed route reference in format `route_id:preset_id:variant_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReference {
    pub route_id: String,
    pub preset_id: String,
    pub variant_id: String,
}

impl RouteReference {
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let (Some(route_id), Some(preset_id), Some(variant_id), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };

        if route_id.is_empty() || preset_id.is_empty() || variant_id.is_empty() {
            return None;
        }

        Some(Self {
            route_id: route_id.to_owned(),
            preset_id: preset_id.to_owned(),
            variant_id: variant_id.to_owned(),
        })
    }
}

impl fmt::Display for RouteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.route_id, self.preset_id, self.variant_id)
    }
}
