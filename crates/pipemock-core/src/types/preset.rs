//! Request matching preset types.

use crate::expression::{unwrap_expression, wrap_expression};
use crate::types::variant::Variant;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// String map or expression string, used for query parameters and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapOrExpression {
    Map(HashMap<String, String>),
    Expression(String),
}

/// Query parameters value - either a map or an expression like `${offset == '1'}`
pub type QueryOrExpression = MapOrExpression;

/// Headers value - either a map or an expression like `${accept != null}`
pub type HeadersOrExpression = MapOrExpression;

impl MapOrExpression {
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MapOrExpression::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for MapOrExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MapOrExpression::Map(map) => map.serialize(serializer),
            MapOrExpression::Expression(expr) => wrap_expression(expr).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MapOrExpression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => unwrap_expression(&s)
                .map(|expr| MapOrExpression::Expression(expr.to_string()))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("Expected an expression like ${{...}}, got '{s}'"))
                }),
            Value::Object(map) => {
                let mut result = HashMap::new();
                for (k, v) in map {
                    // Scalars are matched by their string form: `offset: 1` == "1"
                    let v = match v {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(serde::de::Error::custom(format!(
                                "Value for '{k}' must be a scalar, got {other}"
                            )))
                        }
                    };
                    result.insert(k, v);
                }
                Ok(MapOrExpression::Map(result))
            }
            _ => Err(serde::de::Error::custom(
                "Expected either an object or an expression string",
            )),
        }
    }
}

/// Payload value - either a JSON value or an expression string
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadOrExpression {
    Value(Value),
    Expression(String),
}

impl Serialize for PayloadOrExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PayloadOrExpression::Value(v) => v.serialize(serializer),
            PayloadOrExpression::Expression(expr) => wrap_expression(expr).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PayloadOrExpression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Some(expr) = value.as_str().and_then(unwrap_expression) {
            return Ok(PayloadOrExpression::Expression(expr.to_string()));
        }
        Ok(PayloadOrExpression::Value(value))
    }
}

/// Request matching preset with response variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Unique identifier for this preset within the route
    pub id: String,
    /// URL path parameters to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
    /// Query parameters to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryOrExpression>,
    /// Request headers to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersOrExpression>,
    /// Request body to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadOrExpression>,
    /// Response variants
    pub variants: Vec<Variant>,
}

impl Preset {
    /// Preset that matches any request and answers with `variants`.
    pub fn any(id: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            id: id.into(),
            params: None,
            query: None,
            headers: None,
            payload: None,
            variants,
        }
    }

    pub fn with_query(mut self, query: QueryOrExpression) -> Self {
        self.query = Some(query);
        self
    }
}
