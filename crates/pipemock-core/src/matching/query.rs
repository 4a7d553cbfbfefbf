//! Query parameters matching with map intersection and JMESPath expressions.

use crate::expression;
use crate::matching::intersection::{hashmap_intersects, hashmap_to_value};
use crate::types::preset::QueryOrExpression;
use std::collections::HashMap;

/// Parse query string into a map with URL decoding.
/// Repeated keys are joined with commas.
pub fn parse_query_string(query_str: &str) -> HashMap<String, String> {
    let mut result: HashMap<String, String> = HashMap::new();

    for pair in query_str.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key);
        let value = decode(value);

        result
            .entry(key)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    result
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|d| d.into_owned())
        .unwrap_or(s)
}

/// Match query parameters using either map intersection or a JMESPath expression.
pub fn query_matches(expected: Option<&QueryOrExpression>, actual: &HashMap<String, String>) -> bool {
    match expected {
        Some(QueryOrExpression::Expression(expr)) => {
            expression::matches(expr, &hashmap_to_value(actual))
        }
        Some(QueryOrExpression::Map(expected_map)) => {
            hashmap_intersects(Some(expected_map), Some(actual))
        }
        None => true,
    }
}
