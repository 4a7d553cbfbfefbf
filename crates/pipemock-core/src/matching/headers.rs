//! Request header matching.

use crate::expression;
use crate::matching::intersection::hashmap_to_value;
use crate::types::preset::HeadersOrExpression;
use std::collections::HashMap;

fn lowercase_keys(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

/// Every header in `subset` is present in `target` with an equal value.
/// Names compare case-insensitively.
pub fn headers_intersects(
    target: Option<&HashMap<String, String>>,
    subset: Option<&HashMap<String, String>>,
) -> bool {
    let Some(subset) = subset.filter(|s| !s.is_empty()) else {
        return true;
    };
    let Some(target) = target else {
        return false;
    };

    subset.iter().all(|(name, value)| {
        target
            .iter()
            .any(|(present, present_value)| present.eq_ignore_ascii_case(name) && present_value == value)
    })
}

/// Map presets use [`headers_intersects`]; expressions are evaluated
/// against the headers with lowercased names.
pub fn headers_matches(
    expected: Option<&HeadersOrExpression>,
    actual: &HashMap<String, String>,
) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    match expected {
        HeadersOrExpression::Map(expected) => headers_intersects(Some(actual), Some(expected)),
        HeadersOrExpression::Expression(expr) => {
            expression::matches(expr, &hashmap_to_value(&lowercase_keys(actual)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn h(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).into(), (*v).into()))
            .collect()
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some(&h(&[])), Some(&h(&[])), true)]
    #[case(Some(&h(&[("Content-Type", "application/json")])), None, true)]
    #[case(Some(&h(&[("Content-Type", "application/json"), ("Auth", "Bearer x")])), Some(&h(&[("content-type", "application/json")])), true)]
    #[case(Some(&h(&[("Content-Type", "application/json")])), Some(&h(&[("Content-Type", "text/plain")])), false)]
    #[case(None, Some(&h(&[("Content-Type", "application/json")])), false)]
    #[case(Some(&h(&[("Accept", "text/html")])), Some(&h(&[("Content-Type", "application/json")])), false)]
    fn test_headers_intersects(
        #[case] target: Option<&HashMap<String, String>>,
        #[case] subset: Option<&HashMap<String, String>>,
        #[case] expected: bool,
    ) {
        assert_eq!(headers_intersects(target, subset), expected);
    }

    #[rstest]
    #[case("accept == 'application/json'", true)]
    #[case("accept == 'text/html'", false)]
    #[case("\"x-requested-with\" != null", false)]
    fn test_headers_matches_expression(#[case] expr: &str, #[case] expected: bool) {
        let actual = h(&[("Accept", "application/json")]);
        let preset = HeadersOrExpression::Expression(expr.to_string());
        assert_eq!(headers_matches(Some(&preset), &actual), expected);
    }

    #[rstest]
    fn test_headers_matches_none_matches_anything() {
        assert!(headers_matches(None, &h(&[])));
    }
}
