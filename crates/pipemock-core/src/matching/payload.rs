//! Request payload (JSON) matching with object intersection and JMESPath expressions.

use crate::expression;
use crate::matching::intersection::object_intersects;
use crate::types::preset::PayloadOrExpression;
use serde_json::Value;

/// Match a request body against the preset's payload rule.
///
/// A preset without payload rule matches any request, with or without body.
/// A preset with a rule never matches a request that has no body.
pub fn payload_matches(expected: Option<&PayloadOrExpression>, actual: Option<&Value>) -> bool {
    let Some(expected) = expected else {
        return true;
    };
    let Some(actual) = actual else {
        return false;
    };

    match expected {
        PayloadOrExpression::Expression(expr) => expression::matches(expr, actual),
        PayloadOrExpression::Value(value) => object_intersects(Some(actual), Some(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_payload_matches_object_notation() {
        let body = json!({"id": 11223, "title": "Updated Task"});
        let expected = PayloadOrExpression::Value(json!({"id": 11223}));
        assert!(payload_matches(Some(&expected), Some(&body)));
    }

    #[rstest]
    #[case("contains(items[*].id, `5`)", true)]
    #[case("contains(items[*].id, `10`)", false)]
    #[case("items[2].id == `3`", true)]
    #[case("length(items) > `5`", false)]
    fn test_payload_matches_expression(#[case] expr: &str, #[case] expected: bool) {
        let body = json!({"items": [{"id": 1}, {"id": 5}, {"id": 3}]});
        let preset = PayloadOrExpression::Expression(expr.to_string());
        assert_eq!(payload_matches(Some(&preset), Some(&body)), expected);
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(None, Some(json!({"any": "value"})), true)]
    #[case(Some(PayloadOrExpression::Value(json!({"id": 1}))), None, false)]
    #[case(Some(PayloadOrExpression::Expression("id".to_string())), None, false)]
    #[case(Some(PayloadOrExpression::Value(json!({"id": 1}))), Some(json!({"id": 2})), false)]
    fn test_payload_matches_presence(
        #[case] expected: Option<PayloadOrExpression>,
        #[case] actual: Option<Value>,
        #[case] result: bool,
    ) {
        assert_eq!(payload_matches(expected.as_ref(), actual.as_ref()), result);
    }
}
