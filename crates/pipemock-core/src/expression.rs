//! JMESPath expression utilities for request matching.
//!
//! Config values written as `${...}` are expressions; anything else is
//! literal data.

use jmespath::Variable;
use serde_json::Value;
use std::rc::Rc;

/// Returns the expression inside `${...}`, or `None` for literal strings.
pub fn unwrap_expression(s: &str) -> Option<&str> {
    s.trim()
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
        .filter(|expr| !expr.is_empty())
}

pub fn is_expression(s: &str) -> bool {
    unwrap_expression(s).is_some()
}

pub fn wrap_expression(expr: &str) -> String {
    format!("${{{expr}}}")
}

/// Convert jmespath::Variable to serde_json::Value.
pub fn variable_to_value(var: &Rc<Variable>) -> Option<Value> {
    Some(match var.as_ref() {
        Variable::Null => Value::Null,
        Variable::Bool(b) => Value::Bool(*b),
        Variable::Number(n) => Value::Number(n.clone()),
        Variable::String(s) => Value::String(s.clone()),
        Variable::Array(arr) => Value::Array(
            arr.iter()
                .map(variable_to_value)
                .collect::<Option<Vec<_>>>()?,
        ),
        Variable::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| variable_to_value(v).map(|val| (k.clone(), val)))
                .collect::<Option<serde_json::Map<_, _>>>()?,
        ),
        // Expression references have no JSON form
        Variable::Expref(_) => return None,
    })
}

/// Truthiness of an expression result.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Evaluate JMESPath expression on data; `None` if it fails to compile or run.
pub fn evaluate(expression: &str, data: &Value) -> Option<Value> {
    let expr = jmespath::compile(expression).ok()?;
    let result = expr.search(data).ok()?;
    variable_to_value(&result)
}

/// True when the expression evaluates to a truthy value.
pub fn matches(expression: &str, data: &Value) -> bool {
    let matched = evaluate(expression, data).is_some_and(|v| is_truthy(&v));
    tracing::trace!(expression, matched, "evaluated match expression");
    matched
}
