//! Values captured by the tracer
//!
//! Arguments and return values are captured by value at the moment a call
//! starts or ends, so later mutation by the algorithm can never rewrite
//! history.

use serde::Serialize;
use std::fmt;

/// An argument or return value recorded in a trace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Text(String),
    /// Return value of a call that raised; holds the error message
    Error(String),
}

impl Value {
    /// Build the error sentinel recorded for a call that raised
    pub fn error(err: &impl fmt::Display) -> Self {
        Value::Error(err.to_string())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Short name of the variant, used in type mismatch messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Error(_) => "error",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::from("A->C").to_string(), "A->C");
        assert_eq!(
            Value::Error("boom".to_string()).to_string(),
            "Error: boom"
        );
    }

    #[test]
    fn json_shape_is_tagged() {
        let json = serde_json::to_string(&Value::Int(6)).unwrap();
        assert_eq!(json, r#"{"kind":"int","value":6}"#);
    }
}
