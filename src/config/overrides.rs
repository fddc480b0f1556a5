//! Typed coercion of `key=value` override strings.

use std::fmt;

use serde::Serialize;

/// A coerced override value.
///
/// Coercion order: boolean literal, integer, float, literal string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OverrideValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OverrideValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OverrideValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for OverrideValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideValue::Bool(b) => write!(f, "{}", b),
            OverrideValue::Int(i) => write!(f, "{}", i),
            OverrideValue::Float(x) => write!(f, "{}", x),
            OverrideValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Coerce a raw override string to its value type.
pub fn coerce(value: &str) -> OverrideValue {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => return OverrideValue::Bool(true),
        "false" | "0" | "no" => return OverrideValue::Bool(false),
        _ => {}
    }

    if let Ok(i) = value.parse::<i64>() {
        return OverrideValue::Int(i);
    }

    if let Ok(x) = value.parse::<f64>() {
        return OverrideValue::Float(x);
    }

    OverrideValue::Str(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce("true"), OverrideValue::Bool(true));
        assert_eq!(coerce("True"), OverrideValue::Bool(true));
        assert_eq!(coerce("yes"), OverrideValue::Bool(true));
        assert_eq!(coerce("false"), OverrideValue::Bool(false));
        assert_eq!(coerce("NO"), OverrideValue::Bool(false));
    }

    #[test]
    fn test_coerce_numeric_booleans_win_over_ints() {
        // "1"/"0" are boolean literals, not integers
        assert_eq!(coerce("1"), OverrideValue::Bool(true));
        assert_eq!(coerce("0"), OverrideValue::Bool(false));
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce("42"), OverrideValue::Int(42));
        assert_eq!(coerce("-7"), OverrideValue::Int(-7));
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce("3.14"), OverrideValue::Float(3.14));
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce("hello"), OverrideValue::Str("hello".to_string()));
    }
}
