//! Property value type carried by nodes and edges.

use serde::{Deserialize, Serialize};

/// A property value.
///
/// Serialized untagged so that exported element data reads as plain JSON
/// (`"level": 3`, `"aop_ids": ["1", "2"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render for a flat table cell. Null renders empty, lists join with `"; "`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(impl From<$source> for Value {
            fn from(v: $source) -> Self {
                Value::$variant(v.into())
            }
        })*
    };
}

value_from!(bool => Bool, i32 => Int, i64 => Int, f64 => Float, String => String, &str => String, &String => String);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::from("liver").to_text(), "liver");
        assert_eq!(Value::from(vec!["a", "b"]).to_text(), "a; b");
        assert_eq!(Value::Int(7).to_text(), "7");
        assert_eq!(Value::Bool(false).to_text(), "false");
    }

    #[test]
    fn test_untagged_json() {
        let json = serde_json::to_string(&Value::from(vec!["1", "2"])).unwrap();
        assert_eq!(json, r#"["1","2"]"#);
        let back: Value = serde_json::from_str("3").unwrap();
        assert_eq!(back, Value::Int(3));
        let null: Value = serde_json::from_str("null").unwrap();
        assert!(null.is_null());
    }
}
