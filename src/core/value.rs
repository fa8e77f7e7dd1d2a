use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::core::date;
use crate::core::value_path::{PathSegment, ValuePath};

/// A JSON-compatible value of unknown shape. `Object` preserves insertion
/// order for display; `Clone` is a structural deep copy (clones share no
/// mutable substructure with their source).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Object(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Object(_))
    }

    pub fn child_count(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Object(fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Scalar rendered as edit-buffer text. Containers yield `None`.
    pub fn to_text_scalar(&self) -> Option<String> {
        match self {
            Self::None => Some(String::new()),
            Self::Bool(v) => Some(v.to_string()),
            Self::Number(v) => Some(format_number(*v)),
            Self::Text(v) => Some(v.clone()),
            Self::List(_) | Self::Object(_) => None,
        }
    }

    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(fields)) => fields.get(key.as_str())?,
                (PathSegment::Index(idx), Value::List(items)) => items.get(*idx)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn get_path_mut(&mut self, path: &ValuePath) -> Option<&mut Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (PathSegment::Key(key), Value::Object(fields)) => fields.get_mut(key.as_str())?,
                (PathSegment::Index(idx), Value::List(items)) => items.get_mut(*idx)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn from_json(json: &JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::None,
            JsonValue::Bool(v) => Value::Bool(*v),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), Value::from_json(child)))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::None => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            // JSON cannot carry NaN/inf; a failed numeric coercion exports as null.
            Value::Number(v) => serde_json::Number::from_f64(*v)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(v) => JsonValue::String(v.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Object(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
        }
    }

    /// Clipboard-export text: containers pretty-printed, scalars plain.
    pub fn pretty(&self) -> String {
        match self {
            Value::List(_) | Value::Object(_) => serde_json::to_string_pretty(&self.to_json())
                .unwrap_or_else(|_| self.to_json().to_string()),
            Value::None => "null".to_string(),
            scalar => scalar.to_text_scalar().unwrap_or_default(),
        }
    }
}

pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// A blank value shaped like `example`: objects keep their keys, lists
/// empty out, scalars reset to their zero value. Date-shaped strings become
/// today/now at the example's granularity; email-shaped strings keep an
/// email placeholder so downstream validation still recognizes the field.
pub fn default_like(example: &Value) -> Value {
    match example {
        Value::None => Value::Text(String::new()),
        Value::List(_) => Value::List(Vec::new()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, child)| (key.clone(), default_like(child)))
                .collect(),
        ),
        Value::Text(text) => {
            if let Some(detected) = date::detect_date(text) {
                if detected.has_time {
                    Value::Text(date::now().format_minute())
                } else {
                    Value::Text(date::today().format_date())
                }
            } else if text.contains('@') && text.contains('.') {
                Value::Text("nuevo@ejemplo.com".to_string())
            } else {
                Value::Text(String::new())
            }
        }
        Value::Number(_) => Value::Number(0.0),
        Value::Bool(_) => Value::Bool(false),
    }
}
