use serde::Serialize;

use crate::core::date::{self, DetectedDate};
use crate::core::value::Value;

/// Threshold above which free text gets the long-text treatment.
pub const LONG_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Empty,
    Boolean,
    Number,
    DateOnly,
    DateTime,
    ShortText,
    LongText,
    List,
    Record,
}

impl Kind {
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Kind::List | Kind::Record)
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Kind::DateOnly | Kind::DateTime)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub kind: Kind,
    pub date: Option<DetectedDate>,
}

impl Classification {
    fn plain(kind: Kind) -> Self {
        Self { kind, date: None }
    }

    pub fn has_time(&self) -> bool {
        self.date.map(|d| d.has_time).unwrap_or(false)
    }
}

/// Semantic type of a node, decided solely by runtime inspection. Pure,
/// deterministic, and idempotent: the same value always classifies the same
/// way.
pub fn classify(value: &Value) -> Classification {
    match value {
        Value::None => Classification::plain(Kind::Empty),
        Value::Bool(_) => Classification::plain(Kind::Boolean),
        Value::Number(_) => Classification::plain(Kind::Number),
        Value::List(_) => Classification::plain(Kind::List),
        Value::Object(_) => Classification::plain(Kind::Record),
        Value::Text(text) => classify_text(text),
    }
}

fn classify_text(text: &str) -> Classification {
    if let Some(detected) = date::detect_date(text) {
        let kind = if detected.has_time {
            Kind::DateTime
        } else {
            Kind::DateOnly
        };
        return Classification {
            kind,
            date: Some(detected),
        };
    }
    if text.chars().count() > LONG_TEXT_CHARS {
        Classification::plain(Kind::LongText)
    } else {
        Classification::plain(Kind::ShortText)
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, classify};
    use crate::core::value::Value;
    use serde_json::json;

    fn kind_of(json: serde_json::Value) -> Kind {
        classify(&Value::from_json(&json)).kind
    }

    #[test]
    fn scalar_kinds() {
        assert_eq!(kind_of(json!(null)), Kind::Empty);
        assert_eq!(kind_of(json!(true)), Kind::Boolean);
        assert_eq!(kind_of(json!(12.5)), Kind::Number);
        assert_eq!(kind_of(json!("hola")), Kind::ShortText);
        assert_eq!(kind_of(json!([])), Kind::List);
        assert_eq!(kind_of(json!({})), Kind::Record);
    }

    #[test]
    fn record_of_mixed_scalars() {
        // a date string, a number, and a boolean classify independently
        let value = Value::from_json(&json!({"a": "2024-01-05", "b": 10, "c": true}));
        let Value::Object(fields) = &value else {
            panic!("expected object");
        };
        assert_eq!(classify(&fields["a"]).kind, Kind::DateOnly);
        assert_eq!(classify(&fields["b"]).kind, Kind::Number);
        assert_eq!(classify(&fields["c"]).kind, Kind::Boolean);
    }

    #[test]
    fn date_granularity() {
        assert_eq!(kind_of(json!("2024-01-05")), Kind::DateOnly);
        assert_eq!(kind_of(json!("2024-01-05T10:30:00")), Kind::DateTime);
        assert_eq!(kind_of(json!("2024-01-05 10:30")), Kind::DateTime);
        assert_eq!(kind_of(json!("31/12/2024")), Kind::DateOnly);
    }

    #[test]
    fn failed_patterns_fall_back_to_text() {
        assert_eq!(kind_of(json!("2024-02-31")), Kind::ShortText);
        assert_eq!(kind_of(json!("1234-56-78")), Kind::ShortText);
        assert_eq!(kind_of(json!("12345.678")), Kind::ShortText);
    }

    #[test]
    fn long_text_threshold_counts_chars() {
        let short = "x".repeat(100);
        let long = "x".repeat(101);
        assert_eq!(kind_of(json!(short)), Kind::ShortText);
        assert_eq!(kind_of(json!(long)), Kind::LongText);
    }

    #[test]
    fn classify_is_deterministic() {
        let value = Value::Text("2024-01-05 10:30".to_string());
        assert_eq!(classify(&value), classify(&value));
    }
}
