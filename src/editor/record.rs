use indexmap::IndexMap;

use crate::core::value::Value;
use crate::editor::{FieldType, RejectedOp};

/// Persistent operations over a named, ordered field collection. Every
/// operation returns a new record; the source is never mutated, so holders
/// of the pre-edit value keep observing a stable structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordEditor {
    fields: IndexMap<String, Value>,
}

impl RecordEditor {
    pub fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Editors over non-object values start from an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                fields: fields.clone(),
            },
            _ => Self::default(),
        }
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// New record with `fields[key]` replaced in place (order-stable); a
    /// missing key is appended, matching object spread semantics.
    pub fn set_field(&self, key: impl Into<String>, value: Value) -> RecordEditor {
        let mut fields = self.fields.clone();
        fields.insert(key.into(), value);
        Self { fields }
    }

    /// Appends `name -> default_for(ty)`. Empty and colliding names are
    /// rejected without touching the record; the caller surfaces the
    /// conflict locally.
    pub fn add_field(&self, name: &str, ty: FieldType) -> Result<RecordEditor, RejectedOp> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RejectedOp::EmptyFieldName);
        }
        if self.fields.contains_key(name) {
            return Err(RejectedOp::DuplicateField(name.to_string()));
        }
        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), ty.default_value());
        Ok(Self { fields })
    }

    /// New record without `key`; remaining entries keep their order.
    pub fn remove_field(&self, key: &str) -> RecordEditor {
        let mut fields = self.fields.clone();
        fields.shift_remove(key);
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordEditor;
    use crate::core::Value;
    use crate::editor::{FieldType, RejectedOp};
    use serde_json::json;

    fn record(json: serde_json::Value) -> RecordEditor {
        RecordEditor::from_value(&Value::from_json(&json))
    }

    #[test]
    fn add_field_appends_with_type_default() {
        let added = record(json!({})).add_field("x", FieldType::Number).expect("add");
        assert_eq!(added.into_value(), Value::from_json(&json!({"x": 0.0})));
    }

    #[test]
    fn add_field_rejects_duplicates_unchanged() {
        let base = record(json!({"x": 1}));
        let err = base.add_field("x", FieldType::Number).expect_err("duplicate");
        assert_eq!(err, RejectedOp::DuplicateField("x".to_string()));
        assert_eq!(base, record(json!({"x": 1})));
    }

    #[test]
    fn add_field_rejects_blank_names() {
        let base = record(json!({}));
        assert_eq!(
            base.add_field("   ", FieldType::Text).expect_err("blank"),
            RejectedOp::EmptyFieldName
        );
    }

    #[test]
    fn add_field_trims_the_name() {
        let added = record(json!({})).add_field(" rfc ", FieldType::Text).expect("add");
        assert!(added.fields().contains_key("rfc"));
    }

    #[test]
    fn add_then_remove_round_trips() {
        let base = record(json!({"a": 1, "b": "x"}));
        let round = base
            .add_field("c", FieldType::Boolean)
            .expect("add")
            .remove_field("c");
        assert_eq!(round, base);
    }

    #[test]
    fn set_field_is_order_stable_and_leaves_siblings_alone() {
        let base = record(json!({"a": 1, "b": 2, "c": 3}));
        let updated = base.set_field("b", Value::Number(9.0));
        let keys: Vec<&str> = updated.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(updated.fields()["b"], Value::Number(9.0));
        assert_eq!(updated.fields()["a"], base.fields()["a"]);
        assert_eq!(base.fields()["b"], Value::Number(2.0));
    }

    #[test]
    fn remove_field_drops_only_the_key() {
        let removed = record(json!({"a": 1, "b": 2})).remove_field("a");
        assert_eq!(removed.into_value(), Value::from_json(&json!({"b": 2})));
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let base = record(json!({"a": 1}));
        assert_eq!(base.remove_field("zz"), base);
    }
}
