use indexmap::IndexMap;

use crate::core::date;
use crate::core::value::Value;
use crate::editor::RejectedOp;

/// Persistent operations over an ordered sequence. Items have no stable
/// identity: removing position `i` renumbers everything after it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListEditor {
    items: Vec<Value>,
}

impl ListEditor {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::List(items) => Self {
                items: items.clone(),
            },
            _ => Self::default(),
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::List(self.items)
    }

    /// New list with position `index` replaced.
    pub fn set_item(&self, index: usize, value: Value) -> Result<ListEditor, RejectedOp> {
        if index >= self.items.len() {
            return Err(RejectedOp::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let mut items = self.items.clone();
        items[index] = value;
        Ok(Self { items })
    }

    /// Appends a structural clone of the last item, or a synthesized default
    /// record when the list is empty. The clone shares nothing with its
    /// source.
    pub fn add_item(&self) -> ListEditor {
        let mut items = self.items.clone();
        let new_item = match items.last() {
            Some(last) => last.clone(),
            None => default_item(),
        };
        items.push(new_item);
        Self { items }
    }

    /// New list without position `index`; later items shift down by one.
    pub fn remove_item(&self, index: usize) -> Result<ListEditor, RejectedOp> {
        if index >= self.items.len() {
            return Err(RejectedOp::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let mut items = self.items.clone();
        items.remove(index);
        Ok(Self { items })
    }
}

// Field names match the records the OCR backend emits.
fn default_item() -> Value {
    let mut fields = IndexMap::new();
    fields.insert("id".to_string(), Value::Number(date::now_millis()));
    fields.insert("nombre".to_string(), Value::Text("Nuevo elemento".to_string()));
    fields.insert("activo".to_string(), Value::Bool(true));
    fields.insert("fecha".to_string(), Value::Text(date::today().format_date()));
    Value::Object(fields)
}
