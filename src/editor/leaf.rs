use crate::core::classify::{Classification, Kind, classify};
use crate::core::date;
use crate::core::value::Value;
use crate::editor::labels::is_currency_label;

enum Mode {
    Viewing,
    Editing { buffer: String },
}

/// View/edit lifecycle for a single scalar node: `Viewing -> Editing ->
/// {Saved | Cancelled} -> Viewing`. The editor never touches the tree;
/// `save` hands the coerced value to whoever wired the node in.
pub struct LeafEditor {
    label: String,
    value: Value,
    classification: Classification,
    mode: Mode,
}

impl LeafEditor {
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        let classification = classify(&value);
        Self {
            label: label.into(),
            value,
            classification,
            mode: Mode::Viewing,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> Kind {
        self.classification.kind
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    /// Numeric leaves labelled like money get the currency treatment.
    pub fn is_currency(&self) -> bool {
        self.classification.kind == Kind::Number && is_currency_label(&self.label)
    }

    /// Seeds the edit buffer from the current value, pre-formatted for the
    /// input modality of the classified type.
    pub fn start_editing(&mut self) {
        let buffer = match self.classification.date {
            Some(detected) => detected.format_input(),
            None => self.value.to_text_scalar().unwrap_or_default(),
        };
        self.mode = Mode::Editing { buffer };
    }

    pub fn buffer(&self) -> Option<&str> {
        match &self.mode {
            Mode::Editing { buffer } => Some(buffer.as_str()),
            Mode::Viewing => None,
        }
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if let Mode::Editing { buffer } = &mut self.mode {
            *buffer = text.into();
        }
    }

    /// Coerces the buffer back to the original classified type and returns
    /// the new value. Unparseable input degrades to a best-effort value;
    /// this never fails. Returns `None` when not editing.
    pub fn save(&mut self) -> Option<Value> {
        let Mode::Editing { buffer } = std::mem::replace(&mut self.mode, Mode::Viewing) else {
            return None;
        };
        let coerced = coerce(&buffer, self.classification);
        self.value = coerced.clone();
        self.classification = classify(&self.value);
        Some(coerced)
    }

    /// Discards the buffer; the value is untouched and nothing is emitted.
    pub fn cancel(&mut self) {
        self.mode = Mode::Viewing;
    }

    /// Clipboard-export text for the current value. Has no effect on the
    /// tree.
    pub fn copy_text(&self) -> String {
        self.value.pretty()
    }
}

fn coerce(buffer: &str, classification: Classification) -> Value {
    if let Some(original) = classification.date {
        // Reformat to the granularity of the value being edited; a buffer
        // that no longer parses is kept verbatim.
        return match date::parse_date_like(buffer) {
            Some(reparsed) if original.has_time => Value::Text(reparsed.format_minute()),
            Some(reparsed) => Value::Text(reparsed.format_date()),
            None => Value::Text(buffer.to_string()),
        };
    }
    match classification.kind {
        Kind::Number => Value::Number(buffer.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Kind::Boolean => Value::Bool(buffer == "true"),
        _ => Value::Text(buffer.to_string()),
    }
}
