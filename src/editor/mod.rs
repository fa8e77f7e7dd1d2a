pub mod dispatch;
pub mod labels;
pub mod leaf;
pub mod list;
pub mod record;
pub mod session;

pub use dispatch::{EditOp, MAX_DEPTH, NodeEditor, apply, dispatch};
pub use labels::{
    LabelFormatter, NoLabels, StaticLabels, display_label, facture_labels, is_currency_label,
};
pub use leaf::LeafEditor;
pub use list::ListEditor;
pub use record::RecordEditor;
pub use session::{EditorSession, Row};

use std::fmt;

use crate::core::Value;
use crate::core::date;

/// A rejected operation leaves the tree untouched. These are UI-surfaced
/// conditions, not failures; nothing in the editor core is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedOp {
    DuplicateField(String),
    EmptyFieldName,
    DepthLimit,
    MissingPath(String),
    IndexOutOfRange { index: usize, len: usize },
    NotAContainer(String),
}

impl fmt::Display for RejectedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField(name) => write!(f, "field '{name}' already exists"),
            Self::EmptyFieldName => f.write_str("field name is empty"),
            Self::DepthLimit => f.write_str("maximum depth reached"),
            Self::MissingPath(path) => write!(f, "no value at '{path}'"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of {len}")
            }
            Self::NotAContainer(path) => write!(f, "value at '{path}' is not a container"),
        }
    }
}

impl std::error::Error for RejectedOp {}

/// Selectable type for a newly added field, with its default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    DateTime,
    List,
    Record,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::List,
        FieldType::Record,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::List => "list",
            Self::Record => "record",
        }
    }

    pub fn default_value(&self) -> Value {
        match self {
            Self::Text => Value::Text(String::new()),
            Self::Number => Value::Number(0.0),
            Self::Boolean => Value::Bool(false),
            Self::Date => Value::Text(date::today().format_date()),
            Self::DateTime => Value::Text(date::now().format_seconds()),
            Self::List => Value::List(Vec::new()),
            Self::Record => Value::Object(Default::default()),
        }
    }
}
