//! Schema-less editor for nested records, built for correcting OCR output
//! where field names, types, and nesting are only known at runtime. Values
//! are classified by shape, routed to a leaf, record, or list editor, and
//! every completed edit produces a whole new tree.

pub mod core;
pub mod editor;

pub use crate::core::{Classification, Kind, PathSegment, Value, ValuePath, classify};
pub use crate::editor::{
    EditOp, EditorSession, FieldType, LabelFormatter, LeafEditor, ListEditor, MAX_DEPTH,
    NodeEditor, RecordEditor, RejectedOp, Row,
};
