use std::collections::HashSet;

use serde::Serialize;
use unicode_width::UnicodeWidthChar;

use crate::core::classify::{Kind, classify};
use crate::core::value::{Value, format_number};
use crate::core::value_path::ValuePath;
use crate::editor::dispatch::{self, EditOp, MAX_DEPTH, NodeEditor};
use crate::editor::labels::{LabelFormatter, NoLabels, display_label};
use crate::editor::leaf::LeafEditor;
use crate::editor::RejectedOp;

const PREVIEW_WIDTH: usize = 32;
const DEPTH_MARKER: &str = "Profundidad máxima alcanzada";

/// One visible node in the flattened tree snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub path: String,
    pub label: String,
    pub depth: usize,
    /// `None` past the depth bound: the row is a terminal marker.
    pub kind: Option<Kind>,
    pub children: usize,
    pub preview: String,
    pub expanded: bool,
    pub editable: bool,
}

/// Owns the canonical tree for one edit session. Every completed operation
/// swaps in a whole new root and reports it through `on_change` exactly
/// once; rejected operations change nothing. The session holds no copy of
/// the record beyond the current tree.
pub struct EditorSession {
    label: String,
    schema_hint: String,
    root: Value,
    expanded: HashSet<String>,
    formatter: Box<dyn LabelFormatter>,
    on_change: Option<Box<dyn FnMut(&Value)>>,
}

impl EditorSession {
    pub fn new(label: impl Into<String>, root: Value) -> Self {
        Self {
            label: label.into(),
            schema_hint: String::new(),
            root,
            // only the root starts expanded; deeper containers are opened
            // explicitly
            expanded: HashSet::from([String::new()]),
            formatter: Box::new(NoLabels),
            on_change: None,
        }
    }

    pub fn with_schema_hint(mut self, hint: impl Into<String>) -> Self {
        self.schema_hint = hint.into();
        self
    }

    pub fn with_formatter(mut self, formatter: impl LabelFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&Value) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the tree wholesale (a freshly loaded OCR result) and resets
    /// the expansion state.
    pub fn load(&mut self, root: Value) {
        self.root = root;
        self.expanded = HashSet::from([String::new()]);
    }

    /// Applies one operation and, on success, swaps the root and fires
    /// `on_change` with the new tree. Rejections leave the session
    /// untouched.
    pub fn apply(&mut self, path: &ValuePath, op: EditOp) -> Result<(), RejectedOp> {
        let next = dispatch::apply(&self.root, path, op.clone())?;
        match &op {
            EditOp::RemoveField(key) => self.prune_expanded(&path.child(key.clone())),
            EditOp::RemoveItem(index) => self.prune_expanded(&path.index(*index)),
            _ => {}
        }
        self.root = next;
        if let Some(callback) = &mut self.on_change {
            callback(&self.root);
        }
        Ok(())
    }

    pub fn is_expanded(&self, path: &ValuePath) -> bool {
        self.expanded.contains(&path.to_string())
    }

    pub fn toggle_expanded(&mut self, path: &ValuePath) {
        let Some(value) = self.root.get_path(path) else {
            return;
        };
        if !value.is_container() || path.len() > MAX_DEPTH {
            return;
        }
        let key = path.to_string();
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    /// Flattened snapshot of the visible tree, depth-first, honoring the
    /// expansion state and the depth bound.
    pub fn rows(&self) -> Vec<Row> {
        let mut out = Vec::new();
        let label = self.label.clone();
        self.push_rows(&mut out, &self.root, &ValuePath::root(), &label, 0);
        out
    }

    /// Clipboard-export text for the node at `path`.
    pub fn copy_value(&self, path: &ValuePath) -> Option<String> {
        self.root.get_path(path).map(Value::pretty)
    }

    /// A leaf editor primed for the scalar at `path`. Containers and nodes
    /// past the depth bound yield `None`.
    pub fn leaf_editor(&self, path: &ValuePath) -> Option<LeafEditor> {
        let value = self.root.get_path(path)?;
        let label = match path.leaf_key() {
            Some(key) => display_label(self.formatter.as_ref(), &self.schema_hint, &key),
            None => self.label.clone(),
        };
        match dispatch::dispatch(value, &label, path.len()) {
            NodeEditor::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    fn push_rows(
        &self,
        out: &mut Vec<Row>,
        value: &Value,
        path: &ValuePath,
        raw_label: &str,
        depth: usize,
    ) {
        let path_str = path.to_string();
        if depth > MAX_DEPTH {
            out.push(Row {
                path: path_str,
                label: raw_label.to_string(),
                depth,
                kind: None,
                children: 0,
                preview: DEPTH_MARKER.to_string(),
                expanded: false,
                editable: false,
            });
            return;
        }

        let classification = classify(value);
        let expanded = value.is_container() && self.expanded.contains(&path_str);
        out.push(Row {
            path: path_str,
            label: display_label(self.formatter.as_ref(), &self.schema_hint, raw_label),
            depth,
            kind: Some(classification.kind),
            children: value.child_count(),
            preview: preview_of(value),
            expanded,
            editable: true,
        });

        if !expanded {
            return;
        }
        match value {
            Value::Object(fields) => {
                for (key, child) in fields {
                    self.push_rows(out, child, &path.child(key.clone()), key, depth + 1);
                }
            }
            Value::List(items) => {
                for (idx, child) in items.iter().enumerate() {
                    let label = format!("Elemento {idx}");
                    self.push_rows(out, child, &path.index(idx), &label, depth + 1);
                }
            }
            _ => {}
        }
    }

    fn prune_expanded(&mut self, removed: &ValuePath) {
        let removed_str = removed.to_string();
        self.expanded.retain(|entry| {
            if *entry == removed_str {
                return false;
            }
            match ValuePath::parse(entry) {
                Ok(parsed) => !parsed.starts_with(removed),
                Err(_) => true,
            }
        });
    }
}

fn preview_of(value: &Value) -> String {
    match value {
        Value::Text(text) => format!("\"{}\"", truncate_width(text.trim(), PREVIEW_WIDTH)),
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::None => "null".to_string(),
        Value::Object(fields) => format!("{{{}}}", fields.len()),
        Value::List(items) => format!("[{}]", items.len()),
    }
}

fn truncate_width(text: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            out.push_str("...");
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}
