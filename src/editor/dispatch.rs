use crate::core::classify::{Kind, classify};
use crate::core::value::Value;
use crate::core::value_path::{PathSegment, ValuePath};
use crate::editor::leaf::LeafEditor;
use crate::editor::list::ListEditor;
use crate::editor::record::RecordEditor;
use crate::editor::{FieldType, RejectedOp};

/// Hard recursion bound: the root sits at depth 0, and any node past this
/// depth becomes a terminal, non-editable marker.
pub const MAX_DEPTH: usize = 5;

/// Where a node routes after classification.
pub enum NodeEditor {
    Leaf(LeafEditor),
    Record(RecordEditor),
    List(ListEditor),
    /// Terminal marker past the depth bound; accepts no edits.
    DepthLimit,
}

pub fn dispatch(value: &Value, label: &str, depth: usize) -> NodeEditor {
    if depth > MAX_DEPTH {
        return NodeEditor::DepthLimit;
    }
    match classify(value).kind {
        Kind::List => NodeEditor::List(ListEditor::from_value(value)),
        Kind::Record => NodeEditor::Record(RecordEditor::from_value(value)),
        _ => NodeEditor::Leaf(LeafEditor::new(label, value.clone())),
    }
}

/// The closed set of mutations, addressed at the node a path points to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Replace the node wholesale (a leaf save, bubbled up).
    Set(Value),
    SetField { key: String, value: Value },
    AddField { name: String, ty: FieldType },
    RemoveField(String),
    SetItem { index: usize, value: Value },
    AddItem,
    RemoveItem(usize),
}

/// Applies `op` at `path` and rebuilds every container on the way back up:
/// each level expresses its child's change as "replace this key/index in
/// me", so a single leaf edit becomes a whole new root. The input root is
/// never mutated; untouched siblings are copied structurally.
pub fn apply(root: &Value, path: &ValuePath, op: EditOp) -> Result<Value, RejectedOp> {
    if path.len() > MAX_DEPTH {
        return Err(RejectedOp::DepthLimit);
    }
    apply_at(root, path.segments(), op, path)
}

fn apply_at(
    node: &Value,
    rest: &[PathSegment],
    op: EditOp,
    full: &ValuePath,
) -> Result<Value, RejectedOp> {
    let Some((head, tail)) = rest.split_first() else {
        return apply_here(node, op, full);
    };
    match (head, node) {
        (PathSegment::Key(key), Value::Object(fields)) => {
            let child = fields
                .get(key.as_str())
                .ok_or_else(|| RejectedOp::MissingPath(full.to_string()))?;
            let replaced = apply_at(child, tail, op, full)?;
            let mut next = fields.clone();
            next.insert(key.clone(), replaced);
            Ok(Value::Object(next))
        }
        (PathSegment::Index(idx), Value::List(items)) => {
            let child = items
                .get(*idx)
                .ok_or_else(|| RejectedOp::MissingPath(full.to_string()))?;
            let replaced = apply_at(child, tail, op, full)?;
            let mut next = items.clone();
            next[*idx] = replaced;
            Ok(Value::List(next))
        }
        _ => Err(RejectedOp::MissingPath(full.to_string())),
    }
}

fn apply_here(node: &Value, op: EditOp, full: &ValuePath) -> Result<Value, RejectedOp> {
    match op {
        EditOp::Set(value) => Ok(value),
        EditOp::SetField { key, value } => {
            require_record(node, full)?;
            Ok(RecordEditor::from_value(node).set_field(key, value).into_value())
        }
        EditOp::AddField { name, ty } => {
            require_record(node, full)?;
            Ok(RecordEditor::from_value(node).add_field(&name, ty)?.into_value())
        }
        EditOp::RemoveField(key) => {
            require_record(node, full)?;
            Ok(RecordEditor::from_value(node).remove_field(&key).into_value())
        }
        EditOp::SetItem { index, value } => {
            require_list(node, full)?;
            Ok(ListEditor::from_value(node).set_item(index, value)?.into_value())
        }
        EditOp::AddItem => {
            require_list(node, full)?;
            Ok(ListEditor::from_value(node).add_item().into_value())
        }
        EditOp::RemoveItem(index) => {
            require_list(node, full)?;
            Ok(ListEditor::from_value(node).remove_item(index)?.into_value())
        }
    }
}

fn require_record(node: &Value, full: &ValuePath) -> Result<(), RejectedOp> {
    match node {
        Value::Object(_) => Ok(()),
        _ => Err(RejectedOp::NotAContainer(full.to_string())),
    }
}

fn require_list(node: &Value, full: &ValuePath) -> Result<(), RejectedOp> {
    match node {
        Value::List(_) => Ok(()),
        _ => Err(RejectedOp::NotAContainer(full.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{EditOp, NodeEditor, apply, dispatch};
    use crate::core::{Value, ValuePath};
    use crate::editor::{FieldType, RejectedOp};
    use serde_json::json;

    fn tree() -> Value {
        Value::from_json(&json!({
            "tax_folio": "AB-12",
            "concepts": [
                {"description": "viaje", "import_total": 150.5},
                {"description": "peaje", "import_total": 30.0}
            ]
        }))
    }

    #[test]
    fn dispatch_routes_by_classification() {
        assert!(matches!(
            dispatch(&Value::from_json(&json!({"a": 1})), "r", 0),
            NodeEditor::Record(_)
        ));
        assert!(matches!(
            dispatch(&Value::from_json(&json!([1])), "l", 3),
            NodeEditor::List(_)
        ));
        assert!(matches!(
            dispatch(&Value::Text("x".into()), "s", 5),
            NodeEditor::Leaf(_)
        ));
        assert!(matches!(
            dispatch(&Value::Text("x".into()), "s", 6),
            NodeEditor::DepthLimit
        ));
    }

    #[test]
    fn leaf_edit_becomes_a_new_root() {
        let root = tree();
        let path = ValuePath::parse("concepts[0].import_total").expect("path");
        let next = apply(&root, &path, EditOp::Set(Value::Number(175.0))).expect("apply");

        assert_eq!(next.get_path(&path), Some(&Value::Number(175.0)));
        // untouched siblings survive structurally
        let sibling = ValuePath::parse("concepts[1].import_total").expect("path");
        assert_eq!(next.get_path(&sibling), Some(&Value::Number(30.0)));
        // the pre-edit tree is still what it was
        assert_eq!(root, tree());
    }

    #[test]
    fn container_ops_apply_at_the_addressed_node() {
        let root = tree();
        let concepts = ValuePath::parse("concepts").expect("path");

        let grown = apply(&root, &concepts, EditOp::AddItem).expect("add");
        assert_eq!(grown.get_path(&concepts).map(Value::child_count), Some(3));

        let shrunk = apply(&root, &concepts, EditOp::RemoveItem(0)).expect("remove");
        let first = ValuePath::parse("concepts[0].description").expect("path");
        assert_eq!(
            shrunk.get_path(&first).and_then(Value::as_text),
            Some("peaje")
        );

        let renamed = apply(
            &root,
            &ValuePath::root(),
            EditOp::AddField {
                name: "total".into(),
                ty: FieldType::Number,
            },
        )
        .expect("add field");
        assert_eq!(
            renamed.get_path(&ValuePath::parse("total").expect("path")),
            Some(&Value::Number(0.0))
        );
    }

    #[test]
    fn rejections_leave_everything_unchanged() {
        let root = tree();
        let missing = ValuePath::parse("concepts[9].x").expect("path");
        let err = apply(&root, &missing, EditOp::Set(Value::None)).expect_err("missing");
        assert!(matches!(err, RejectedOp::MissingPath(_)));

        let err = apply(
            &root,
            &ValuePath::parse("tax_folio").expect("path"),
            EditOp::AddItem,
        )
        .expect_err("not a list");
        assert!(matches!(err, RejectedOp::NotAContainer(_)));

        let err = apply(
            &root,
            &ValuePath::root(),
            EditOp::AddField {
                name: "tax_folio".into(),
                ty: FieldType::Text,
            },
        )
        .expect_err("duplicate");
        assert_eq!(err, RejectedOp::DuplicateField("tax_folio".to_string()));
        assert_eq!(root, tree());
    }

    #[test]
    fn ops_past_the_depth_bound_are_rejected() {
        // six segments addresses a node at depth 6
        let mut deep = json!("leaf");
        for _ in 0..6 {
            deep = json!({ "k": deep });
        }
        let root = Value::from_json(&deep);
        let edit_path = ValuePath::parse("k.k.k.k.k.k").expect("path");
        assert_eq!(
            apply(&root, &edit_path, EditOp::Set(Value::None)).expect_err("too deep"),
            RejectedOp::DepthLimit
        );

        let at_bound = ValuePath::parse("k.k.k.k.k").expect("path");
        assert!(apply(&root, &at_bound, EditOp::Set(Value::None)).is_ok());
    }
}
