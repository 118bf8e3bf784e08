//! Depth-first walk from a resolved schema to its leaves.

use serde_json::{Map, Value};
use tracing::trace;

use super::leaf::{Leaf, LeafKind, LeafPath};

/// Unwrap the nullable wrappers schema generators emit for optional values.
///
/// An `anyOf`/`oneOf` with exactly one non-null branch is replaced by that
/// branch; anything else is returned unchanged.
pub(crate) fn strip_nullable(schema: &Value) -> &Value {
    for keyword in ["anyOf", "oneOf"] {
        if let Some(Value::Array(branches)) = schema.get(keyword) {
            let mut non_null = branches.iter().filter(|branch| !is_null_schema(branch));
            if let (Some(only), None) = (non_null.next(), non_null.next()) {
                return strip_nullable(only);
            }
        }
    }
    schema
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

/// Returns the declared properties of an object-like schema.
pub(crate) fn object_properties(schema: &Value) -> Option<&Map<String, Value>> {
    let properties = schema.get("properties")?.as_object()?;
    match LeafKind::of(schema) {
        LeafKind::Object | LeafKind::Unknown => Some(properties),
        _ => None,
    }
}

/// Collect every leaf of `schema` in property declaration order.
///
/// A root that is not an object with properties has no addressable leaves.
pub(crate) fn collect_leaves(schema: &Value) -> Vec<Leaf> {
    let mut leaves = Vec::new();
    if let Some(properties) = object_properties(strip_nullable(schema)) {
        let mut prefix = Vec::new();
        walk_properties(properties, &mut prefix, &mut leaves);
    }
    leaves
}

fn walk_properties(properties: &Map<String, Value>, prefix: &mut Vec<String>, leaves: &mut Vec<Leaf>) {
    for (name, subschema) in properties {
        prefix.push(name.clone());
        walk(subschema, prefix, leaves);
        prefix.pop();
    }
}

fn walk(schema: &Value, prefix: &mut Vec<String>, leaves: &mut Vec<Leaf>) {
    let node = strip_nullable(schema);
    if let Some(properties) = object_properties(node) {
        walk_properties(properties, prefix, leaves);
        return;
    }
    let Some(path) = LeafPath::new(prefix.iter().cloned()) else {
        return;
    };
    let kind = LeafKind::of(node);
    trace!(%path, ?kind, "discovered leaf");
    leaves.push(Leaf {
        path,
        kind,
        schema: node.clone(),
    });
}
