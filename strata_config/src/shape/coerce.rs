//! Lenient string-to-scalar coercion applied before construction.
//!
//! Environment variables arrive as raw strings. Before the merged mapping is
//! handed to the target type, string leaves whose declared kind is numeric or
//! boolean are converted when the string is a valid literal of that kind.
//! Anything else is left alone so the target's own deserialisation reports
//! the mismatch.
//!
//! References are followed lazily, one hop per level of data, so recursive
//! definitions terminate as soon as the data runs out.

use serde_json::Value;

use super::leaf::{ArrayItems, LeafKind, array_items};
use super::resolve::{RefTable, substitute};
use super::scalar::ScalarKind;
use super::walk::strip_nullable;

const MAX_REF_HOPS: usize = 32;

/// Coerce string leaves of `value` towards the kinds declared by `schema`.
pub(crate) fn coerce(value: &mut Value, schema: &Value, refs: RefTable<'_>) {
    let node = concrete(schema, refs);
    match value {
        Value::Object(map) => {
            let Some(properties) = node.get("properties").and_then(Value::as_object) else {
                return;
            };
            for (key, child) in map.iter_mut() {
                if let Some(subschema) = properties.get(key) {
                    coerce(child, subschema, refs);
                }
            }
        }
        Value::Array(items) => match array_items(&node) {
            ArrayItems::Uniform(item) => {
                for element in items.iter_mut() {
                    coerce(element, item, refs);
                }
            }
            ArrayItems::Tuple(positions) => {
                for (element, position) in items.iter_mut().zip(positions) {
                    coerce(element, position, refs);
                }
            }
            ArrayItems::Unspecified => {}
        },
        Value::String(raw) => {
            let parsed = match LeafKind::of(&node) {
                LeafKind::String => None,
                kind => ScalarKind::from_leaf_kind(kind).and_then(|scalar| scalar.parse(raw).ok()),
            };
            if let Some(parsed) = parsed {
                *value = parsed;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Follow references and nullable wrappers until a concrete node remains.
///
/// Unresolvable references stop the walk; the reference node is returned as
/// is and coercion below it becomes a no-op.
fn concrete(schema: &Value, refs: RefTable<'_>) -> Value {
    let mut current = strip_nullable(schema).clone();
    for _ in 0..MAX_REF_HOPS {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            break;
        };
        let Ok((_, target)) = refs.lookup(reference) else {
            break;
        };
        let Value::Object(node) = &current else {
            break;
        };
        let substituted = substitute(node, target);
        current = strip_nullable(&substituted).clone();
    }
    current
}
