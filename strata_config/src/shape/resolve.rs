//! Reference resolution against the definitions side-table.
//!
//! Resolution is a pure function: the input schema and definitions are never
//! mutated, and every substitution produces a fresh subtree. A definition may
//! be substituted many times in one pass (siblings sharing a type), but never
//! twice on the same resolution path.

use serde_json::{Map, Value};

use crate::{StrataError, StrataResult};

const REF: &str = "$ref";
const ROOT_REF: &str = "#";
const LOCAL_PREFIXES: [&str; 2] = ["#/$defs/", "#/definitions/"];

/// Return the definition name referenced by `reference`.
///
/// Accepts local JSON pointers (`#/$defs/Name`, `#/definitions/Name`) and
/// bare names. Pointer escapes (`~1`, `~0`) are decoded.
pub(crate) fn definition_name(reference: &str) -> Option<String> {
    let raw = LOCAL_PREFIXES
        .iter()
        .find_map(|prefix| reference.strip_prefix(prefix))
        .or_else(|| (!reference.contains(['#', '/'])).then_some(reference))?;
    if raw.is_empty() {
        return None;
    }
    Some(raw.replace("~1", "/").replace("~0", "~"))
}

/// Reference targets of one shape: the root node and its definitions.
#[derive(Clone, Copy)]
pub(crate) struct RefTable<'s> {
    root: &'s Value,
    definitions: &'s Map<String, Value>,
}

impl<'s> RefTable<'s> {
    pub(crate) const fn new(root: &'s Value, definitions: &'s Map<String, Value>) -> Self {
        Self { root, definitions }
    }

    /// Look up the node referenced by `reference`, returning the key it is
    /// tracked under on a resolution path.
    ///
    /// `#` refers to the root itself, which is how a recursive root type
    /// points back at itself.
    pub(crate) fn lookup(&self, reference: &str) -> StrataResult<(String, &'s Value)> {
        if reference == ROOT_REF {
            return Ok((ROOT_REF.to_owned(), self.root));
        }
        let unresolved = || StrataError::UnresolvedReference {
            reference: reference.to_owned(),
        };
        let name = definition_name(reference).ok_or_else(unresolved)?;
        let target = self.definitions.get(&name).ok_or_else(unresolved)?;
        Ok((name, target))
    }

    /// Name shown for `key` in cycle reports.
    fn display_name(&self, key: &str) -> String {
        if key == ROOT_REF {
            return self
                .root
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(ROOT_REF)
                .to_owned();
        }
        key.to_owned()
    }
}

/// Substitute `target` for the reference node `node`, keeping sibling
/// keywords the definition does not itself define.
pub(crate) fn substitute(node: &Map<String, Value>, target: &Value) -> Value {
    let Value::Object(definition) = target else {
        return target.clone();
    };
    let mut merged = definition.clone();
    for (key, value) in node {
        if key != REF && !merged.contains_key(key) {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

/// Produce a copy of the root with every reference substituted.
///
/// The root starts the resolution path, so a reference back to it (`#`) is a
/// cycle like any other.
///
/// # Errors
///
/// Returns [`StrataError::UnresolvedReference`] when a reference names no
/// definition and [`StrataError::CyclicReference`] when a definition refers
/// back to itself.
pub(crate) fn resolve_refs(refs: RefTable<'_>) -> StrataResult<Value> {
    let mut stack = vec![ROOT_REF.to_owned()];
    resolve_value(refs.root, refs, &mut stack)
}

fn resolve_value(value: &Value, refs: RefTable<'_>, stack: &mut Vec<String>) -> StrataResult<Value> {
    match value {
        Value::Object(node) => resolve_object(node, refs, stack),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(item, refs, stack))
            .collect::<StrataResult<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn resolve_object(
    node: &Map<String, Value>,
    refs: RefTable<'_>,
    stack: &mut Vec<String>,
) -> StrataResult<Value> {
    let Some(reference) = node.get(REF).and_then(Value::as_str) else {
        return node
            .iter()
            .map(|(key, child)| Ok((key.clone(), resolve_value(child, refs, stack)?)))
            .collect::<StrataResult<Map<_, _>>>()
            .map(Value::Object);
    };

    let (name, target) = refs.lookup(reference)?;
    if let Some(start) = stack.iter().position(|seen| *seen == name) {
        let cycle: Vec<String> = stack
            .iter()
            .skip(start)
            .chain(std::iter::once(&name))
            .map(|key| refs.display_name(key))
            .collect();
        return Err(StrataError::CyclicReference {
            cycle: cycle.join(" -> "),
        });
    }

    let substituted = substitute(node, target);
    stack.push(name);
    let result = resolve_value(&substituted, refs, stack);
    stack.pop();
    result
}
