//! Conversions between flat path/value pairs and nested mappings.
//!
//! Providers that discover values per leaf (flags, environment) collect them
//! as `(LeafPath, Value)` pairs and reassemble a nested partial mapping with
//! [`insert_at_path`]. The flag provider additionally translates paths to
//! and from external flag names through [`FlagTable`].

mod names;

use serde_json::{Map, Value};

use crate::LeafPath;

pub use names::{FlagTable, path_to_flag_name};

/// Insert `value` at `path`, creating intermediate mappings as needed.
///
/// Paths handed to this function come from one consistent shape, so an
/// intermediate segment never holds a scalar; should that happen the scalar
/// is replaced by a mapping (and debug builds assert).
///
/// ```
/// use serde_json::{Map, json};
/// use strata_config::{LeafPath, insert_at_path};
///
/// let mut tree = Map::new();
/// let path = LeafPath::new(["nested", "option_a"]).expect("non-empty");
/// insert_at_path(&mut tree, &path, json!("test"));
/// assert_eq!(json!(tree), json!({"nested": {"option_a": "test"}}));
/// ```
pub fn insert_at_path(tree: &mut Map<String, Value>, path: &LeafPath, value: Value) {
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let mut node = tree;
    for segment in parents {
        let slot = node
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        debug_assert!(
            slot.is_object(),
            "segment '{segment}' of '{path}' already holds a scalar"
        );
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(child) = slot else {
            return;
        };
        node = child;
    }
    node.insert(last.clone(), value);
}

/// Build a nested mapping from flat `(path, value)` pairs.
///
/// Later pairs win when two pairs address the same leaf.
///
/// ```
/// use serde_json::json;
/// use strata_config::{LeafPath, build_tree};
///
/// let pairs = [
///     (LeafPath::new(["a", "b"]).expect("non-empty"), json!(1)),
///     (LeafPath::new(["a", "c"]).expect("non-empty"), json!(2)),
///     (LeafPath::new(["d"]).expect("non-empty"), json!(3)),
/// ];
/// assert_eq!(json!(build_tree(pairs)), json!({"a": {"b": 1, "c": 2}, "d": 3}));
/// ```
#[must_use]
pub fn build_tree<I>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (LeafPath, Value)>,
{
    let mut tree = Map::new();
    for (path, value) in pairs {
        insert_at_path(&mut tree, &path, value);
    }
    tree
}
