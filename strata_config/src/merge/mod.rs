//! Layered merging of partial result mappings.
//!
//! Layers are supplied highest priority first and folded lowest priority
//! first: each layer overrides the accumulator built from the layers below
//! it. When both sides hold a mapping for the same key the two are merged by
//! key; every other collision is settled by an [`OverrideStrategy`].
//!
//! ```
//! use serde_json::{Map, Value, json};
//! use strata_config::{MergeStrategy, merge};
//!
//! fn map(value: Value) -> Map<String, Value> {
//!     value.as_object().cloned().unwrap_or_default()
//! }
//!
//! let layers = vec![
//!     map(json!({"values": [3], "name": "cli"})),
//!     map(json!({"values": [1, 2], "name": "file", "port": 80})),
//! ];
//! let merged = merge(layers, &MergeStrategy::MergeCollections);
//! assert_eq!(json!(merged), json!({"values": [1, 2, 3], "name": "cli", "port": 80}));
//! ```

use serde_json::{Map, Value};
use tracing::trace;

use crate::Layer;

/// Policy deciding how a higher-priority value combines with a
/// lower-priority value for the same key.
pub trait OverrideStrategy {
    /// Whether two mappings under the same key are merged key by key.
    ///
    /// When `false`, mappings are handed to [`Self::override_value`] like any
    /// other value.
    fn merges_mappings(&self) -> bool {
        true
    }

    /// Combine `lower` (accumulated so far) with `upper` (incoming, higher
    /// priority).
    fn override_value(&self, lower: Value, upper: Value) -> Value;
}

/// Built-in override strategies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MergeStrategy {
    /// Arrays accumulate (lower elements first); anything else is replaced
    /// by the higher-priority value.
    #[default]
    MergeCollections,
    /// The higher-priority value always wins outright, mappings included.
    Replace,
}

impl OverrideStrategy for MergeStrategy {
    fn merges_mappings(&self) -> bool {
        matches!(self, Self::MergeCollections)
    }

    fn override_value(&self, lower: Value, upper: Value) -> Value {
        match (self, lower, upper) {
            (Self::MergeCollections, Value::Array(mut items), Value::Array(appended)) => {
                items.extend(appended);
                Value::Array(items)
            }
            (_, _, incoming) => incoming,
        }
    }
}

impl<S: OverrideStrategy + ?Sized> OverrideStrategy for &S {
    fn merges_mappings(&self) -> bool {
        (**self).merges_mappings()
    }

    fn override_value(&self, lower: Value, upper: Value) -> Value {
        (**self).override_value(lower, upper)
    }
}

/// Overlay `upper` onto `lower` in place.
///
/// Keys absent from `lower`, or holding `null` there, take the incoming value
/// as is.
pub fn merge_into<S>(lower: &mut Map<String, Value>, upper: Map<String, Value>, strategy: &S)
where
    S: OverrideStrategy + ?Sized,
{
    for (key, incoming) in upper {
        match lower.get_mut(&key) {
            Some(existing) if !existing.is_null() => {
                let current = existing.take();
                *existing = combine(current, incoming, strategy);
            }
            _ => {
                lower.insert(key, incoming);
            }
        }
    }
}

fn combine<S>(existing: Value, incoming: Value, strategy: &S) -> Value
where
    S: OverrideStrategy + ?Sized,
{
    match (existing, incoming) {
        (Value::Object(mut lower), Value::Object(upper)) if strategy.merges_mappings() => {
            merge_into(&mut lower, upper, strategy);
            Value::Object(lower)
        }
        (lower, upper) => strategy.override_value(lower, upper),
    }
}

/// Fold `results`, ordered highest priority first, into one mapping.
///
/// An empty list yields an empty mapping; a single result is returned
/// unchanged.
#[must_use]
pub fn merge<S>(results: Vec<Map<String, Value>>, strategy: &S) -> Map<String, Value>
where
    S: OverrideStrategy + ?Sized,
{
    let mut merged = Map::new();
    for result in results.into_iter().rev() {
        merge_into(&mut merged, result, strategy);
    }
    merged
}

/// Fold provider layers, ordered highest priority first, into one mapping.
#[must_use]
pub fn merge_layers<S>(layers: Vec<Layer>, strategy: &S) -> Map<String, Value>
where
    S: OverrideStrategy + ?Sized,
{
    let mut merged = Map::new();
    for layer in layers.into_iter().rev() {
        trace!(provenance = ?layer.provenance(), path = ?layer.path(), "merging layer");
        merge_into(&mut merged, layer.into_value(), strategy);
    }
    merged
}

#[cfg(test)]
mod tests;
