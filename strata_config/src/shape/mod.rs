//! Target shapes and the leaf paths derived from them.
//!
//! A [`Shape`] is the JSON Schema of a target type split into its root node
//! and a side-table of named definitions. Providers that expose a per-field
//! surface (flags, environment) call [`Shape::leaves`] to discover the
//! addressable leaves; file providers ignore the shape entirely.
//!
//! ```
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use strata_config::{LeafKind, Shape};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Inner {
//!     option_a: String,
//! }
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Outer {
//!     nested: Inner,
//!     option_c: u32,
//! }
//!
//! let leaves = Shape::of::<Outer>().leaves()?;
//! let paths: Vec<String> = leaves.iter().map(|leaf| leaf.path.to_string()).collect();
//! assert_eq!(paths, ["nested.option_a", "option_c"]);
//! assert_eq!(leaves[1].kind, LeafKind::Integer);
//! # Ok::<_, strata_config::StrataError>(())
//! ```

mod coerce;
mod leaf;
mod resolve;
mod scalar;
mod walk;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::StrataResult;

pub use leaf::{ArrayItems, Leaf, LeafKind, LeafPath};
pub use scalar::{ScalarKind, ScalarParseError};
pub(crate) use walk::strip_nullable;

const DEFINITION_KEYS: [&str; 2] = ["$defs", "definitions"];

/// Capabilities the loader needs from a target type: describing its shape
/// and being constructed from a mapping.
///
/// Implemented for every type that derives both `JsonSchema` and
/// `Deserialize`.
pub trait Model: DeserializeOwned {
    /// Describe the shape of `Self`.
    fn shape() -> Shape;
}

impl<T> Model for T
where
    T: JsonSchema + DeserializeOwned,
{
    fn shape() -> Shape {
        Shape::of::<T>()
    }
}

/// Schema of a target type together with its named definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    root: Value,
    definitions: Map<String, Value>,
}

impl Shape {
    /// Generate the shape of `T` from its `JsonSchema` implementation.
    #[must_use]
    pub fn of<T: JsonSchema>() -> Self {
        Self::from_schema(schemars::schema_for!(T).to_value())
    }

    /// Split a raw JSON Schema document into root and definitions.
    ///
    /// Both `$defs` and the legacy `definitions` tables are recognised.
    #[must_use]
    pub fn from_schema(schema: Value) -> Self {
        let mut root = schema;
        let mut definitions = Map::new();
        if let Some(node) = root.as_object_mut() {
            for key in DEFINITION_KEYS {
                if let Some(Value::Object(table)) = node.remove(key) {
                    definitions.extend(table);
                }
            }
        }
        Self { root, definitions }
    }

    /// Root schema node, possibly containing references.
    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    /// Named definitions the root may refer to.
    #[must_use]
    pub const fn definitions(&self) -> &Map<String, Value> {
        &self.definitions
    }

    const fn refs(&self) -> resolve::RefTable<'_> {
        resolve::RefTable::new(&self.root, &self.definitions)
    }

    /// Human-readable name of the shape, taken from the schema title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.root.get("title").and_then(Value::as_str)
    }

    /// Return a copy of the root schema with every reference substituted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::UnresolvedReference`] for dangling
    /// references and [`crate::StrataError::CyclicReference`] for
    /// self-referential definitions.
    pub fn resolve(&self) -> StrataResult<Value> {
        resolve::resolve_refs(self.refs())
    }

    /// List every leaf of the shape in property declaration order.
    ///
    /// # Errors
    ///
    /// Propagates reference resolution failures from [`Shape::resolve`].
    pub fn leaves(&self) -> StrataResult<Vec<Leaf>> {
        let resolved = self.resolve()?;
        Ok(walk::collect_leaves(&resolved))
    }

    /// Convert string leaves of `value` to the numeric or boolean kinds the
    /// shape declares for them, where the string is a valid literal.
    pub fn coerce(&self, value: &mut Value) {
        coerce::coerce(value, &self.root, self.refs());
    }
}

#[cfg(test)]
mod tests;
