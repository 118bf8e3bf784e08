//! Environment variable provider.
//!
//! Each leaf of the target shape is looked up under a variable named by its
//! path segments, upper-cased and joined with `_`, after an optional prefix.
//! Values are passed through as raw strings; conversion to the declared leaf
//! kind happens when the merged mapping is constructed.

use std::ffi::OsString;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    Leaf, LeafKind, LeafPath, Provenance, Provider, Shape, StrataError, StrataResult,
    insert_at_path,
};

const DEFAULT_ARRAY_SEPARATOR: &str = ",";

/// Provider reading configuration from environment variables.
///
/// Array leaves are ignored unless [`EnvProvider::allow_arrays`] is enabled,
/// in which case their value is split on the array separator.
///
/// ```
/// use strata_config::{EnvProvider, LeafPath};
///
/// let env = EnvProvider::new().prefixed("APP_");
/// let path = LeafPath::new(["database", "pool_size"]).expect("non-empty");
/// assert_eq!(env.variable_name(&path), "APP_DATABASE_POOL_SIZE");
/// ```
#[derive(Clone, Debug)]
pub struct EnvProvider {
    prefix: String,
    arrays: bool,
    separator: String,
}

impl Default for EnvProvider {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            arrays: false,
            separator: DEFAULT_ARRAY_SEPARATOR.to_owned(),
        }
    }
}

impl EnvProvider {
    /// Provider with no prefix and array leaves disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` verbatim to every variable name.
    #[must_use]
    pub fn prefixed(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Read array leaves, splitting their values on the array separator.
    #[must_use]
    pub const fn allow_arrays(mut self, enabled: bool) -> Self {
        self.arrays = enabled;
        self
    }

    /// Separator used to split array values; defaults to `,`.
    #[must_use]
    pub fn array_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Variable consulted for the leaf at `path`.
    #[must_use]
    pub fn variable_name(&self, path: &LeafPath) -> String {
        let mut name = self.prefix.clone();
        let joined = path
            .segments()
            .iter()
            .map(|segment| segment.to_uppercase())
            .collect::<Vec<_>>()
            .join("_");
        name.push_str(&joined);
        name
    }

    fn value_for(&self, leaf: &Leaf, variable: &str, os_value: OsString) -> StrataResult<Value> {
        let raw = os_value
            .into_string()
            .map_err(|_| StrataError::Environment {
                variable: variable.to_owned(),
                message: "value is not valid unicode".to_owned(),
            })?;
        if leaf.kind == LeafKind::Array {
            return Ok(Value::Array(
                raw.split(self.separator.as_str())
                    .map(|item| Value::String(item.to_owned()))
                    .collect(),
            ));
        }
        Ok(Value::String(raw))
    }
}

impl Provider for EnvProvider {
    fn provenance(&self) -> Provenance {
        Provenance::Environment
    }

    fn provide(&self, shape: &Shape) -> StrataResult<Map<String, Value>> {
        let mut tree = Map::new();
        for leaf in shape.leaves()? {
            if leaf.kind == LeafKind::Array && !self.arrays {
                trace!(path = %leaf.path, "array leaf skipped");
                continue;
            }
            let variable = self.variable_name(&leaf.path);
            let Some(raw) = std::env::var_os(&variable) else {
                continue;
            };
            let value = self.value_for(&leaf, &variable, raw)?;
            trace!(%variable, path = %leaf.path, "environment variable supplied");
            insert_at_path(&mut tree, &leaf.path, value);
        }
        debug!(prefix = %self.prefix, keys = tree.len(), "collected environment values");
        Ok(tree)
    }
}
