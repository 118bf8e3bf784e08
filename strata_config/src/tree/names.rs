//! Translation between leaf paths and external flag names.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{LeafPath, StrataError, StrataResult};

/// Canonical flag name for `path`: segments joined with `-`, with every `_`
/// turned into `-`.
///
/// ```
/// use strata_config::{LeafPath, path_to_flag_name};
///
/// let path = LeafPath::new(["nested", "option_a"]).expect("non-empty");
/// assert_eq!(path_to_flag_name(&path), "nested-option-a");
/// ```
#[must_use]
pub fn path_to_flag_name(path: &LeafPath) -> String {
    path.segments()
        .iter()
        .map(|segment| segment.replace('_', "-"))
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether `name` can follow `--` on a command line.
fn is_long_flag_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.contains('=')
}

/// Bidirectional mapping between the flag names of a shape and its paths.
///
/// The forward direction is [`path_to_flag_name`]. Because joining and
/// normalising separators can fold distinct paths onto one name (`a_b` and
/// `a.b` both become `a-b`), the inverse is answered from the set of paths
/// the table was built from, and folding is rejected at construction.
#[derive(Clone, Debug, Default)]
pub struct FlagTable {
    paths: BTreeMap<String, LeafPath>,
}

impl FlagTable {
    /// Register every path in `paths`.
    ///
    /// Paths whose name cannot be spelled as a long flag (a leading `-`, as
    /// produced by a leading `_`, or an `=`) have no flag surface and are
    /// left out of the table.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::FlagCollision`] when two paths produce the
    /// same flag name.
    pub fn from_paths<'p, I>(paths: I) -> StrataResult<Self>
    where
        I: IntoIterator<Item = &'p LeafPath>,
    {
        let mut table: BTreeMap<String, LeafPath> = BTreeMap::new();
        for path in paths {
            let name = path_to_flag_name(path);
            if !is_long_flag_name(&name) {
                trace!(%path, flag = %name, "path has no usable flag name");
                continue;
            }
            if let Some(existing) = table.get(&name) {
                return Err(StrataError::FlagCollision {
                    flag: name,
                    first: existing.to_string(),
                    second: path.to_string(),
                });
            }
            table.insert(name, path.clone());
        }
        Ok(Self { paths: table })
    }

    /// Recover the path behind `name`, with or without its leading `--`.
    #[must_use]
    pub fn path_for(&self, name: &str) -> Option<&LeafPath> {
        let bare = name.strip_prefix("--").unwrap_or(name);
        self.paths.get(bare)
    }

    /// Flag name for `path`, if the path belongs to this table.
    #[must_use]
    pub fn name_for(&self, path: &LeafPath) -> Option<String> {
        let name = path_to_flag_name(path);
        self.paths.contains_key(&name).then_some(name)
    }

    /// Iterate over `(name, path)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafPath)> {
        self.paths.iter().map(|(name, path)| (name.as_str(), path))
    }

    /// Number of registered flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the table holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
