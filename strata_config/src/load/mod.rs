//! Orchestration: run providers, merge their layers, construct the target.
//!
//! Providers are listed highest priority first and invoked sequentially in
//! that order; the first failure aborts the load. The merged mapping is
//! coerced towards the target's declared scalar kinds and then deserialised.
//!
//! ```
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use serde_json::json;
//! use strata_config::{FlagProvider, MappingProvider, Provider, load};
//!
//! #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//! }
//!
//! let flags = FlagProvider::new(["--port", "8080"]);
//! let defaults = MappingProvider::new(json!({"host": "localhost", "port": 80}))?;
//! let cfg: AppConfig = load(&[&flags, &defaults])?;
//! assert_eq!(cfg, AppConfig { host: "localhost".into(), port: 8080 });
//! # Ok::<_, strata_config::StrataError>(())
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    Layer, MergeStrategy, Model, OverrideStrategy, Provider, Shape, StrataError, StrataResult,
    merge_layers,
};

/// Load `T` from `providers`, ordered highest priority first, merging with
/// [`MergeStrategy::MergeCollections`].
///
/// # Errors
///
/// Propagates the first provider failure, or returns
/// [`StrataError::Construction`] when the merged mapping does not satisfy
/// `T`.
pub fn load<T: Model>(providers: &[&dyn Provider]) -> StrataResult<T> {
    load_with_strategy(providers, &MergeStrategy::MergeCollections)
}

/// Load `T` from `providers` using `strategy` to settle collisions.
///
/// # Errors
///
/// Propagates the first provider failure, or returns
/// [`StrataError::Construction`] when the merged mapping does not satisfy
/// `T`.
pub fn load_with_strategy<T, S>(providers: &[&dyn Provider], strategy: &S) -> StrataResult<T>
where
    T: Model,
    S: OverrideStrategy + ?Sized,
{
    let shape = T::shape();
    let layers = compose_layers(&shape, providers)?;
    construct(&shape, merge_layers(layers, strategy))
}

/// Run each provider against `shape` and collect their layers, preserving
/// the priority order of `providers`.
///
/// # Errors
///
/// Propagates the first provider failure; later providers are not run.
pub fn compose_layers(shape: &Shape, providers: &[&dyn Provider]) -> StrataResult<Vec<Layer>> {
    providers
        .iter()
        .map(|provider| {
            let layer = provider.layer(shape)?;
            debug!(
                provenance = ?layer.provenance(),
                path = ?layer.path(),
                keys = layer.value().len(),
                "provider contributed layer"
            );
            Ok(layer)
        })
        .collect()
}

/// Build `T` from a merged mapping described by `shape`.
///
/// String leaves are first coerced to the numeric or boolean kind `shape`
/// declares for them when they hold a valid literal of that kind.
///
/// # Errors
///
/// Returns [`StrataError::Construction`] naming the offending field when
/// deserialisation fails.
pub fn construct<T: Model>(shape: &Shape, mapping: Map<String, Value>) -> StrataResult<T> {
    let mut value = Value::Object(mapping);
    shape.coerce(&mut value);
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        StrataError::Construction {
            path,
            source: err.into_inner(),
        }
    })
}

/// Builder collecting providers and a strategy before loading.
///
/// ```
/// use schemars::JsonSchema;
/// use serde::Deserialize;
/// use serde_json::json;
/// use strata_config::{Loader, MappingProvider, MergeStrategy};
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Tags {
///     tags: Vec<String>,
/// }
///
/// let high = MappingProvider::new(json!({"tags": ["b"]}))?;
/// let low = MappingProvider::new(json!({"tags": ["a"]}))?;
///
/// let merged: Tags = Loader::new().provider(&high).provider(&low).load()?;
/// assert_eq!(merged.tags, ["a", "b"]);
///
/// let replaced: Tags = Loader::new()
///     .provider(&high)
///     .provider(&low)
///     .strategy(&MergeStrategy::Replace)
///     .load()?;
/// assert_eq!(replaced.tags, ["b"]);
/// # Ok::<_, strata_config::StrataError>(())
/// ```
#[derive(Clone)]
pub struct Loader<'a> {
    providers: Vec<&'a dyn Provider>,
    strategy: &'a dyn OverrideStrategy,
}

impl Default for Loader<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Loader<'a> {
    /// Empty loader using [`MergeStrategy::MergeCollections`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: Vec::new(),
            strategy: &MergeStrategy::MergeCollections,
        }
    }

    /// Append a provider with lower priority than those already added.
    #[must_use]
    pub fn provider(mut self, provider: &'a dyn Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Settle collisions with `strategy`.
    #[must_use]
    pub const fn strategy(mut self, strategy: &'a dyn OverrideStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run the providers and merge their layers without constructing a
    /// target.
    ///
    /// # Errors
    ///
    /// Propagates the first provider failure.
    pub fn merged(&self, shape: &Shape) -> StrataResult<Map<String, Value>> {
        let layers = compose_layers(shape, &self.providers)?;
        Ok(merge_layers(layers, self.strategy))
    }

    /// Load `T` from the collected providers.
    ///
    /// # Errors
    ///
    /// See [`load_with_strategy`].
    pub fn load<T: Model>(&self) -> StrataResult<T> {
        load_with_strategy(&self.providers, self.strategy)
    }
}

impl std::fmt::Debug for Loader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field(
                "providers",
                &self
                    .providers
                    .iter()
                    .map(|provider| provider.provenance())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
